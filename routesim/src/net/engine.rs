// Routesim: An Interactive Network Routing Simulator
// Copyright (C) 2026  The Routesim Developers
//
// This program is free software; you can redistribute it and/or modify
// it under the terms of the GNU General Public License as published by
// the Free Software Foundation; either version 2 of the License, or
// (at your option) any later version.
//
// This program is distributed in the hope that it will be useful,
// but WITHOUT ANY WARRANTY; without even the implied warranty of
// MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE.  See the
// GNU General Public License for more details.
//
// You should have received a copy of the GNU General Public License along
// with this program; if not, write to the Free Software Foundation, Inc.,
// 51 Franklin Street, Fifth Floor, Boston, MA 02110-1301 USA.

//! # Forwarding engine
//!
//! Drives staged messages through the topology in discrete cycles: one
//! sweep over every device per cycle, at most one hop per device per sweep.
//! After each hop the engine releases the network mutex, sleeps one
//! simulated tick and passes the pause checkpoint, which is the window in
//! which the operator freezes the run or mutates routing state.
//!
//! The engine never fails once started: ill-formed routing drops the
//! affected message with a warning and the run keeps draining.

use crate::net::message::Message;
use crate::net::network::Network;
use crate::net::types::{Address, DeviceId, DeviceKind};
use crate::Controls;
use log::*;
use std::fmt;
use std::fs::{File, OpenOptions};
use std::io::{self, BufRead, BufReader, Write};
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};
use std::thread::{self, JoinHandle};
use std::time::Duration;

/// What a single device step did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum StepOutcome {
    /// Nothing to pick up, or the outbound head was left in place
    Idle,
    /// A message was consumed at its destination or dropped
    Settled,
    /// A message moved one hop towards another device
    Forwarded,
}

enum MachineAction {
    Originate(Message, Address),
    Deliver(Message),
    Unattached(Message),
    Hold,
}

/// What one whole cycle achieved.
#[derive(Debug, Clone, Copy)]
pub(crate) struct CycleReport {
    /// Every inbound queue and outbound FIFO is empty
    pub(crate) drained: bool,
    /// At least one message moved, was delivered, or was dropped
    pub(crate) progressed: bool,
}

/// Drive the engine on the calling thread until every queue drains or the
/// controls request a stop.
///
/// Delivered messages append one `id:hop:…:hop` line to `path_file`. The
/// tick is the per-hop sleep; the interactive binary uses about one second,
/// tests use zero.
pub fn run(net: &Mutex<Network>, controls: &Controls, path_file: &Path, tick: Duration) {
    println!("\nMessage Transfer Log");
    while controls.is_running() {
        let report = run_cycle(net, controls, path_file, tick);
        if report.drained {
            break;
        }
        if !report.progressed {
            // a stuck outbound message keeps the queues busy without any
            // hops; yield a tick per cycle instead of spinning
            thread::sleep(tick);
            controls.checkpoint();
        }
    }
    controls.stop();
}

/// One sweep over every device in vertex-index order.
pub(crate) fn run_cycle(
    net: &Mutex<Network>,
    controls: &Controls,
    path_file: &Path,
    tick: Duration,
) -> CycleReport {
    let ids = net.lock().unwrap().device_ids();
    let mut progressed = false;
    for id in ids {
        let outcome = step_device(&mut net.lock().unwrap(), id, path_file);
        if outcome != StepOutcome::Idle {
            progressed = true;
        }
        if outcome == StepOutcome::Forwarded {
            // the lock is dropped here: one simulated tick of link delay,
            // and the operator's window to pause or mutate
            thread::sleep(tick);
            controls.checkpoint();
        }
    }
    CycleReport { drained: net.lock().unwrap().queues_drained(), progressed }
}

/// Let the device at `id` perform its one step of the current cycle.
pub(crate) fn step_device(net: &mut Network, id: DeviceId, path_file: &Path) -> StepOutcome {
    match net.device_kind(id) {
        Some(DeviceKind::Machine) => machine_step(net, id, path_file),
        Some(DeviceKind::Router) => router_step(net, id),
        None => StepOutcome::Idle,
    }
}

fn machine_step(net: &mut Network, id: DeviceId, path_file: &Path) -> StepOutcome {
    let (address, action) = {
        let machine = match net.machine_mut(id) {
            Some(machine) => machine,
            None => return StepOutcome::Idle,
        };
        if !machine.read_message() {
            return StepOutcome::Idle;
        }
        let address = machine.address().clone();
        let (src, dst, msg_id) = match machine.out_head() {
            Some(head) => (head.src.clone(), head.dst.clone(), head.id),
            None => return StepOutcome::Idle,
        };
        println!("{} picked up message {}", address, msg_id);
        let action = if src == address {
            // this machine just originated the message
            let router = machine.router_address().cloned();
            match machine.remove_message() {
                Some(message) => match router {
                    Some(router) => MachineAction::Originate(message, router),
                    None => MachineAction::Unattached(message),
                },
                None => MachineAction::Hold,
            }
        } else if dst == address {
            match machine.remove_message() {
                Some(message) => MachineAction::Deliver(message),
                None => MachineAction::Hold,
            }
        } else {
            // in transit through this machine only incidentally; leave it
            MachineAction::Hold
        };
        (address, action)
    };

    match action {
        MachineAction::Originate(mut message, router_address) => {
            message.push_hop(&router_address);
            let router_id = net.device_id(&router_address);
            match router_id.and_then(|rid| net.router_mut(rid)) {
                Some(router) => {
                    println!(
                        "{} transferred message {} to {}",
                        address, message.id, router_address
                    );
                    router.insert_message(message);
                    StepOutcome::Forwarded
                }
                None => {
                    warn!(
                        "{} cannot reach router {}, message {} dropped",
                        address, router_address, message.id
                    );
                    StepOutcome::Settled
                }
            }
        }
        MachineAction::Deliver(message) => {
            println!(
                "{} received message {} from {} \"{}\"",
                address, message.id, message.trace, message.payload
            );
            if let Err(error) = append_path(path_file, &message) {
                error!("failed to append to {}: {}", path_file.display(), error);
            }
            StepOutcome::Settled
        }
        MachineAction::Unattached(message) => {
            warn!("{} has no attached router, message {} dropped", address, message.id);
            StepOutcome::Settled
        }
        MachineAction::Hold => StepOutcome::Idle,
    }
}

fn router_step(net: &mut Network, id: DeviceId) -> StepOutcome {
    let (address, mut message, next_address) = {
        let router = match net.router_mut(id) {
            Some(router) => router,
            None => return StepOutcome::Idle,
        };
        if !router.read_message() {
            return StepOutcome::Idle;
        }
        let address = router.address().clone();
        let (dst, msg_id) = match router.out_head() {
            Some(head) => (head.dst.clone(), head.id),
            None => return StepOutcome::Idle,
        };
        println!("{} picked up message {}", address, msg_id);
        let next = router.routing_decision(&dst);
        let message = match router.remove_message() {
            Some(message) => message,
            None => return StepOutcome::Idle,
        };
        match next {
            Some(next) => (address, message, next),
            None => {
                warn!("{} has no route for {}, message {} dropped", address, dst, msg_id);
                return StepOutcome::Settled;
            }
        }
    };

    message.push_hop(&next_address);
    let next_id = net.device_id(&next_address);
    match next_id.and_then(|nid| net.device_mut(nid)) {
        Some(device) => {
            println!("{} transferred message {} to {}", address, message.id, next_address);
            device.insert_message(message);
            StepOutcome::Forwarded
        }
        None => {
            warn!(
                "{} routes {} via unknown device {}, message {} dropped",
                address, message.dst, next_address, message.id
            );
            StepOutcome::Settled
        }
    }
}

fn append_path(path_file: &Path, message: &Message) -> io::Result<()> {
    let mut file = OpenOptions::new().create(true).append(true).open(path_file)?;
    writeln!(file, "{}:{}", message.id, message.trace)
}

/// Filter for one end of a path-log query: `*` or a concrete machine.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PathFilter {
    /// Match every address
    Any,
    /// Match exactly this address
    Addr(Address),
}

impl PathFilter {
    fn matches(&self, hop: &str) -> bool {
        match self {
            PathFilter::Any => true,
            PathFilter::Addr(address) => address.as_str() == hop,
        }
    }
}

impl fmt::Display for PathFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PathFilter::Any => f.write_str("*"),
            PathFilter::Addr(address) => write!(f, "{}", address),
        }
    }
}

/// Scan the run's path file and return, in file order and unmodified, every
/// `id:hop:…:hop` line whose first hop matches `src` and whose last hop
/// matches `dst`.
pub fn query_path_log(
    path_file: &Path,
    src: &PathFilter,
    dst: &PathFilter,
) -> io::Result<Vec<String>> {
    let file = File::open(path_file)?;
    let mut lines = Vec::new();
    for line in BufReader::new(file).lines() {
        let line = line?;
        let hops: Vec<&str> = line.split(':').collect();
        if hops.len() < 3 {
            continue;
        }
        if src.matches(hops[1]) && dst.matches(hops[hops.len() - 1]) {
            lines.push(line);
        }
    }
    Ok(lines)
}

/// Handle on the single background simulation worker.
///
/// The worker runs [`run`] to completion; the handle carries the
/// [`Controls`] the operator toggles and the join handle the dispatch loop
/// disposes of.
#[derive(Debug)]
pub struct Simulation {
    controls: Controls,
    worker: Option<JoinHandle<()>>,
}

impl Simulation {
    /// Spawn the background worker. The caller's dispatch loop keeps at most
    /// one simulation alive at a time.
    pub fn start(net: Arc<Mutex<Network>>, path_file: PathBuf, tick: Duration) -> Self {
        let controls = Controls::new();
        let worker_controls = controls.clone();
        let worker = thread::spawn(move || run(&net, &worker_controls, &path_file, tick));
        Self { controls, worker: Some(worker) }
    }

    /// The shared control handle.
    pub fn controls(&self) -> &Controls {
        &self.controls
    }

    /// Flip the pause bit; returns `true` when the worker is now paused.
    pub fn toggle_pause(&self) -> bool {
        self.controls.toggle_pause()
    }

    /// True once the worker has drained all queues or honored a stop.
    pub fn is_finished(&self) -> bool {
        self.worker.as_ref().map(|worker| worker.is_finished()).unwrap_or(true)
    }

    /// Clear the run flag, wake a paused worker, and join it.
    pub fn stop(&mut self) {
        self.controls.stop();
        self.join();
    }

    /// Join the worker thread.
    pub fn join(&mut self) {
        if let Some(worker) = self.worker.take() {
            if worker.join().is_err() {
                error!("simulation worker panicked");
            }
        }
    }
}
