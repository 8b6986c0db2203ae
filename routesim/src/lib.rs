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

#![deny(missing_docs)]

//! # Routesim: An Interactive Network Routing Simulator
//!
//! This is a library for simulating a topology of end-host machines and
//! forwarding routers connected by weighted bidirectional links. It computes
//! per-router shortest-path routing tables with Dijkstra, and animates the
//! hop-by-hop delivery of priority-ordered messages while a foreground
//! operator pauses the run, reshapes routing tables, and changes edge
//! weights in real time.
//!
//! ## Structure
//!
//! - **[`collections`]**: the containers the core is built on — a splay-tree
//!   map (address index, tree-form routing tables) and a comparator-
//!   parameterized binary heap (planner frontier, router inboxes).
//!
//! - **[`net`]**: the network model. See the main structure
//!   [`Network`](net::Network), the planner entry point
//!   [`Network::find_shortest_paths`](net::Network::find_shortest_paths),
//!   and the forwarding [`engine`](net::engine).
//!
//! - **[`Controls`]**: the coordination handle shared between the operator
//!   and the background simulation worker.
//!
//! ## Example usage
//!
//! The following example loads a four-device topology (two machines, each
//! attached to its own router), plans the shortest paths, and inspects the
//! routing table of `R1`.
//!
//! ```rust
//! use routesim::net::{loader, TableKind};
//!
//! fn main() -> Result<(), routesim::Error> {
//!     let matrix = "\
//! ,M1,M2,R1,R2
//! M1,?,?,1,?
//! M2,?,?,?,1
//! R1,1,?,?,2
//! R2,?,1,2,?
//! ";
//!
//!     let mut net = loader::load_topology(matrix, TableKind::List)?;
//!     net.find_shortest_paths()?;
//!
//!     let r1 = net.device_id(&"R1".parse()?).unwrap();
//!     let table = net.get_device(r1).router().unwrap().table();
//!     // R1 reaches M1 directly and M2 through R2
//!     assert_eq!(table.len(), 2);
//!
//!     Ok(())
//! }
//! ```

pub mod collections;
mod error;
pub mod net;

// test modules
mod test;

pub use error::Error;

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Condvar, Mutex};

/// Coordination handle shared by the foreground operator and the background
/// simulation worker.
///
/// Carries the run flag that authorizes the worker to continue and the pause
/// bit the operator toggles. The worker calls [`checkpoint`](Self::checkpoint)
/// at every per-hop yield, after releasing the network mutex, so mutations
/// enacted while it is parked take effect before the next hop.
#[derive(Debug, Clone, Default)]
pub struct Controls {
    inner: Arc<ControlsInner>,
}

#[derive(Debug)]
struct ControlsInner {
    running: AtomicBool,
    paused: Mutex<bool>,
    resume: Condvar,
}

impl Default for ControlsInner {
    fn default() -> Self {
        Self { running: AtomicBool::new(true), paused: Mutex::new(false), resume: Condvar::new() }
    }
}

impl Controls {
    /// Create a fresh handle in the running, unpaused state.
    pub fn new() -> Self {
        Self::default()
    }

    /// Checks whether the worker is authorized to continue.
    pub fn is_running(&self) -> bool {
        self.inner.running.load(Ordering::SeqCst)
    }

    /// Send the stop command: clear the run flag and wake a paused worker so
    /// it can observe the flag and exit.
    pub fn stop(&self) {
        self.inner.running.store(false, Ordering::SeqCst);
        self.inner.resume.notify_all();
    }

    /// Flip the pause bit; returns `true` when the worker is now paused.
    /// Resuming wakes the worker.
    pub fn toggle_pause(&self) -> bool {
        let mut paused = self.inner.paused.lock().unwrap();
        *paused = !*paused;
        let now_paused = *paused;
        drop(paused);
        if !now_paused {
            self.inner.resume.notify_all();
        }
        now_paused
    }

    /// Checks whether the pause bit is set.
    pub fn is_paused(&self) -> bool {
        *self.inner.paused.lock().unwrap()
    }

    /// Worker-side suspension point: blocks while paused and running,
    /// returns immediately otherwise. Must not be called while holding the
    /// network mutex.
    pub fn checkpoint(&self) {
        let mut paused = self.inner.paused.lock().unwrap();
        while *paused && self.is_running() {
            paused = self.inner.resume.wait(paused).unwrap();
        }
    }
}
