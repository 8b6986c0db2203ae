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

//! Interactive shell around the simulator: startup menu, command dispatch,
//! and the lifecycle of the single background worker.

use clap::Parser;
use console::style;
use log::*;
use routesim::net::{engine, loader, printer, Network, Simulation, TableKind};
use routesim::Error;
use std::fs;
use std::io::{self, BufRead, Write};
use std::path::PathBuf;
use std::sync::{Arc, Mutex};
use std::time::Duration;

mod command;
use command::Command;

#[derive(Debug, Parser)]
#[command(name = "routesim", about = "Interactive network routing simulator", version)]
struct Args {
    /// Topology matrix loaded at startup
    #[arg(long, default_value = "Network.csv")]
    topology: PathBuf,

    /// Per-run delivery path log
    #[arg(long, default_value = "path.txt")]
    path_file: PathBuf,

    /// Routing-table representation; prompted interactively when omitted
    #[arg(long, value_enum)]
    tables: Option<TableChoice>,

    /// Simulated tick length per hop, in milliseconds
    #[arg(long, default_value_t = 1000)]
    tick_ms: u64,
}

#[derive(Debug, Clone, Copy, clap::ValueEnum)]
enum TableChoice {
    /// Linear lists
    List,
    /// Splay trees
    Tree,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    pretty_env_logger::init();
    let args = Args::parse();

    banner();
    let kind = match args.tables {
        Some(TableChoice::List) => TableKind::List,
        Some(TableChoice::Tree) => TableKind::Tree,
        None => choose_tables()?,
    };

    // a corrupt topology invalidates everything: load and plan or die
    let text = fs::read_to_string(&args.topology)?;
    let mut net = loader::load_topology(&text, kind)?;
    net.find_shortest_paths()?;
    info!(
        "loaded {} devices from {} ({:?} tables)",
        net.num_devices(),
        args.topology.display(),
        kind
    );

    let net = Arc::new(Mutex::new(net));
    run_queries(&net, &args)?;

    println!("\nThe program has ended\n");
    Ok(())
}

fn banner() {
    let rule = "=".repeat(100);
    println!("{}", rule);
    println!("\n{}\n", style("Network Simulator").bold().cyan());
    println!("{}", rule);
}

fn choose_tables() -> io::Result<TableKind> {
    println!("\nStructures for Routing Tables\n");
    println!("1. Linear Lists");
    println!("2. Splay Trees");

    let stdin = io::stdin();
    loop {
        print!("\n---> Enter your choice: ");
        io::stdout().flush()?;
        let mut line = String::new();
        if stdin.lock().read_line(&mut line)? == 0 {
            // EOF before a choice: fall back to the list form
            return Ok(TableKind::List);
        }
        match line.trim() {
            "1" => return Ok(TableKind::List),
            "2" => return Ok(TableKind::Tree),
            _ => println!("{}", style("Invalid choice.").red()),
        }
    }
}

fn run_queries(net: &Arc<Mutex<Network>>, args: &Args) -> Result<(), Error> {
    let stdin = io::stdin();
    let mut sim: Option<Simulation> = None;

    loop {
        // dispose of a worker that has drained its queues
        if sim.as_ref().map(|active| active.is_finished()).unwrap_or(false) {
            if let Some(mut finished) = sim.take() {
                finished.join();
            }
        }

        if sim.is_none() {
            print!("\n---> Enter a query: ");
            let _ = io::stdout().flush();
        }
        let mut line = String::new();
        if stdin.lock().read_line(&mut line)? == 0 {
            break;
        }
        let input = line.trim();

        // while the worker runs, only pause and stop are honored
        if let Some(active) = sim.as_mut() {
            match input.to_ascii_lowercase().as_str() {
                "q" => {
                    active.stop();
                    sim = None;
                    println!("\nSimulation stopped");
                }
                "p" => {
                    if active.toggle_pause() {
                        println!("\nSimulation paused");
                    } else {
                        println!("\nSimulation resumed");
                    }
                }
                _ => {}
            }
            continue;
        }

        match command::parse(input) {
            Some(Command::Exit) => break,
            Some(cmd) => {
                // tier-2 failures report and leave all state unchanged
                if let Err(error) = dispatch(net, args, cmd, &mut sim) {
                    println!("\n{}", error);
                }
            }
            None => println!("\nCommand Not Found"),
        }
    }

    if let Some(mut active) = sim.take() {
        active.stop();
    }
    Ok(())
}

fn dispatch(
    net: &Arc<Mutex<Network>>,
    args: &Args,
    cmd: Command,
    sim: &mut Option<Simulation>,
) -> Result<(), Error> {
    match cmd {
        Command::Exit => Ok(()),

        Command::SendMsg(file) => {
            let text = fs::read_to_string(&file)?;
            let messages = loader::parse_messages(&text)?;
            if messages.is_empty() {
                println!("\nNo Messages Found");
                return Ok(());
            }
            println!("\nMessages Sent\n");
            for msg in &messages {
                println!("[{}, {}, {}, {}, {}]", msg.id, msg.priority, msg.src, msg.dst, msg.payload);
            }
            net.lock().unwrap().stage_messages(messages)?;
            *sim = Some(Simulation::start(
                Arc::clone(net),
                args.path_file.clone(),
                Duration::from_millis(args.tick_ms),
            ));
            Ok(())
        }

        Command::ChangeRt(router, action, file) => {
            let text = fs::read_to_string(&file)?;
            let fields = loader::parse_fields(&text)?;
            if fields.is_empty() {
                println!("\nNo Routing Fields Found");
                return Ok(());
            }
            let mut guard = net.lock().unwrap();
            guard.change_rt(&router, action, &fields)?;
            println!("\nChanged Routing Table Successfully");
            printer::print_routing_tables(&guard);
            Ok(())
        }

        Command::PrintPath(src, dst) => {
            match engine::query_path_log(&args.path_file, &src, &dst) {
                Ok(lines) => {
                    println!("\nMessages sent from {} to {}\n", src, dst);
                    for line in lines {
                        println!("{}", line);
                    }
                }
                // a missing path log is a soft warning, nothing changes
                Err(error) => {
                    println!("\nFailed to open {}: {}", args.path_file.display(), error)
                }
            }
            Ok(())
        }

        Command::ChangeEdgeWeight(a, b, weight) => {
            let mut guard = net.lock().unwrap();
            guard.change_edge(&a, &b, weight)?;
            println!("\nChanged edges successfully, routing tables updated.");
            printer::print_graph(&guard);
            printer::print_routing_tables(&guard);
            Ok(())
        }

        Command::ChangeEdgeFile(file) => {
            let text = fs::read_to_string(&file)?;
            let mut guard = net.lock().unwrap();
            let updates = loader::parse_edge_matrix(&guard, &text)?;
            if updates.is_empty() {
                println!("\nNo New Edges Found");
                return Ok(());
            }
            guard.change_edges(&updates)?;
            println!("\nChanged edges successfully, routing tables updated.");
            printer::print_graph(&guard);
            printer::print_routing_tables(&guard);
            Ok(())
        }
    }
}
