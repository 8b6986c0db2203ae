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

//! # Helper (printer) functions for the Network
//!
//! Formatted views of the network state: adjacency listing, address map,
//! machine attachments, and per-router routing tables. Each view comes as a
//! line formatter (for tests and embedding) plus a `print_*` wrapper the
//! interactive shell calls around mutation commands.

use crate::net::network::Network;
use crate::net::routing::TableKind;
use crate::net::types::NetworkDevice;
use itertools::Itertools;
use petgraph::visit::EdgeRef;

/// One line per vertex: the device's address followed by its out-edge list.
pub fn graph_lines(net: &Network) -> Vec<String> {
    net.device_ids()
        .into_iter()
        .map(|id| {
            let address =
                net.address_of(id).map(|address| address.as_str()).unwrap_or("?");
            let edges = net
                .graph()
                .edges(id)
                .map(|edge| {
                    let target = net
                        .address_of(edge.target())
                        .map(|address| address.as_str())
                        .unwrap_or("?");
                    format!("[{}, {}]", target, edge.weight())
                })
                .join(" -> ");
            format!("[{}]: {}", address, edges)
        })
        .collect()
}

/// One `[address, index]` line per address-map entry, in key order.
pub fn map_lines(net: &Network) -> Vec<String> {
    net.index_entries()
        .into_iter()
        .map(|(address, id)| format!("[{}, {}]", address, id.index()))
        .collect()
}

/// One `[machine, router]` line per attached machine.
pub fn machine_router_lines(net: &Network) -> Vec<String> {
    net.machines()
        .into_iter()
        .filter_map(|(id, address)| {
            let machine = net.get_device(id).machine()?;
            let router = machine.router_address()?;
            Some(format!("[{}, {}]", address, router))
        })
        .collect()
}

/// Per-router table listing: a title line per router followed by its
/// `[dest, next]` fields.
pub fn routing_table_lines(net: &Network) -> Vec<String> {
    let title = match net.table_kind() {
        TableKind::List => "Routing List",
        TableKind::Tree => "Routing Tree",
    };
    let mut lines = Vec::new();
    for (id, address) in net.routers() {
        lines.push(format!("{} {}", address, title));
        if let NetworkDevice::Router(router) = net.get_device(id) {
            for field in router.table().entries() {
                lines.push(format!("[{}, {}]", field.dest, field.next));
            }
        }
    }
    lines
}

/// Print the adjacency listing of the network.
pub fn print_graph(net: &Network) {
    println!("\nNetwork Adjacency\n");
    for line in graph_lines(net) {
        println!("{}", line);
    }
}

/// Print the address map of the network.
pub fn print_map(net: &Network) {
    println!("\nDevice Map\n");
    for line in map_lines(net) {
        println!("{}", line);
    }
}

/// Print each machine with its attached router.
pub fn print_machine_routers(net: &Network) {
    println!("\nMachine Routers\n");
    for line in machine_router_lines(net) {
        println!("{}", line);
    }
}

/// Print every router's routing table in the startup-chosen representation.
pub fn print_routing_tables(net: &Network) {
    println!();
    for line in routing_table_lines(net) {
        println!("{}", line);
    }
}
