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

//! Shortest-path planner: Dijkstra from every router, projected into
//! per-router routing tables.

use crate::collections::{Dominates, PriorityQueue};
use crate::net::network::Network;
use crate::net::routing::{RoutingField, RoutingTable, TableKind};
use crate::net::types::{DeviceId, LinkWeight, NetError, NetworkDevice};
use log::*;
use petgraph::visit::EdgeRef;

/// Min-heap order over `(distance, vertex)`. Ties on distance go to the
/// lower vertex index, so equal-cost paths resolve the same way on every
/// run.
#[derive(Debug, Clone, Copy, Default)]
pub(crate) struct NearestFirst;

impl Dominates<(LinkWeight, DeviceId)> for NearestFirst {
    fn dominates(a: &(LinkWeight, DeviceId), b: &(LinkWeight, DeviceId)) -> bool {
        a.0 < b.0 || (a.0 == b.0 && a.1.index() <= b.1.index())
    }
}

/// Recompute machine attachments and every router's routing table from the
/// current edge weights.
pub(crate) fn recompute(net: &mut Network) -> Result<(), NetError> {
    attach_machines(net)?;
    for (id, address) in net.routers() {
        let fields = plan_router(net, id);
        trace!("router {} resolves {} destinations", address, fields.len());
        let table = build_table(net.table_kind(), fields);
        if let Some(router) = net.router_mut(id) {
            router.set_table(table);
        }
    }
    Ok(())
}

/// Record each machine's attached router.
///
/// Every machine must have exactly one incident edge, and that edge must
/// lead to a router; anything else invalidates all further planning.
fn attach_machines(net: &mut Network) -> Result<(), NetError> {
    let mut attachments = Vec::new();
    for (id, address) in net.machines() {
        let neighbours: Vec<DeviceId> = net.graph().edges(id).map(|edge| edge.target()).collect();
        if neighbours.len() != 1 {
            return Err(NetError::MachineDegree(address, neighbours.len()));
        }
        match net.get_device(neighbours[0]) {
            NetworkDevice::Router(router) => attachments.push((id, router.address().clone())),
            _ => return Err(NetError::AttachmentNotRouter(address)),
        }
    }
    for (id, router_address) in attachments {
        if let Some(machine) = net.machine_mut(id) {
            machine.set_router_address(router_address);
        }
    }
    Ok(())
}

/// Run one lazy Dijkstra from `source` and project the results into routing
/// fields for every reachable machine.
fn plan_router(net: &Network, source: DeviceId) -> Vec<RoutingField> {
    let graph = net.graph();
    let vertex_count = graph.node_count();

    let mut distances = vec![LinkWeight::INFINITY; vertex_count];
    let mut parents: Vec<Option<DeviceId>> = vec![None; vertex_count];
    distances[source.index()] = 0.0;

    let mut queue: PriorityQueue<(LinkWeight, DeviceId), NearestFirst> = PriorityQueue::new();
    for id in graph.node_indices() {
        queue.enqueue((distances[id.index()], id));
    }

    // Re-enqueueing on every improvement leaves stale entries behind; they
    // are harmless because the loop extracts at most |V| minima, and a stale
    // distance can never relax below one already finalized.
    for _ in 0..vertex_count {
        let (distance, current) = match queue.dequeue() {
            Some(entry) => entry,
            None => break,
        };
        for edge in graph.edges(current) {
            let neighbour = edge.target();
            let relaxed = distance + *edge.weight();
            if relaxed < distances[neighbour.index()] {
                distances[neighbour.index()] = relaxed;
                parents[neighbour.index()] = Some(current);
                queue.enqueue((relaxed, neighbour));
            }
        }
    }

    // router-to-router paths produce no fields; every reachable machine
    // other than the source's own vertex gets its first hop
    let mut fields = Vec::new();
    for (id, address) in net.machines() {
        if id == source || distances[id.index()].is_infinite() {
            continue;
        }
        if let Some(next) = first_hop(&parents, source, id) {
            if let Some(next_address) = net.address_of(next) {
                fields.push(RoutingField { dest: address, next: next_address.clone() });
            }
        }
    }
    fields
}

/// Walk the parent chain from `target` back to `source`; the vertex right
/// below `source` is the table entry.
fn first_hop(parents: &[Option<DeviceId>], source: DeviceId, target: DeviceId) -> Option<DeviceId> {
    let mut hop = target;
    loop {
        match parents[hop.index()] {
            Some(parent) if parent == source => return Some(hop),
            Some(parent) => hop = parent,
            None => return None,
        }
    }
}

fn build_table(kind: TableKind, fields: Vec<RoutingField>) -> RoutingTable {
    let mut table = RoutingTable::new(kind);
    for field in fields {
        table.insert(field);
    }
    table
}
