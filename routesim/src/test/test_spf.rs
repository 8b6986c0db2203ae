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

use crate::net::loader;
use crate::net::network::Network;
use crate::net::types::{Address, DeviceId, DeviceKind, LinkWeight, NetError};
use crate::net::TableKind;
use maplit::hashmap;
use petgraph::visit::EdgeRef;
use std::collections::HashMap;

fn addr(s: &str) -> Address {
    s.parse().unwrap()
}

fn planned(text: &str, kind: TableKind) -> Network {
    let mut net = loader::load_topology(text, kind).unwrap();
    net.find_shortest_paths().unwrap();
    net
}

fn table_of(net: &mut Network, router: &str) -> HashMap<Address, Address> {
    let id = net.device_id(&addr(router)).unwrap();
    net.get_device(id)
        .router()
        .unwrap()
        .table()
        .entries()
        .into_iter()
        .map(|field| (field.dest, field.next))
        .collect()
}

const STAR: &str = "\
,M1,M2,M3,R1
M1,?,?,?,1
M2,?,?,?,1
M3,?,?,?,1
R1,1,1,1,?
";

const FORK: &str = "\
,M1,M2,R1,R2
M1,?,?,1,?
M2,?,?,?,1
R1,1,?,?,2
R2,?,1,2,?
";

const MESH: &str = "\
,M1,M2,M3,R1,R2,R3
M1,?,?,?,1,?,?
M2,?,?,?,?,1,?
M3,?,?,?,?,?,1
R1,1,?,?,?,1,5
R2,?,1,?,1,?,1
R3,?,?,1,5,1,?
";

#[test]
fn test_star_topology_plan() {
    for kind in [TableKind::List, TableKind::Tree] {
        let mut net = planned(STAR, kind);

        // every machine is attached to the only router
        for (id, address) in net.machines() {
            let machine = net.get_device(id).machine().unwrap();
            assert_eq!(
                machine.router_address(),
                Some(&addr("R1")),
                "machine {} should be attached to R1",
                address
            );
        }

        // directly attached machines are their own next hop
        let expected = hashmap! {
            addr("M1") => addr("M1"),
            addr("M2") => addr("M2"),
            addr("M3") => addr("M3"),
        };
        assert_eq!(table_of(&mut net, "R1"), expected);
    }
}

#[test]
fn test_two_router_fork() {
    let mut net = planned(FORK, TableKind::List);
    let r1 = table_of(&mut net, "R1");
    assert_eq!(r1.get(&addr("M1")), Some(&addr("M1")));
    assert_eq!(r1.get(&addr("M2")), Some(&addr("R2")));
    let r2 = table_of(&mut net, "R2");
    assert_eq!(r2.get(&addr("M1")), Some(&addr("R1")));
    assert_eq!(r2.get(&addr("M2")), Some(&addr("M2")));
}

#[test]
fn test_both_representations_agree() {
    let mut list_net = planned(MESH, TableKind::List);
    let mut tree_net = planned(MESH, TableKind::Tree);
    for (_, router) in list_net.routers() {
        assert_eq!(
            table_of(&mut list_net, router.as_str()),
            table_of(&mut tree_net, router.as_str()),
            "tables of {} diverge between representations",
            router
        );
    }
}

#[test]
fn test_cheaper_detour_wins() {
    // R1 reaches M3 for 3 through R2, the direct R1-R3 link costs 5+1
    let mut net = planned(MESH, TableKind::List);
    let r1 = table_of(&mut net, "R1");
    assert_eq!(r1.get(&addr("M3")), Some(&addr("R2")));
}

/// Sum the edge weights along the `next`-chain from `from` towards `dest`.
fn chain_cost(net: &mut Network, from: DeviceId, dest: &Address) -> Option<LinkWeight> {
    let mut total = 0.0;
    let mut current = from;
    for _ in 0..=net.num_devices() {
        if net.address_of(current) == Some(dest) {
            return Some(total);
        }
        let next_address = match net.device_kind(current) {
            Some(DeviceKind::Router) => net.router_mut(current)?.routing_decision(dest)?,
            _ => return None,
        };
        let next = net.device_id(&next_address)?;
        total += net.edge_weight(current, next)?;
        current = next;
    }
    None
}

#[test]
fn test_chain_cost_matches_independent_dijkstra() {
    let mut net = planned(MESH, TableKind::Tree);
    let routers = net.routers();
    let machines = net.machines();
    for (router_id, router_address) in routers {
        let oracle =
            petgraph::algo::dijkstra(net.graph(), router_id, None, |edge| *edge.weight());
        for (machine_id, machine_address) in machines.iter() {
            let expected = oracle.get(machine_id).copied();
            let walked = chain_cost(&mut net, router_id, machine_address);
            match expected {
                Some(cost) => {
                    let walked = walked.unwrap_or_else(|| {
                        panic!("{} has no chain to {}", router_address, machine_address)
                    });
                    assert!(
                        (walked - cost).abs() < 1e-4,
                        "{} -> {}: chain cost {} != dijkstra {}",
                        router_address,
                        machine_address,
                        walked,
                        cost
                    );
                }
                None => assert_eq!(walked, None),
            }
        }
    }
}

#[test]
fn test_machine_degree_violation_is_fatal() {
    let text = "\
,M1,R1,R2
M1,?,1,1
R1,1,?,1
R2,1,1,?
";
    let mut net = loader::load_topology(text, TableKind::List).unwrap();
    assert_eq!(net.find_shortest_paths(), Err(NetError::MachineDegree(addr("M1"), 2)));
}

#[test]
fn test_machine_attached_to_machine_is_fatal() {
    let text = "\
,M1,M2,R1
M1,?,1,?
M2,1,?,1
R1,?,1,?
";
    let mut net = loader::load_topology(text, TableKind::List).unwrap();
    assert_eq!(net.find_shortest_paths(), Err(NetError::AttachmentNotRouter(addr("M1"))));
}
