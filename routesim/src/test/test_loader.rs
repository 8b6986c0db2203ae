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

use crate::net::loader::{self, LoadError};
use crate::net::types::Address;
use crate::net::TableKind;

fn addr(s: &str) -> Address {
    s.parse().unwrap()
}

const STAR: &str = "\
,M1,M2,M3,R1
M1,?,?,?,1
M2,?,?,?,2
M3,?,?,?,3
R1,1,2,3,?
";

#[test]
fn test_load_star_topology() {
    let mut net = loader::load_topology(STAR, TableKind::List).unwrap();
    assert_eq!(net.num_devices(), 4);
    assert_eq!(net.machines().len(), 3);
    assert_eq!(net.routers().len(), 1);

    // the address index and the graph stay consistent
    for id in net.device_ids() {
        let address = net.address_of(id).unwrap().clone();
        assert_eq!(net.device_id(&address), Some(id));
    }

    // symmetric cells produce a symmetric graph
    let m2 = net.device_id(&addr("m2")).unwrap();
    let r1 = net.device_id(&addr("R1")).unwrap();
    assert_eq!(net.edge_weight(m2, r1), Some(2.0));
    assert_eq!(net.edge_weight(r1, m2), Some(2.0));
}

#[test]
fn test_load_duplicate_address() {
    let text = "\
,M1,M1,R1
M1,?,?,1
M1,?,?,1
R1,1,1,?
";
    assert!(matches!(
        loader::load_topology(text, TableKind::List),
        Err(LoadError::DuplicateDevice(_))
    ));
}

#[test]
fn test_load_unknown_device_kind() {
    let text = "\
,M1,X1
M1,?,1
X1,1,?
";
    assert!(matches!(loader::load_topology(text, TableKind::List), Err(LoadError::Address(_))));
}

#[test]
fn test_load_invalid_cell() {
    let text = "\
,M1,R1
M1,?,12
R1,12,?
";
    assert!(matches!(
        loader::load_topology(text, TableKind::List),
        Err(LoadError::InvalidCell { .. })
    ));

    let text = "\
,M1,R1
M1,?,x
R1,x,?
";
    assert!(matches!(
        loader::load_topology(text, TableKind::List),
        Err(LoadError::InvalidCell { .. })
    ));
}

#[test]
fn test_load_row_out_of_order() {
    let text = "\
,M1,R1
R1,?,1
M1,1,?
";
    assert!(matches!(loader::load_topology(text, TableKind::List), Err(LoadError::RowOrder { .. })));
}

#[test]
fn test_parse_messages() {
    let text = "\
1:5:M1:M2:hello there
2:9:m2:m3:urgent
";
    let messages = loader::parse_messages(text).unwrap();
    assert_eq!(messages.len(), 2);
    assert_eq!(messages[0].id, 1);
    assert_eq!(messages[0].priority, 5);
    assert_eq!(messages[0].src, addr("M1"));
    assert_eq!(messages[0].dst, addr("M2"));
    assert_eq!(messages[0].payload, "hello there");
    assert_eq!(messages[0].trace, "");
    assert_eq!(messages[1].src, addr("M2"));
}

#[test]
fn test_parse_messages_malformed() {
    // four fields
    assert!(matches!(
        loader::parse_messages("1:5:M1:M2"),
        Err(LoadError::MalformedMessage(_))
    ));
    // router as source
    assert!(matches!(
        loader::parse_messages("1:5:R1:M2:payload"),
        Err(LoadError::MalformedMessage(_))
    ));
    // id is not a number
    assert!(matches!(
        loader::parse_messages("one:5:M1:M2:payload"),
        Err(LoadError::MalformedMessage(_))
    ));
    // one bad line fails the whole file
    assert!(loader::parse_messages("1:5:M1:M2:ok\nbroken\n").is_err());
}

#[test]
fn test_parse_fields() {
    let fields = loader::parse_fields("M2:R2\nm3:m3\n").unwrap();
    assert_eq!(fields.len(), 2);
    assert_eq!(fields[0].dest, addr("M2"));
    assert_eq!(fields[0].next, addr("R2"));
    assert_eq!(fields[1].dest, addr("M3"));
    assert_eq!(fields[1].next, addr("M3"));

    assert!(matches!(loader::parse_fields("M2"), Err(LoadError::MalformedField(_))));
    // destination must be a machine
    assert!(matches!(loader::parse_fields("R2:R3"), Err(LoadError::MalformedField(_))));
}

#[test]
fn test_parse_edge_matrix_diff() {
    let net = loader::load_topology(STAR, TableKind::List).unwrap();

    // M2's link changes from 2 to 7, everything else matches the graph
    let changed = "\
,M1,M2,M3,R1
M1,?,?,?,1
M2,?,?,?,7
M3,?,?,?,3
R1,1,7,3,?
";
    let updates = loader::parse_edge_matrix(&net, changed).unwrap();
    assert_eq!(updates.len(), 2);
    assert!(updates.iter().all(|update| (update.weight - 7.0).abs() < 0.001));

    // identical matrix queues nothing
    let updates = loader::parse_edge_matrix(&net, STAR).unwrap();
    assert!(updates.is_empty());
}

#[test]
fn test_parse_edge_matrix_rejects_new_edges() {
    let net = loader::load_topology(STAR, TableKind::List).unwrap();
    // M1-M2 does not exist in the loaded topology
    let text = "\
,M1,M2,M3,R1
M1,?,4,?,1
M2,4,?,?,2
M3,?,?,?,3
R1,1,2,3,?
";
    assert!(matches!(
        loader::parse_edge_matrix(&net, text),
        Err(LoadError::UnknownLink { .. })
    ));
}

#[test]
fn test_parse_edge_matrix_malformed_weight() {
    let net = loader::load_topology(STAR, TableKind::List).unwrap();
    let text = "\
,M1,M2,M3,R1
M1,?,?,?,10
M2,?,?,?,2
M3,?,?,?,3
R1,1,2,3,?
";
    assert!(matches!(
        loader::parse_edge_matrix(&net, text),
        Err(LoadError::InvalidCell { .. })
    ));
}
