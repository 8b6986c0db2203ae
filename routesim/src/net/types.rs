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

//! Module containing all type definitions shared across the network model.

use crate::net::device::{Machine, Router};
use petgraph::prelude::*;
use petgraph::stable_graph::StableGraph;
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

type IndexType = u32;
/// Device identification (and index into the topology graph)
pub type DeviceId = NodeIndex<IndexType>;
/// Link weight for the topology graph
pub type LinkWeight = f32;
/// Weighted topology graph. The vertices carry no payload here; the devices
/// themselves live in the network's device table, keyed by [`DeviceId`].
/// Vertex indices are stable for the lifetime of the topology.
pub type Topology = StableGraph<(), LinkWeight, Directed, IndexType>;

/// Kind of a network device, encoded in the first character of its address.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DeviceKind {
    /// Host endpoint (`M…`): originates and terminates messages.
    Machine,
    /// Forwarding node (`R…`): holds a routing table.
    Router,
}

/// Canonical textual device address.
///
/// The first character denotes the kind (`M` = machine, `R` = router), the
/// remainder distinguishes instances. Input is case-insensitive; the
/// canonical form is uppercase.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Address(String);

impl Address {
    /// The kind this address names.
    pub fn kind(&self) -> DeviceKind {
        if self.0.starts_with('M') {
            DeviceKind::Machine
        } else {
            DeviceKind::Router
        }
    }

    /// Returns `true` for machine addresses (`M…`).
    pub fn is_machine(&self) -> bool {
        self.kind() == DeviceKind::Machine
    }

    /// Returns `true` for router addresses (`R…`).
    pub fn is_router(&self) -> bool {
        self.kind() == DeviceKind::Router
    }

    /// The canonical (uppercase) form.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Address {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// A token that does not name a machine or a router.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("invalid device address: {0:?}")]
pub struct AddressError(pub String);

impl FromStr for Address {
    type Err = AddressError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let canonical = s.trim().to_ascii_uppercase();
        let mut chars = canonical.chars();
        let valid = matches!(chars.next(), Some('M') | Some('R'))
            && chars.clone().next().is_some()
            && chars.all(|c| c.is_ascii_alphanumeric());
        if valid {
            Ok(Address(canonical))
        } else {
            Err(AddressError(s.to_string()))
        }
    }
}

/// # Network Device (similar to `Option`)
///
/// Borrowing view of the device stored at one vertex. This enum behaves like
/// an `Option`, but it knows two different `Some` values, one per device
/// kind; command handlers turn it into a `Result` with the `*_or` helpers.
#[derive(Debug)]
pub enum NetworkDevice<'a> {
    /// Host endpoint
    Machine(&'a Machine),
    /// Forwarding node
    Router(&'a Router),
    /// Nothing stored at this id
    None,
}

impl<'a> NetworkDevice<'a> {
    /// Maps the device to an option, with `Some` only for a machine.
    pub fn machine(self) -> Option<&'a Machine> {
        match self {
            Self::Machine(machine) => Some(machine),
            _ => None,
        }
    }

    /// Maps the device to an option, with `Some` only for a router.
    pub fn router(self) -> Option<&'a Router> {
        match self {
            Self::Router(router) => Some(router),
            _ => None,
        }
    }

    /// Maps the device to a result, with `Ok` only for a machine.
    pub fn machine_or<E: std::error::Error>(self, error: E) -> Result<&'a Machine, E> {
        self.machine().ok_or(error)
    }

    /// Maps the device to a result, with `Ok` only for a router.
    pub fn router_or<E: std::error::Error>(self, error: E) -> Result<&'a Router, E> {
        self.router().ok_or(error)
    }

    /// Returns `true` if and only if no device is stored at this id.
    pub fn is_none(&self) -> bool {
        matches!(self, Self::None)
    }
}

/// Topology and command errors.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum NetError {
    /// Device is not present in the topology
    #[error("network device was not found in topology: {0}")]
    DeviceNotFound(Address),
    /// A machine was expected at this address
    #[error("network device {0} is not a machine")]
    NotAMachine(Address),
    /// A router was expected at this address
    #[error("network device {0} is not a router")]
    NotARouter(Address),
    /// A second device with the same address was inserted
    #[error("duplicate device address: {0}")]
    DuplicateDevice(Address),
    /// The named link is absent from the graph
    #[error("network link does not exist: {0} -> {1}")]
    LinkNotFound(Address, Address),
    /// The referenced link is absent from the graph
    #[error("network link does not exist between vertex {0} and vertex {1}")]
    LinkIndexNotFound(usize, usize),
    /// A machine violates the single-attachment invariant (fatal at planning)
    #[error("machine {0} must be attached to exactly one router, found {1} links")]
    MachineDegree(Address, usize),
    /// A machine's only link does not lead to a router (fatal at planning)
    #[error("machine {0} is not attached to a router")]
    AttachmentNotRouter(Address),
    /// A removal named a destination with no routing field
    #[error("no routing field for destination {0}")]
    FieldNotFound(Address),
}
