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

#![deny(missing_docs, missing_debug_implementations)]

//! # Network model
//!
//! The core of the simulator: the weighted device topology, the
//! shortest-path planner, the forwarding engine, the mutation commands, and
//! the file loaders that feed them.
//!
//! The usual flow is: [`loader::load_topology`] builds a [`Network`] from an
//! adjacency matrix, [`Network::find_shortest_paths`] attaches machines and
//! fills every router's [`RoutingTable`], [`Network::stage_messages`] places
//! parsed messages in their source inboxes, and [`engine`] drives them hop
//! by hop while the operator mutates edge weights and tables between hops.

pub mod device;
pub mod engine;
pub mod loader;
pub mod message;
pub mod network;
pub mod printer;
pub(crate) mod spf;
pub mod types;

pub mod routing;

pub use device::{Device, Machine, Router};
pub use engine::{PathFilter, Simulation};
pub use loader::LoadError;
pub use message::Message;
pub use network::{EdgeUpdate, Network, RtAction};
pub use routing::{RoutingField, RoutingTable, TableKind};
pub use types::{
    Address, AddressError, DeviceId, DeviceKind, LinkWeight, NetError, NetworkDevice, Topology,
};
