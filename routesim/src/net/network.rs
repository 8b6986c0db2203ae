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

//! # Top-level Network module
//!
//! The [`Network`] owns the weighted topology graph, the devices at its
//! vertices, and the address index, and carries every mutation command the
//! operator can issue. It is built once by the loader, reshaped only through
//! edge-weight and routing-table commands, and shared with the simulation
//! worker behind a single mutex.

use crate::collections::SplayMap;
use crate::net::device::{Device, Machine, Router};
use crate::net::message::Message;
use crate::net::routing::{RoutingField, TableKind};
use crate::net::spf;
use crate::net::types::{
    Address, DeviceId, DeviceKind, LinkWeight, NetError, NetworkDevice, Topology,
};
use log::*;
use std::collections::HashMap;

/// Direction of a `change rt` mutation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RtAction {
    /// Insert fields, updating the next hop of destinations already present
    Add,
    /// Delete fields by destination
    Remove,
}

/// One queued weight change from a bulk edge update.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EdgeUpdate {
    /// Source vertex of the directed edge
    pub a: DeviceId,
    /// Target vertex of the directed edge
    pub b: DeviceId,
    /// New weight
    pub weight: LinkWeight,
}

/// # Network struct
///
/// The struct contains the underlying physical topology (as a stable graph
/// whose vertex indices never move), the devices stored at its vertices, and
/// the splay-tree index from canonical address to vertex id, maintained in
/// lockstep with the graph.
///
/// Address lookups take `&mut self`: the index splays on every search, which
/// is also why shared access is serialized behind one mutex together with
/// the rest of the state.
#[derive(Debug, Clone)]
pub struct Network {
    graph: Topology,
    devices: HashMap<DeviceId, Device>,
    index: SplayMap<Address, DeviceId>,
    table_kind: TableKind,
}

impl Network {
    /// Generate an empty network using the given routing-table
    /// representation for all routers.
    pub fn new(table_kind: TableKind) -> Self {
        Self {
            graph: Topology::default(),
            devices: HashMap::new(),
            index: SplayMap::new(),
            table_kind,
        }
    }

    /// The routing-table representation chosen at startup.
    pub fn table_kind(&self) -> TableKind {
        self.table_kind
    }

    /// Number of devices in the topology.
    pub fn num_devices(&self) -> usize {
        self.graph.node_count()
    }

    /// Returns `true` when no devices have been loaded.
    pub fn is_empty(&self) -> bool {
        self.graph.node_count() == 0
    }

    /// The topology graph.
    pub fn graph(&self) -> &Topology {
        &self.graph
    }

    /// Every device id, in vertex-index order.
    pub fn device_ids(&self) -> Vec<DeviceId> {
        self.graph.node_indices().collect()
    }

    /// Every machine with its address, in vertex-index order.
    pub fn machines(&self) -> Vec<(DeviceId, Address)> {
        self.graph
            .node_indices()
            .filter_map(|id| match self.devices.get(&id) {
                Some(Device::Machine(machine)) => Some((id, machine.address().clone())),
                _ => None,
            })
            .collect()
    }

    /// Every router with its address, in vertex-index order.
    pub fn routers(&self) -> Vec<(DeviceId, Address)> {
        self.graph
            .node_indices()
            .filter_map(|id| match self.devices.get(&id) {
                Some(Device::Router(router)) => Some((id, router.address().clone())),
                _ => None,
            })
            .collect()
    }

    /// Append a new device. Fails when its address is already taken; vertex
    /// indices of existing devices never change.
    pub fn add_device(&mut self, device: Device) -> Result<DeviceId, NetError> {
        let address = device.address().clone();
        if self.index.search(&address).is_some() {
            return Err(NetError::DuplicateDevice(address));
        }
        let id = self.graph.add_node(());
        self.devices.insert(id, device);
        self.index.insert(address, id);
        Ok(id)
    }

    /// Insert the directed edge `a -> b`; a no-op when the edge exists.
    pub fn insert_edge(&mut self, a: DeviceId, b: DeviceId, weight: LinkWeight) {
        if self.graph.find_edge(a, b).is_none() {
            self.graph.add_edge(a, b, weight);
        }
    }

    /// The weight of the edge `a -> b`, if present.
    pub fn edge_weight(&self, a: DeviceId, b: DeviceId) -> Option<LinkWeight> {
        self.graph.find_edge(a, b).and_then(|edge| self.graph.edge_weight(edge)).copied()
    }

    /// Resolve an address through the splay index.
    pub fn device_id(&mut self, address: &Address) -> Option<DeviceId> {
        self.index.search(address).copied()
    }

    /// The device stored at `id`.
    pub fn get_device(&self, id: DeviceId) -> NetworkDevice<'_> {
        match self.devices.get(&id) {
            Some(Device::Machine(machine)) => NetworkDevice::Machine(machine),
            Some(Device::Router(router)) => NetworkDevice::Router(router),
            None => NetworkDevice::None,
        }
    }

    /// The kind of the device stored at `id`.
    pub fn device_kind(&self, id: DeviceId) -> Option<DeviceKind> {
        match self.devices.get(&id) {
            Some(Device::Machine(_)) => Some(DeviceKind::Machine),
            Some(Device::Router(_)) => Some(DeviceKind::Router),
            None => None,
        }
    }

    /// The address of the device stored at `id`.
    pub fn address_of(&self, id: DeviceId) -> Option<&Address> {
        self.devices.get(&id).map(Device::address)
    }

    /// The address-index entries, in key order.
    pub fn index_entries(&self) -> Vec<(&Address, DeviceId)> {
        self.index.iter().map(|(address, id)| (address, *id)).collect()
    }

    pub(crate) fn device_mut(&mut self, id: DeviceId) -> Option<&mut Device> {
        self.devices.get_mut(&id)
    }

    pub(crate) fn machine_mut(&mut self, id: DeviceId) -> Option<&mut Machine> {
        self.devices.get_mut(&id).and_then(Device::as_machine_mut)
    }

    pub(crate) fn router_mut(&mut self, id: DeviceId) -> Option<&mut Router> {
        self.devices.get_mut(&id).and_then(Device::as_router_mut)
    }

    /// Recompute every router's routing table and every machine's attachment
    /// from the current edge weights.
    ///
    /// Fails (fatally, for the caller) when any machine violates the
    /// single-attachment invariant.
    pub fn find_shortest_paths(&mut self) -> Result<(), NetError> {
        spf::recompute(self)
    }

    /// Apply a `change rt` mutation to one router's table.
    ///
    /// The fields are applied in input order against a snapshot: `add`
    /// cannot fail once its destinations are known machines, but if any
    /// `remove` misses, the snapshot is restored and the whole command
    /// fails. Routing tables mutated here are deliberately *not* re-planned,
    /// so operator overrides survive until the next edge change.
    pub fn change_rt(
        &mut self,
        router: &Address,
        action: RtAction,
        fields: &[RoutingField],
    ) -> Result<(), NetError> {
        if action == RtAction::Add {
            // tables may only name machines that exist in the topology
            for field in fields {
                let dest = match self.device_id(&field.dest) {
                    Some(dest) => dest,
                    None => return Err(NetError::DeviceNotFound(field.dest.clone())),
                };
                if self.get_device(dest).machine().is_none() {
                    return Err(NetError::NotAMachine(field.dest.clone()));
                }
            }
        }
        let id = match self.device_id(router) {
            Some(id) => id,
            None => return Err(NetError::DeviceNotFound(router.clone())),
        };
        let target = match self.router_mut(id) {
            Some(target) => target,
            None => return Err(NetError::NotARouter(router.clone())),
        };
        let snapshot = target.table().clone();
        for field in fields {
            match action {
                RtAction::Add => target.insert_field(field.clone()),
                RtAction::Remove => {
                    if !target.remove_field(&field.dest) {
                        target.set_table(snapshot);
                        return Err(NetError::FieldNotFound(field.dest.clone()));
                    }
                }
            }
        }
        debug!("routing table of {} changed ({:?}, {} fields)", router, action, fields.len());
        Ok(())
    }

    /// Set the weight of the link between `a` and `b` in both directions,
    /// then re-plan. Fails without touching anything when either directed
    /// edge is absent.
    pub fn change_edge(
        &mut self,
        a: &Address,
        b: &Address,
        weight: LinkWeight,
    ) -> Result<(), NetError> {
        let ia = match self.device_id(a) {
            Some(id) => id,
            None => return Err(NetError::DeviceNotFound(a.clone())),
        };
        let ib = match self.device_id(b) {
            Some(id) => id,
            None => return Err(NetError::DeviceNotFound(b.clone())),
        };
        let ab = self
            .graph
            .find_edge(ia, ib)
            .ok_or_else(|| NetError::LinkNotFound(a.clone(), b.clone()))?;
        let ba = self
            .graph
            .find_edge(ib, ia)
            .ok_or_else(|| NetError::LinkNotFound(b.clone(), a.clone()))?;
        if let Some(stored) = self.graph.edge_weight_mut(ab) {
            *stored = weight;
        }
        if let Some(stored) = self.graph.edge_weight_mut(ba) {
            *stored = weight;
        }
        info!("link {} <-> {} set to weight {}", a, b, weight);
        self.find_shortest_paths()
    }

    /// Apply a batch of already validated edge updates, then re-plan.
    pub fn change_edges(&mut self, updates: &[EdgeUpdate]) -> Result<(), NetError> {
        for update in updates {
            match self.graph.find_edge(update.a, update.b) {
                Some(edge) => {
                    if let Some(stored) = self.graph.edge_weight_mut(edge) {
                        *stored = update.weight;
                    }
                }
                None => {
                    return Err(NetError::LinkIndexNotFound(
                        update.a.index(),
                        update.b.index(),
                    ))
                }
            }
        }
        info!("{} edge weights changed", updates.len());
        self.find_shortest_paths()
    }

    /// Stage parsed messages into their source machines' inboxes, with each
    /// trace initialized to the source address.
    ///
    /// Every source is resolved before anything is enqueued, so a bad record
    /// sends nothing.
    pub fn stage_messages(&mut self, messages: Vec<Message>) -> Result<(), NetError> {
        let mut staged = Vec::with_capacity(messages.len());
        for message in messages {
            let id = match self.device_id(&message.src) {
                Some(id) => id,
                None => return Err(NetError::DeviceNotFound(message.src.clone())),
            };
            match self.devices.get(&id) {
                Some(Device::Machine(_)) => staged.push((id, message)),
                _ => return Err(NetError::NotAMachine(message.src.clone())),
            }
        }
        for (id, mut message) in staged {
            message.trace = message.src.as_str().to_string();
            if let Some(machine) = self.machine_mut(id) {
                println!("Inserted message {} in {}", message.id, machine.address());
                machine.insert_message(message);
            }
        }
        Ok(())
    }

    /// Returns `true` when every device's inbound queue and outbound FIFO
    /// are empty; the forwarding engine terminates on this condition.
    pub fn queues_drained(&self) -> bool {
        self.devices.values().all(Device::queues_empty)
    }
}
