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

//! Module defining the two device kinds and their shared capability set.
//!
//! Machines and routers share the outbound FIFO and the
//! `insert_message` / `read_message` / `remove_message` motions; they differ
//! on the inbound discipline (FIFO at machines, priority queue at routers)
//! and on routing state. [`Device`] is the tagged sum over both.

use crate::collections::PriorityQueue;
use crate::net::message::{HighestPriority, Message};
use crate::net::routing::{RoutingField, RoutingTable, TableKind};
use crate::net::types::Address;
use std::collections::VecDeque;

/// A host endpoint.
///
/// Machines relay only their own traffic, in order, so both queues are plain
/// FIFOs. The attached router is recorded by the planner.
#[derive(Debug, Clone)]
pub struct Machine {
    address: Address,
    router_address: Option<Address>,
    in_queue: VecDeque<Message>,
    out_queue: VecDeque<Message>,
}

impl Machine {
    pub(crate) fn new(address: Address) -> Self {
        Self { address, router_address: None, in_queue: VecDeque::new(), out_queue: VecDeque::new() }
    }

    /// The machine's address.
    pub fn address(&self) -> &Address {
        &self.address
    }

    /// The router this machine is attached to, once planning has run.
    pub fn router_address(&self) -> Option<&Address> {
        self.router_address.as_ref()
    }

    pub(crate) fn set_router_address(&mut self, router: Address) {
        self.router_address = Some(router);
    }

    /// The inbound FIFO.
    pub fn in_queue(&self) -> &VecDeque<Message> {
        &self.in_queue
    }

    /// The outbound FIFO.
    pub fn out_queue(&self) -> &VecDeque<Message> {
        &self.out_queue
    }

    /// Enqueue an inbound message.
    pub fn insert_message(&mut self, message: Message) {
        self.in_queue.push_back(message);
    }

    /// Move the inbound head to the outbound FIFO ("pick up"). Returns
    /// `false` when the inbound queue is empty.
    pub fn read_message(&mut self) -> bool {
        match self.in_queue.pop_front() {
            Some(message) => {
                self.out_queue.push_back(message);
                true
            }
            None => false,
        }
    }

    /// Dequeue the outbound head.
    pub fn remove_message(&mut self) -> Option<Message> {
        self.out_queue.pop_front()
    }

    /// The outbound head, without dequeuing it.
    pub fn out_head(&self) -> Option<&Message> {
        self.out_queue.front()
    }
}

/// A forwarding node.
///
/// The inbound queue is a max-heap on message priority, so urgent messages
/// preempt the rest of the inbox; the outbound queue stays a FIFO.
#[derive(Debug, Clone)]
pub struct Router {
    address: Address,
    in_queue: PriorityQueue<Message, HighestPriority>,
    out_queue: VecDeque<Message>,
    table: RoutingTable,
}

impl Router {
    pub(crate) fn new(address: Address, kind: TableKind) -> Self {
        Self {
            address,
            in_queue: PriorityQueue::new(),
            out_queue: VecDeque::new(),
            table: RoutingTable::new(kind),
        }
    }

    /// The router's address.
    pub fn address(&self) -> &Address {
        &self.address
    }

    /// The routing table.
    pub fn table(&self) -> &RoutingTable {
        &self.table
    }

    pub(crate) fn set_table(&mut self, table: RoutingTable) {
        self.table = table;
    }

    /// The inbound priority queue.
    pub fn in_queue(&self) -> &PriorityQueue<Message, HighestPriority> {
        &self.in_queue
    }

    /// The outbound FIFO.
    pub fn out_queue(&self) -> &VecDeque<Message> {
        &self.out_queue
    }

    /// Enqueue an inbound message by priority.
    pub fn insert_message(&mut self, message: Message) {
        self.in_queue.enqueue(message);
    }

    /// Move the highest-priority inbound message to the outbound FIFO.
    /// Returns `false` when the inbox is empty.
    pub fn read_message(&mut self) -> bool {
        match self.in_queue.dequeue() {
            Some(message) => {
                self.out_queue.push_back(message);
                true
            }
            None => false,
        }
    }

    /// Dequeue the outbound head.
    pub fn remove_message(&mut self) -> Option<Message> {
        self.out_queue.pop_front()
    }

    /// The outbound head, without dequeuing it.
    pub fn out_head(&self) -> Option<&Message> {
        self.out_queue.front()
    }

    /// The next hop for `dest` according to the routing table.
    pub fn routing_decision(&mut self, dest: &Address) -> Option<Address> {
        self.table.next_hop(dest)
    }

    /// Insert or update one routing field.
    pub fn insert_field(&mut self, field: RoutingField) {
        self.table.insert(field);
    }

    /// Remove the routing field for `dest`. Returns `false` on a miss.
    pub fn remove_field(&mut self, dest: &Address) -> bool {
        self.table.remove(dest)
    }
}

/// Any network node.
#[derive(Debug, Clone)]
pub enum Device {
    /// Host endpoint
    Machine(Machine),
    /// Forwarding node
    Router(Router),
}

impl Device {
    /// The device's address.
    pub fn address(&self) -> &Address {
        match self {
            Self::Machine(machine) => machine.address(),
            Self::Router(router) => router.address(),
        }
    }

    /// Enqueue an inbound message, honoring the device's inbound discipline.
    pub fn insert_message(&mut self, message: Message) {
        match self {
            Self::Machine(machine) => machine.insert_message(message),
            Self::Router(router) => router.insert_message(message),
        }
    }

    /// Move the next inbound message to the outbound FIFO.
    pub fn read_message(&mut self) -> bool {
        match self {
            Self::Machine(machine) => machine.read_message(),
            Self::Router(router) => router.read_message(),
        }
    }

    /// Dequeue the outbound head.
    pub fn remove_message(&mut self) -> Option<Message> {
        match self {
            Self::Machine(machine) => machine.remove_message(),
            Self::Router(router) => router.remove_message(),
        }
    }

    /// The outbound head, without dequeuing it.
    pub fn out_head(&self) -> Option<&Message> {
        match self {
            Self::Machine(machine) => machine.out_head(),
            Self::Router(router) => router.out_head(),
        }
    }

    /// Returns `true` when both the inbound queue and the outbound FIFO are
    /// empty.
    pub fn queues_empty(&self) -> bool {
        match self {
            Self::Machine(machine) => machine.in_queue.is_empty() && machine.out_queue.is_empty(),
            Self::Router(router) => router.in_queue.is_empty() && router.out_queue.is_empty(),
        }
    }

    /// The machine stored here, if this is one.
    pub fn as_machine(&self) -> Option<&Machine> {
        match self {
            Self::Machine(machine) => Some(machine),
            Self::Router(_) => None,
        }
    }

    /// The machine stored here, mutably.
    pub fn as_machine_mut(&mut self) -> Option<&mut Machine> {
        match self {
            Self::Machine(machine) => Some(machine),
            Self::Router(_) => None,
        }
    }

    /// The router stored here, if this is one.
    pub fn as_router(&self) -> Option<&Router> {
        match self {
            Self::Machine(_) => None,
            Self::Router(router) => Some(router),
        }
    }

    /// The router stored here, mutably.
    pub fn as_router_mut(&mut self) -> Option<&mut Router> {
        match self {
            Self::Machine(_) => None,
            Self::Router(router) => Some(router),
        }
    }
}
