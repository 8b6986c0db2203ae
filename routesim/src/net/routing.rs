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

//! Module defining per-router routing tables.
//!
//! A table maps destination machines to next-hop devices. The representation
//! (linear list or splay tree) is chosen once at startup and is uniform
//! across all routers; both representations expose the same operations, with
//! removal keyed by destination only.

use crate::collections::SplayMap;
use crate::net::types::Address;

/// One `(destination machine, next hop)` pair within a router's table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RoutingField {
    /// Destination machine address; unique within a table
    pub dest: Address,
    /// Next device on the path towards `dest`
    pub next: Address,
}

/// Routing-table representation, selected from the startup menu.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TableKind {
    /// Insertion-ordered list of fields, scanned linearly per lookup
    List,
    /// Ordered map keyed by destination, splayed per lookup
    Tree,
}

/// A per-router next-hop table in one of the two representations.
#[derive(Debug, Clone)]
pub enum RoutingTable {
    /// List form
    List(Vec<RoutingField>),
    /// Tree form
    Tree(SplayMap<Address, Address>),
}

impl RoutingTable {
    /// Create an empty table of the given representation.
    pub fn new(kind: TableKind) -> Self {
        match kind {
            TableKind::List => Self::List(Vec::new()),
            TableKind::Tree => Self::Tree(SplayMap::new()),
        }
    }

    /// The representation this table uses.
    pub fn kind(&self) -> TableKind {
        match self {
            Self::List(_) => TableKind::List,
            Self::Tree(_) => TableKind::Tree,
        }
    }

    /// Number of fields in the table.
    pub fn len(&self) -> usize {
        match self {
            Self::List(fields) => fields.len(),
            Self::Tree(map) => map.len(),
        }
    }

    /// Returns `true` when the table holds no fields.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Insert a field; a duplicate destination replaces the stored next hop.
    pub fn insert(&mut self, field: RoutingField) {
        match self {
            Self::List(fields) => {
                for existing in fields.iter_mut() {
                    if existing.dest == field.dest {
                        existing.next = field.next;
                        return;
                    }
                }
                fields.push(field);
            }
            Self::Tree(map) => {
                let updated = match map.search(&field.dest) {
                    Some(next) => {
                        *next = field.next.clone();
                        true
                    }
                    None => false,
                };
                if !updated {
                    map.insert(field.dest, field.next);
                }
            }
        }
    }

    /// Remove the field for `dest`. Returns `false` when no field matches.
    pub fn remove(&mut self, dest: &Address) -> bool {
        match self {
            Self::List(fields) => match fields.iter().position(|field| field.dest == *dest) {
                Some(position) => {
                    fields.remove(position);
                    true
                }
                None => false,
            },
            Self::Tree(map) => map.remove(dest),
        }
    }

    /// The next hop towards `dest`, if the table knows one.
    ///
    /// Takes `&mut self` because the tree form splays on lookup.
    pub fn next_hop(&mut self, dest: &Address) -> Option<Address> {
        match self {
            Self::List(fields) => {
                fields.iter().find(|field| field.dest == *dest).map(|field| field.next.clone())
            }
            Self::Tree(map) => map.search(dest).map(|next| next.clone()),
        }
    }

    /// The fields of the table: insertion order for the list form, key order
    /// for the tree form.
    pub fn entries(&self) -> Vec<RoutingField> {
        match self {
            Self::List(fields) => fields.clone(),
            Self::Tree(map) => map
                .iter()
                .map(|(dest, next)| RoutingField { dest: dest.clone(), next: next.clone() })
                .collect(),
        }
    }
}
