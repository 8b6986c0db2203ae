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

//! Module containing the file-format parsers.
//!
//! Four inputs feed the simulator: the topology adjacency matrix, message
//! files, routing-field files, and bulk edge-change matrices. Each parser
//! turns text into typed records or fails with a [`LoadError`] before any
//! state is touched.

use crate::net::device::{Device, Machine, Router};
use crate::net::message::Message;
use crate::net::network::{EdgeUpdate, Network};
use crate::net::routing::{RoutingField, TableKind};
use crate::net::types::{Address, AddressError, DeviceId, DeviceKind, LinkWeight};
use thiserror::Error;

/// Matrix cells two weights apart are considered changed.
const WEIGHT_TOLERANCE: LinkWeight = 0.001;

/// Errors produced by the file-format parsers.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum LoadError {
    /// A token does not name a machine or a router
    #[error(transparent)]
    Address(#[from] AddressError),
    /// The same address appears twice in the header
    #[error("duplicate device address: {0}")]
    DuplicateDevice(Address),
    /// A matrix cell is neither `?` nor a single decimal digit
    #[error("invalid edge weight cell {cell:?} at row {row}, column {column}")]
    InvalidCell {
        /// Offending cell text
        cell: String,
        /// Data-region row (0-based)
        row: usize,
        /// Data-region column (0-based)
        column: usize,
    },
    /// A data row's label does not follow header order
    #[error("row {row} is labelled {found:?}, expected {expected}")]
    RowOrder {
        /// Data-region row (0-based)
        row: usize,
        /// Label found in the first column
        found: String,
        /// Address the header lists at this position
        expected: Address,
    },
    /// The matrix data region is not square
    #[error("row {row} has {cells} cells, expected {expected}")]
    RowWidth {
        /// Data-region row (0-based)
        row: usize,
        /// Number of cells found after the label
        cells: usize,
        /// Number of header addresses
        expected: usize,
    },
    /// More data rows than header addresses
    #[error("matrix row {0} is out of range for the topology")]
    RowOutOfRange(usize),
    /// A message line is not five `:`-separated fields with machine
    /// endpoints
    #[error("malformed message record: {0:?}")]
    MalformedMessage(String),
    /// A routing-field line is not `dest:next` with a machine destination
    #[error("malformed routing field: {0:?}")]
    MalformedField(String),
    /// An edge-change cell references a link that is not in the graph
    #[error("no link between vertex {row} and vertex {column} to change")]
    UnknownLink {
        /// Data-region row (0-based)
        row: usize,
        /// Data-region column (0-based)
        column: usize,
    },
}

/// Parse a topology adjacency matrix into a network.
///
/// The first row is the header listing the column addresses; every data row
/// is `address,cell,…` in the same order. A cell is `?` (no edge) or a
/// single decimal digit (edge weight); each non-`?` cell inserts one
/// directed edge, so a symmetric matrix yields the symmetric graph. The
/// returned network has not been planned yet.
pub fn load_topology(text: &str, kind: TableKind) -> Result<Network, LoadError> {
    let mut net = Network::new(kind);
    let mut lines = text.lines().filter(|line| !line.trim().is_empty());

    let header = match lines.next() {
        Some(header) => header,
        None => return Ok(net),
    };
    let mut ids: Vec<DeviceId> = Vec::new();
    let mut addresses: Vec<Address> = Vec::new();
    for token in header.split(',').skip(1) {
        let address: Address = token.parse()?;
        let device = match address.kind() {
            DeviceKind::Machine => Device::Machine(Machine::new(address.clone())),
            DeviceKind::Router => Device::Router(Router::new(address.clone(), kind)),
        };
        let id =
            net.add_device(device).map_err(|_| LoadError::DuplicateDevice(address.clone()))?;
        ids.push(id);
        addresses.push(address);
    }

    for (row, line) in lines.enumerate() {
        if row >= ids.len() {
            return Err(LoadError::RowOutOfRange(row));
        }
        let cells: Vec<&str> = line.split(',').collect();
        let label: Address = cells[0].parse()?;
        if label != addresses[row] {
            return Err(LoadError::RowOrder {
                row,
                found: cells[0].trim().to_string(),
                expected: addresses[row].clone(),
            });
        }
        let data = &cells[1..];
        if data.len() != ids.len() {
            return Err(LoadError::RowWidth { row, cells: data.len(), expected: ids.len() });
        }
        for (column, cell) in data.iter().enumerate() {
            if let Some(weight) = parse_cell(cell, row, column)? {
                net.insert_edge(ids[row], ids[column], weight);
            }
        }
    }

    Ok(net)
}

/// Parse a message file: one `id:priority:src:dst:payload` record per line,
/// both endpoints machine addresses. Blank lines are skipped; any malformed
/// line fails the whole load, so nothing is sent.
pub fn parse_messages(text: &str) -> Result<Vec<Message>, LoadError> {
    let mut messages = Vec::new();
    for line in text.lines() {
        let line = line.trim();
        if line.is_empty() {
            continue;
        }
        let malformed = || LoadError::MalformedMessage(line.to_string());
        let fields: Vec<&str> = line.split(':').collect();
        if fields.len() != 5 {
            return Err(malformed());
        }
        let id = fields[0].trim().parse::<i32>().map_err(|_| malformed())?;
        let priority = fields[1].trim().parse::<i32>().map_err(|_| malformed())?;
        let src: Address = fields[2].parse()?;
        let dst: Address = fields[3].parse()?;
        if !src.is_machine() || !dst.is_machine() {
            return Err(malformed());
        }
        messages.push(Message {
            id,
            priority,
            src,
            dst,
            payload: fields[4].to_string(),
            trace: String::new(),
        });
    }
    Ok(messages)
}

/// Parse a routing-field file: one `dest:next` pair per line, `dest` a
/// machine address, `next` any device address. Any malformed line aborts
/// the operation.
pub fn parse_fields(text: &str) -> Result<Vec<RoutingField>, LoadError> {
    let mut fields = Vec::new();
    for line in text.lines() {
        let line = line.trim();
        if line.is_empty() {
            continue;
        }
        let parts: Vec<&str> = line.split(':').collect();
        if parts.len() != 2 {
            return Err(LoadError::MalformedField(line.to_string()));
        }
        let dest: Address = parts[0].parse()?;
        let next: Address = parts[1].parse()?;
        if !dest.is_machine() {
            return Err(LoadError::MalformedField(line.to_string()));
        }
        fields.push(RoutingField { dest, next });
    }
    Ok(fields)
}

/// Diff an adjacency matrix against the current graph.
///
/// Cell positions are authoritative (the header row is skipped); every
/// non-`?` cell must reference an existing edge between in-range vertices.
/// Returns the updates for cells whose weight differs from the graph; on
/// any violation nothing is applied.
pub fn parse_edge_matrix(net: &Network, text: &str) -> Result<Vec<EdgeUpdate>, LoadError> {
    let ids = net.device_ids();
    let mut updates = Vec::new();
    let mut lines = text.lines().filter(|line| !line.trim().is_empty());
    let _header = lines.next();

    for (row, line) in lines.enumerate() {
        if row >= ids.len() {
            return Err(LoadError::RowOutOfRange(row));
        }
        let cells: Vec<&str> = line.split(',').collect();
        let data = &cells[1..];
        if data.len() != ids.len() {
            return Err(LoadError::RowWidth { row, cells: data.len(), expected: ids.len() });
        }
        for (column, cell) in data.iter().enumerate() {
            let weight = match parse_cell(cell, row, column)? {
                Some(weight) => weight,
                None => continue,
            };
            match net.edge_weight(ids[row], ids[column]) {
                None => return Err(LoadError::UnknownLink { row, column }),
                Some(current) if (current - weight).abs() > WEIGHT_TOLERANCE => {
                    updates.push(EdgeUpdate { a: ids[row], b: ids[column], weight });
                }
                Some(_) => {}
            }
        }
    }
    Ok(updates)
}

/// A cell is `?` (no edge) or a single decimal digit `0`–`9`.
fn parse_cell(cell: &str, row: usize, column: usize) -> Result<Option<LinkWeight>, LoadError> {
    let cell = cell.trim();
    if cell == "?" {
        return Ok(None);
    }
    let mut chars = cell.chars();
    match (chars.next(), chars.next()) {
        (Some(digit), None) if digit.is_ascii_digit() => {
            Ok(Some(LinkWeight::from(digit as u8 - b'0')))
        }
        _ => Err(LoadError::InvalidCell { cell: cell.to_string(), row, column }),
    }
}
