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

//! Module containing the crate-level error type.

use crate::net::loader::LoadError;
use crate::net::types::{AddressError, NetError};
use thiserror::Error;

/// Main error type.
#[derive(Debug, Error)]
pub enum Error {
    /// Error propagated from the network model or a mutation command
    #[error("network error: {0}")]
    Net(#[from] NetError),
    /// Error propagated from one of the file loaders
    #[error("load error: {0}")]
    Load(#[from] LoadError),
    /// An address failed to parse
    #[error(transparent)]
    Address(#[from] AddressError),
    /// Input/output failure
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}
