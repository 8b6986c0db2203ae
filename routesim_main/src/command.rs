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

//! Tokenized grammar for the interactive shell.
//!
//! Keywords and addresses are case-insensitive; file names keep their case
//! and must end in `.txt` or `.csv`.

use routesim::net::{Address, LinkWeight, PathFilter, RtAction};

/// A parsed operator command.
#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    /// `exit` — quit when no simulation is running
    Exit,
    /// `send msg <file>` — stage a message file and start the worker
    SendMsg(String),
    /// `change rt <router> add|remove <file>` — mutate one routing table
    ChangeRt(Address, RtAction, String),
    /// `print path <src>|* to <dst>|*` — filter the path log
    PrintPath(PathFilter, PathFilter),
    /// `change edge <A>, <B>, <w>` — one symmetric weight change
    ChangeEdgeWeight(Address, Address, LinkWeight),
    /// `change edge <file>` — bulk weight change from a matrix
    ChangeEdgeFile(String),
}

/// Parse one operator line. Returns `None` for anything outside the
/// grammar.
pub fn parse(input: &str) -> Option<Command> {
    let tokens: Vec<&str> = input.split_whitespace().collect();
    let lowered: Vec<String> = tokens.iter().map(|token| token.to_ascii_lowercase()).collect();
    let keys: Vec<&str> = lowered.iter().map(String::as_str).collect();

    match keys.as_slice() {
        ["exit"] => Some(Command::Exit),
        ["send", "msg", _] if is_file_name(tokens[2]) => {
            Some(Command::SendMsg(tokens[2].to_string()))
        }
        ["change", "rt", router, action, _] if is_file_name(tokens[4]) => {
            let router: Address = router.parse().ok()?;
            if !router.is_router() {
                return None;
            }
            let action = match *action {
                "add" => RtAction::Add,
                "remove" => RtAction::Remove,
                _ => return None,
            };
            Some(Command::ChangeRt(router, action, tokens[4].to_string()))
        }
        ["print", "path", src, "to", dst] => {
            Some(Command::PrintPath(parse_filter(src)?, parse_filter(dst)?))
        }
        ["change", "edge", a, b, weight] => {
            // `change edge R1, R2, 5`: the first two operands carry commas
            let a: Address = a.strip_suffix(',')?.parse().ok()?;
            let b: Address = b.strip_suffix(',')?.parse().ok()?;
            if a.is_machine() && b.is_machine() {
                return None;
            }
            let weight: LinkWeight = weight.parse().ok()?;
            if !weight.is_finite() || weight < 0.0 {
                return None;
            }
            Some(Command::ChangeEdgeWeight(a, b, weight))
        }
        ["change", "edge", _] if is_file_name(tokens[2]) => {
            Some(Command::ChangeEdgeFile(tokens[2].to_string()))
        }
        _ => None,
    }
}

fn parse_filter(token: &str) -> Option<PathFilter> {
    if token == "*" {
        return Some(PathFilter::Any);
    }
    let address: Address = token.parse().ok()?;
    if address.is_machine() {
        Some(PathFilter::Addr(address))
    } else {
        None
    }
}

fn is_file_name(token: &str) -> bool {
    let lowered = token.to_ascii_lowercase();
    token.len() >= 5 && (lowered.ends_with(".txt") || lowered.ends_with(".csv"))
}

#[cfg(test)]
mod test {
    use super::*;

    fn addr(s: &str) -> Address {
        s.parse().unwrap()
    }

    #[test]
    fn test_send_msg() {
        assert_eq!(
            parse("send msg Messages.txt"),
            Some(Command::SendMsg("Messages.txt".to_string()))
        );
        assert_eq!(parse("SEND MSG data.csv"), Some(Command::SendMsg("data.csv".to_string())));
        assert_eq!(parse("send msg notafile"), None);
        assert_eq!(parse("send msg"), None);
    }

    #[test]
    fn test_change_rt() {
        assert_eq!(
            parse("change rt r1 add RT1.csv"),
            Some(Command::ChangeRt(addr("R1"), RtAction::Add, "RT1.csv".to_string()))
        );
        assert_eq!(
            parse("Change RT R2 REMOVE fields.txt"),
            Some(Command::ChangeRt(addr("R2"), RtAction::Remove, "fields.txt".to_string()))
        );
        // machines have no routing tables
        assert_eq!(parse("change rt m1 add RT1.csv"), None);
        assert_eq!(parse("change rt r1 drop RT1.csv"), None);
    }

    #[test]
    fn test_print_path() {
        assert_eq!(
            parse("print path m1 to *"),
            Some(Command::PrintPath(PathFilter::Addr(addr("M1")), PathFilter::Any))
        );
        assert_eq!(
            parse("print path * to M3"),
            Some(Command::PrintPath(PathFilter::Any, PathFilter::Addr(addr("M3"))))
        );
        // only machines originate and terminate messages
        assert_eq!(parse("print path r1 to *"), None);
        assert_eq!(parse("print path m1 m2"), None);
    }

    #[test]
    fn test_change_edge_weight() {
        assert_eq!(
            parse("change edge R1, R2, 5"),
            Some(Command::ChangeEdgeWeight(addr("R1"), addr("R2"), 5.0))
        );
        assert_eq!(
            parse("change edge m1, r1, 2"),
            Some(Command::ChangeEdgeWeight(addr("M1"), addr("R1"), 2.0))
        );
        // commas are part of the grammar
        assert_eq!(parse("change edge R1 R2 5"), None);
        // machine-machine links do not exist
        assert_eq!(parse("change edge m1, m2, 5"), None);
        assert_eq!(parse("change edge R1, R2, -1"), None);
    }

    #[test]
    fn test_change_edge_file() {
        assert_eq!(
            parse("change edge Network2.csv"),
            Some(Command::ChangeEdgeFile("Network2.csv".to_string()))
        );
        assert_eq!(parse("change edge network"), None);
    }

    #[test]
    fn test_exit_and_noise() {
        assert_eq!(parse("exit"), Some(Command::Exit));
        assert_eq!(parse("EXIT"), Some(Command::Exit));
        assert_eq!(parse(""), None);
        assert_eq!(parse("make me a sandwich"), None);
    }
}
