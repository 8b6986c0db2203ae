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

use crate::collections::SplayMap;

#[test]
fn test_insert_and_search() {
    let mut map: SplayMap<i32, &str> = SplayMap::new();
    assert!(map.is_empty());
    assert!(map.insert(3, "three"));
    assert!(map.insert(1, "one"));
    assert!(map.insert(2, "two"));
    assert_eq!(map.len(), 3);

    assert_eq!(map.search(&3).map(|v| *v), Some("three"));
    assert_eq!(map.search(&1).map(|v| *v), Some("one"));
    assert_eq!(map.search(&9).map(|v| *v), None);

    // a duplicate key is refused and does not overwrite the stored value
    assert!(!map.insert(3, "replacement"));
    assert_eq!(map.len(), 3);
    assert_eq!(map.search(&3).map(|v| *v), Some("three"));
}

#[test]
fn test_update_through_search() {
    let mut map = SplayMap::new();
    assert!(map.insert("dest", "old"));
    if let Some(value) = map.search(&"dest") {
        *value = "new";
    }
    assert_eq!(map.search(&"dest").map(|v| *v), Some("new"));
}

#[test]
fn test_in_order_after_mixed_operations() {
    let mut map = SplayMap::new();
    for key in [5, 1, 9, 3, 7, 2, 8, 4, 6, 0] {
        assert!(map.insert(key, key * 10));
    }
    assert!(map.remove(&3));
    assert!(map.remove(&7));
    assert!(!map.remove(&7));
    assert!(map.insert(3, 300));
    assert!(map.search(&9).is_some());
    assert!(map.search(&4).is_some());
    assert!(map.search(&100).is_none());

    let keys: Vec<i32> = map.iter().map(|(key, _)| *key).collect();
    assert_eq!(keys, vec![0, 1, 2, 3, 4, 5, 6, 8, 9]);
    let values: Vec<i32> = map.iter().map(|(_, value)| *value).collect();
    assert_eq!(values, vec![0, 10, 20, 300, 40, 50, 60, 80, 90]);
}

#[test]
fn test_insert_delete_round_trip() {
    let mut map = SplayMap::new();
    let keys = [4, 8, 15, 16, 23, 42];
    for (position, key) in keys.iter().enumerate() {
        assert!(map.insert(*key, position));
    }
    // delete the same keys in a different permutation
    for key in [16, 4, 42, 8, 23, 15] {
        assert!(map.remove(&key));
    }
    assert!(map.is_empty());
    assert_eq!(map.len(), 0);
    assert_eq!(map.iter().count(), 0);
}

#[test]
fn test_remove_miss_leaves_map_intact() {
    let mut map = SplayMap::new();
    assert!(map.insert(10, ()));
    assert!(map.insert(20, ()));
    assert!(!map.remove(&15));
    assert_eq!(map.len(), 2);
    assert_eq!(map.iter().map(|(key, _)| *key).collect::<Vec<_>>(), vec![10, 20]);
}

#[test]
fn test_clone_is_deep() {
    let mut original = SplayMap::new();
    assert!(original.insert(1, "one"));
    assert!(original.insert(2, "two"));

    let mut copy = original.clone();
    assert!(copy.remove(&1));
    if let Some(value) = copy.search(&2) {
        *value = "changed";
    }

    assert_eq!(original.len(), 2);
    assert_eq!(original.search(&1).map(|v| *v), Some("one"));
    assert_eq!(original.search(&2).map(|v| *v), Some("two"));
    assert_eq!(copy.len(), 1);
}

#[test]
fn test_clear() {
    let mut map = SplayMap::new();
    for key in 0..32 {
        assert!(map.insert(key, key));
    }
    map.clear();
    assert!(map.is_empty());
    assert!(map.search(&7).is_none());
    assert!(map.insert(7, 7));
}
