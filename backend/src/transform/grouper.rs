//! Group product rows into item groups by base SKU.
//!
//! # Architecture
//!
//! ```text
//! Parsed rows (input order)        →  Groups (first-seen order)
//! ┌──────────────────────────┐       ┌──────────────────────────┐
//! │ GRIP     Grip Sock       │       │ GRIP                     │
//! │ GRIP-S   Grip Sock Small │  →    │   main:     GRIP         │
//! │ TEE      Tee             │       │   variants: GRIP-S,      │
//! │ GRIP-M   Grip Sock Medium│       │             GRIP-M       │
//! └──────────────────────────┘       ├──────────────────────────┤
//!                                    │ TEE                      │
//!                                    │   main:     TEE          │
//!                                    └──────────────────────────┘
//! ```
//!
//! The first row seen for a base SKU becomes the group's main item. Groups
//! keep first-seen order and rows keep input order inside each group.

use std::collections::HashMap;

use crate::models::{Group, InputRow};

/// Partition rows by base SKU, preserving first-seen order.
pub fn group_by_base_sku(rows: Vec<InputRow>) -> Vec<Group> {
    let mut groups: Vec<Group> = Vec::new();
    let mut index: HashMap<String, usize> = HashMap::new();

    for row in rows {
        match index.get(row.base_sku()).copied() {
            Some(i) => groups[i].push(row),
            None => {
                index.insert(row.base_sku().to_string(), groups.len());
                groups.push(Group::new(row));
            }
        }
    }

    groups
}
