//! The ordered, duplicate-free address list behind one letter session.

use std::collections::HashSet;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use chainletter_common::types::{AddressEntry, ChainId};

/// Errors from collection operations.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum CollectionError {
    #[error("index {index} out of range for collection of {len} entries")]
    OutOfRange { index: usize, len: usize },
}

/// Addresses of one chain, labeled for display.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChainGroup {
    pub label: String,
    pub addresses: Vec<String>,
}

/// The authoritative ordered list of (address, chain) pairs accumulated for
/// the current letter.
///
/// Invariant: no two entries share the same address string, regardless of the
/// chain they were declared under. First insertion wins.
#[derive(Debug, Clone, Default)]
pub struct AddressCollection {
    entries: Vec<AddressEntry>,
}

impl AddressCollection {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn entries(&self) -> &[AddressEntry] {
        &self.entries
    }

    /// The address-string set of the collection, used as the `existing` input
    /// to bulk extraction.
    pub fn address_set(&self) -> HashSet<String> {
        self.entries.iter().map(|e| e.address.clone()).collect()
    }

    /// Append a single address. Whitespace is trimmed; an empty or duplicate
    /// address is a no-op. Returns whether an entry was appended.
    pub fn add_single(&mut self, address: &str, chain: ChainId) -> bool {
        let trimmed = address.trim();
        if trimmed.is_empty() {
            return false;
        }
        if self.entries.iter().any(|e| e.address == trimmed) {
            return false;
        }
        self.entries.push(AddressEntry {
            address: trimmed.to_string(),
            blockchain: chain,
        });
        true
    }

    /// Remove the entry at `index`, returning it.
    pub fn remove_at(&mut self, index: usize) -> Result<AddressEntry, CollectionError> {
        if index >= self.entries.len() {
            return Err(CollectionError::OutOfRange {
                index,
                len: self.entries.len(),
            });
        }
        Ok(self.entries.remove(index))
    }

    /// Append pre-deduplicated entries in order.
    ///
    /// The caller is responsible for having filtered duplicates against this
    /// collection (bulk extraction does so via [`Self::address_set`]); no
    /// re-check happens here.
    pub fn merge_bulk(&mut self, entries: Vec<AddressEntry>) {
        self.entries.extend(entries);
    }

    /// Clear the collection back to empty.
    pub fn reset(&mut self) {
        self.entries.clear();
    }

    /// Group addresses by chain for the letter's address section.
    ///
    /// Groups appear in the order their chain was first introduced into the
    /// collection; addresses keep insertion order within each group.
    pub fn group_by_chain(&self) -> Vec<ChainGroup> {
        let mut order: Vec<ChainId> = Vec::new();
        let mut grouped: Vec<Vec<String>> = Vec::new();

        for entry in &self.entries {
            match order.iter().position(|c| *c == entry.blockchain) {
                Some(i) => grouped[i].push(entry.address.clone()),
                None => {
                    order.push(entry.blockchain);
                    grouped.push(vec![entry.address.clone()]);
                }
            }
        }

        order
            .into_iter()
            .zip(grouped)
            .map(|(chain, addresses)| ChainGroup {
                label: chain.label().to_string(),
                addresses,
            })
            .collect()
    }
}
