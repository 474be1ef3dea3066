//! Bulk address extraction from free-form pasted text.

use std::collections::HashSet;

use chainletter_common::types::{AddressEntry, ChainId};

use crate::patterns::pattern_for;

/// Extract every address-shaped literal of `chain` from `text`.
///
/// Matches are collected in first-occurrence order, deduplicated against each
/// other, and filtered against `existing` (the caller's current collection, by
/// exact address-string equality). The survivors come back tagged with
/// `chain`.
///
/// Pure and total: empty or non-matching input yields an empty result, never
/// an error. Feeding the output back through `existing` makes a second call
/// with the same text return nothing.
pub fn extract_addresses(
    text: &str,
    chain: ChainId,
    existing: &HashSet<String>,
) -> Vec<AddressEntry> {
    let pattern = pattern_for(chain);

    let mut seen: HashSet<&str> = HashSet::new();
    let mut entries = Vec::new();

    for m in pattern.find_iter(text) {
        let literal = m.as_str();
        if !seen.insert(literal) {
            continue;
        }
        if existing.contains(literal) {
            continue;
        }
        entries.push(AddressEntry {
            address: literal.to_string(),
            blockchain: chain,
        });
    }

    tracing::debug!(
        chain = %chain,
        matched = entries.len(),
        "Bulk address extraction"
    );

    entries
}
