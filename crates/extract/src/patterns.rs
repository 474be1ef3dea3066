//! Per-chain address shape patterns.
//!
//! These are intentionally permissive shape matchers, not checksum validators:
//! they recognize syntactically-plausible address literals inside arbitrary
//! pasted text. Matches are unanchored, so a pattern can fire inside a longer
//! unrelated token; that looseness is part of the tool's contract.

use once_cell::sync::Lazy;
use regex::Regex;

use chainletter_common::types::ChainId;

static BITCOIN: Lazy<Regex> = Lazy::new(|| Regex::new(r"(bc1|[13])[a-zA-HJ-NP-Z0-9]{25,39}").unwrap());
static ETHEREUM: Lazy<Regex> = Lazy::new(|| Regex::new(r"0x[a-fA-F0-9]{40}").unwrap());
static TRON: Lazy<Regex> = Lazy::new(|| Regex::new(r"T[a-zA-Z0-9]{33}").unwrap());
static SOLANA: Lazy<Regex> = Lazy::new(|| Regex::new(r"[1-9A-HJ-NP-Za-km-z]{32,44}").unwrap());
static COSMOS: Lazy<Regex> = Lazy::new(|| Regex::new(r"cosmos[a-zA-Z0-9]{39}").unwrap());
static POLKADOT: Lazy<Regex> = Lazy::new(|| Regex::new(r"1[a-zA-Z0-9]{47}").unwrap());
static CARDANO: Lazy<Regex> = Lazy::new(|| Regex::new(r"addr1[a-zA-Z0-9]{98}").unwrap());
static RIPPLE: Lazy<Regex> = Lazy::new(|| Regex::new(r"r[a-zA-Z0-9]{24,34}").unwrap());
static LITECOIN: Lazy<Regex> = Lazy::new(|| Regex::new(r"[LM3][a-km-zA-HJ-NP-Z1-9]{26,33}").unwrap());
static DOGECOIN: Lazy<Regex> = Lazy::new(|| Regex::new(r"D[5-9A-HJ-NP-U][1-9A-HJ-NP-Za-km-z]{32}").unwrap());

/// Return the shape pattern for a chain.
///
/// Total over the closed `ChainId` set; lookup cannot fail.
pub fn pattern_for(chain: ChainId) -> &'static Regex {
    match chain {
        ChainId::Bitcoin => &BITCOIN,
        ChainId::Ethereum => &ETHEREUM,
        ChainId::Tron => &TRON,
        ChainId::Solana => &SOLANA,
        ChainId::Cosmos => &COSMOS,
        ChainId::Polkadot => &POLKADOT,
        ChainId::Cardano => &CARDANO,
        ChainId::Ripple => &RIPPLE,
        ChainId::Litecoin => &LITECOIN,
        ChainId::Dogecoin => &DOGECOIN,
    }
}
