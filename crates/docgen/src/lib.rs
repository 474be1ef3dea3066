//! Document assembly — turns a compiled letter into a downloadable artifact.
//!
//! Three renderers share one input model: a programmatic Word letter
//! (`docx`), a painted PDF (`pdf`), and placeholder substitution into an
//! uploaded Word template (`template`).

pub mod docx;
pub mod pdf;
pub mod template;

use chrono::Utc;
use serde::{Deserialize, Serialize};

use chainletter_common::types::{PointOfContact, SignatureBlock};
use chainletter_extract::ChainGroup;

/// One letter recipient: an exchange name plus its contact inboxes.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Recipient {
    pub name: String,
    pub emails: Vec<String>,
}

/// Everything the renderers need to lay out one awareness letter.
#[derive(Debug, Clone)]
pub struct LetterData {
    /// Agency heading, first line (command name).
    pub agency_header: String,
    /// Agency heading, second line (unit name).
    pub agency_unit: String,
    /// Right-aligned date line, e.g. "Rome, 05 September 2026".
    pub date_line: String,
    pub recipients: Vec<Recipient>,
    /// Free-text body of the letter.
    pub body: String,
    /// Suspect addresses grouped by chain, in chain-introduction order.
    pub address_groups: Vec<ChainGroup>,
    pub contact: Option<PointOfContact>,
    pub activity: Option<String>,
    pub signature: Option<SignatureBlock>,
}

/// Title printed under the agency heading on every letter.
pub const LETTER_TITLE: &str = "CRYPTO ADDRESS NOTIFICATION";

/// Build the letter's date line from the configured city and today's date.
pub fn date_line(city: &str) -> String {
    format!("{}, {}", city, Utc::now().format("%d %B %Y"))
}
