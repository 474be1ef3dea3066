use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Supported blockchain networks.
///
/// A closed set: every variant maps to exactly one address shape pattern in
/// `chainletter-extract`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChainId {
    Bitcoin,
    Ethereum,
    Tron,
    Solana,
    Cosmos,
    Polkadot,
    Cardano,
    Ripple,
    Litecoin,
    Dogecoin,
}

impl ChainId {
    /// All chains, in the order they appear in the letter form's selector.
    pub const ALL: [ChainId; 10] = [
        ChainId::Bitcoin,
        ChainId::Ethereum,
        ChainId::Tron,
        ChainId::Solana,
        ChainId::Cosmos,
        ChainId::Polkadot,
        ChainId::Cardano,
        ChainId::Ripple,
        ChainId::Litecoin,
        ChainId::Dogecoin,
    ];

    /// Capitalized display label ("Bitcoin", "Ethereum", ...), used when the
    /// letter groups addresses under a chain heading.
    pub fn label(&self) -> &'static str {
        match self {
            ChainId::Bitcoin => "Bitcoin",
            ChainId::Ethereum => "Ethereum",
            ChainId::Tron => "Tron",
            ChainId::Solana => "Solana",
            ChainId::Cosmos => "Cosmos",
            ChainId::Polkadot => "Polkadot",
            ChainId::Cardano => "Cardano",
            ChainId::Ripple => "Ripple",
            ChainId::Litecoin => "Litecoin",
            ChainId::Dogecoin => "Dogecoin",
        }
    }
}

impl std::fmt::Display for ChainId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ChainId::Bitcoin => write!(f, "bitcoin"),
            ChainId::Ethereum => write!(f, "ethereum"),
            ChainId::Tron => write!(f, "tron"),
            ChainId::Solana => write!(f, "solana"),
            ChainId::Cosmos => write!(f, "cosmos"),
            ChainId::Polkadot => write!(f, "polkadot"),
            ChainId::Cardano => write!(f, "cardano"),
            ChainId::Ripple => write!(f, "ripple"),
            ChainId::Litecoin => write!(f, "litecoin"),
            ChainId::Dogecoin => write!(f, "dogecoin"),
        }
    }
}

/// A single suspect address tagged with the chain it was collected under.
///
/// Equality for deduplication is by `address` string alone; the same literal
/// under two different chain labels counts as a duplicate.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AddressEntry {
    pub address: String,
    pub blockchain: ChainId,
}

/// An exchange contact record in the address book.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Exchange {
    pub id: Uuid,
    pub name: String,
    pub emails: Vec<String>,
    /// Whether the exchange is pre-selected as a recipient on the letter form.
    pub selected: bool,
}

/// Lifecycle status of a compiled notification.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ReportStatus {
    Pending,
    Sent,
    Completed,
}

impl std::fmt::Display for ReportStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ReportStatus::Pending => write!(f, "pending"),
            ReportStatus::Sent => write!(f, "sent"),
            ReportStatus::Completed => write!(f, "completed"),
        }
    }
}

/// A historical record of one compiled notification letter.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Report {
    pub id: Uuid,
    pub addresses: Vec<AddressEntry>,
    /// Recipient exchange ids at the time the letter was compiled.
    pub exchanges: Vec<Uuid>,
    pub status: ReportStatus,
    pub created_at: DateTime<Utc>,
}

/// A point of contact printed on the letter.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PointOfContact {
    pub id: Uuid,
    pub name: String,
    pub title: String,
    pub phone: String,
    pub email: String,
    pub office: String,
}

/// A reusable "nature of activity" line.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ActivityNature {
    pub id: Uuid,
    pub label: String,
}

/// A signing official for the letter's signature line.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SignatureBlock {
    pub id: Uuid,
    pub title: String,
    pub name: String,
}

/// Templated letter defaults maintained on the settings page.
///
/// Persisted as a whole in `settings.json`; the `default_*` fields reference
/// entries of the lists above by id.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Settings {
    #[serde(default)]
    pub points_of_contact: Vec<PointOfContact>,
    #[serde(default)]
    pub activities: Vec<ActivityNature>,
    #[serde(default)]
    pub signature_blocks: Vec<SignatureBlock>,
    #[serde(default)]
    pub default_contact: Option<Uuid>,
    #[serde(default)]
    pub default_activity: Option<Uuid>,
    #[serde(default)]
    pub default_signature: Option<Uuid>,
    #[serde(default)]
    pub default_letter_body: String,
}
