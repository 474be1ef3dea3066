pub mod collection;
pub mod extractor;
pub mod patterns;

pub use collection::{AddressCollection, ChainGroup, CollectionError};
pub use extractor::extract_addresses;
pub use patterns::pattern_for;
