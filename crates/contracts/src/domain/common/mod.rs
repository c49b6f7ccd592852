//! Common types shared by all partner collections

pub mod collection;
pub mod money;

// Re-exports
pub use collection::{CollectionDocument, CollectionName, COLLECTION_DOCUMENT_KEY};
pub use money::{format_tenge, parse_tenge, strip_currency, CURRENCY_SUFFIX};
