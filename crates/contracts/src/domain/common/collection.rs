use serde::{Deserialize, Serialize};
use std::fmt;

/// Ключ документа, под которым коллекция перезаписывается целиком
pub const COLLECTION_DOCUMENT_KEY: &str = "data";

/// Логические коллекции партнёра
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum CollectionName {
    #[serde(rename = "referrals")]
    Referrals,
    #[serde(rename = "referralStats")]
    ReferralStats,
    #[serde(rename = "financeStats")]
    FinanceStats,
    #[serde(rename = "promoCodes")]
    PromoCodes,
    #[serde(rename = "activityData")]
    ActivityData,
}

impl CollectionName {
    pub const ALL: [CollectionName; 5] = [
        CollectionName::Referrals,
        CollectionName::ReferralStats,
        CollectionName::FinanceStats,
        CollectionName::PromoCodes,
        CollectionName::ActivityData,
    ];

    /// Storage key used in URLs and in the document table
    pub fn key(&self) -> &'static str {
        match self {
            CollectionName::Referrals => "referrals",
            CollectionName::ReferralStats => "referralStats",
            CollectionName::FinanceStats => "financeStats",
            CollectionName::PromoCodes => "promoCodes",
            CollectionName::ActivityData => "activityData",
        }
    }

    pub fn from_key(key: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|c| c.key() == key)
    }
}

impl fmt::Display for CollectionName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

/// Документ хранилища: `{ "items": [...] }`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CollectionDocument<T> {
    pub items: Vec<T>,
}

impl<T> CollectionDocument<T> {
    pub fn new(items: Vec<T>) -> Self {
        Self { items }
    }
}
