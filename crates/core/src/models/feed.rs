use serde::{Deserialize, Serialize};

/// Colour tag of a feed entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FeedKind {
    Info,
    Warning,
    Success,
    Error,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Priority {
    Low,
    #[default]
    Medium,
    High,
}

/// One entry of the recent-transactions feed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FeedItem {
    pub id: String,

    /// `"{symbol} {type}"`, e.g. "BTC BUY"
    pub title: String,

    /// Quantity, price and fee, each to three decimals
    pub message: String,

    /// Raw timestamp of the underlying transaction
    pub timestamp: String,

    pub kind: FeedKind,

    /// Local-only flag; never written back to the data source
    pub read: bool,

    pub priority: Priority,
}

/// View-local changes to one feed item.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct LocalPatch {
    pub read: bool,
    pub deleted: bool,
}
