use std::collections::HashMap;

use crate::config::{DEFAULT_FEED_FETCH_LIMIT, DEFAULT_FEED_PREVIEW_LEN};
use crate::format::{format_timestamp, to_fixed};
use crate::lifecycle::{settle, LoadState};
use crate::models::feed::{FeedItem, FeedKind, LocalPatch, Priority};
use crate::models::trade::{TradeSide, TransactionRow};
use crate::providers::traits::DataSource;

pub const LOADING_MESSAGE: &str = "Loading transactions...";
pub const EMPTY_MESSAGE: &str = "No recent transactions";
pub const SHOW_LESS_LABEL: &str = "Show Less";

/// Turn a raw transaction into a feed entry.
///
/// `{BTC, BUY, 1.5, 42000.125, 1.25}` becomes title `"BTC BUY"` and message
/// `"Qty: 1.500 | Price: $42000.125 | Fee: $1.250"`, tagged `info`.
pub fn map_feed_item(row: TransactionRow) -> FeedItem {
    FeedItem {
        title: format!("{} {}", row.symbol, row.side),
        message: format!(
            "Qty: {} | Price: ${} | Fee: ${}",
            to_fixed(row.quantity, 3),
            to_fixed(row.price, 3),
            to_fixed(row.transaction_fee, 3),
        ),
        kind: match row.side {
            TradeSide::Buy => FeedKind::Info,
            TradeSide::Sell => FeedKind::Success,
        },
        timestamp: row.time,
        id: row.id,
        read: false,
        priority: Priority::Medium,
    }
}

/// The recent-transactions panel.
///
/// Read and delete actions are kept in an overlay keyed by item id and
/// applied whenever items are read out. The fetched list itself is never
/// modified and nothing is sent back to the data source.
#[derive(Debug, Clone, PartialEq)]
pub struct TransactionFeed {
    state: LoadState<Vec<FeedItem>>,
    overlay: HashMap<String, LocalPatch>,
    show_all: bool,
    preview_len: usize,
}

impl Default for TransactionFeed {
    fn default() -> Self {
        Self::new(LoadState::Loading, DEFAULT_FEED_PREVIEW_LEN)
    }
}

impl TransactionFeed {
    pub fn new(state: LoadState<Vec<FeedItem>>, preview_len: usize) -> Self {
        Self {
            state,
            overlay: HashMap::new(),
            show_all: false,
            preview_len,
        }
    }

    #[must_use]
    pub fn state(&self) -> &LoadState<Vec<FeedItem>> {
        &self.state
    }

    #[must_use]
    pub fn is_loading(&self) -> bool {
        self.state.is_loading()
    }

    /// Items exactly as fetched, ignoring local changes.
    #[must_use]
    pub fn fetched(&self) -> &[FeedItem] {
        self.state.ready().map(Vec::as_slice).unwrap_or(&[])
    }

    /// Local changes recorded for `id`, if any.
    #[must_use]
    pub fn patch(&self, id: &str) -> Option<LocalPatch> {
        self.overlay.get(id).copied()
    }

    fn is_deleted(&self, id: &str) -> bool {
        self.overlay.get(id).is_some_and(|p| p.deleted)
    }

    fn contains(&self, id: &str) -> bool {
        !self.is_deleted(id) && self.fetched().iter().any(|item| item.id == id)
    }

    /// All items that survive local deletes, with read flags applied,
    /// in fetched order.
    #[must_use]
    pub fn items(&self) -> Vec<FeedItem> {
        self.fetched()
            .iter()
            .filter_map(|item| match self.overlay.get(&item.id) {
                Some(patch) if patch.deleted => None,
                Some(patch) => Some(FeedItem {
                    read: item.read || patch.read,
                    ..item.clone()
                }),
                None => Some(item.clone()),
            })
            .collect()
    }

    /// Items currently on screen: the first few, or all of them once
    /// "Show All" is on.
    #[must_use]
    pub fn visible_items(&self) -> Vec<FeedItem> {
        let mut items = self.items();
        if !self.show_all {
            items.truncate(self.preview_len);
        }
        items
    }

    /// Number of items left after local deletes.
    #[must_use]
    pub fn len(&self) -> usize {
        self.fetched().iter().filter(|item| !self.is_deleted(&item.id)).count()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Flag one item as read. Returns `false` for unknown or deleted ids.
    pub fn mark_as_read(&mut self, id: &str) -> bool {
        if !self.contains(id) {
            return false;
        }
        self.overlay.entry(id.to_string()).or_default().read = true;
        true
    }

    /// Hide one item from this view. Returns `false` for unknown or
    /// already deleted ids.
    pub fn delete(&mut self, id: &str) -> bool {
        if !self.contains(id) {
            return false;
        }
        self.overlay.entry(id.to_string()).or_default().deleted = true;
        true
    }

    #[must_use]
    pub fn is_showing_all(&self) -> bool {
        self.show_all
    }

    pub fn toggle_show_all(&mut self) {
        self.show_all = !self.show_all;
    }

    /// Whether the show-all toggle should be offered at all.
    #[must_use]
    pub fn has_more(&self) -> bool {
        self.len() > self.preview_len
    }

    /// Caption of the show-all toggle: `"Show All (6)"` / `"Show Less"`.
    #[must_use]
    pub fn toggle_label(&self) -> Option<String> {
        if !self.has_more() {
            return None;
        }
        Some(if self.show_all {
            SHOW_LESS_LABEL.to_string()
        } else {
            format!("Show All ({})", self.len())
        })
    }

    /// Placeholder text replacing the list, if one applies.
    #[must_use]
    pub fn status_message(&self) -> Option<&'static str> {
        if self.is_loading() {
            Some(LOADING_MESSAGE)
        } else if self.is_empty() {
            Some(EMPTY_MESSAGE)
        } else {
            None
        }
    }

    /// Item time as `YYYY-MM-DD HH:MM:SS`, local.
    #[must_use]
    pub fn display_time(item: &FeedItem) -> String {
        format_timestamp(&item.timestamp)
    }
}

/// Loads the recent-transactions feed.
pub struct FeedService {
    limit: usize,
    preview_len: usize,
}

impl FeedService {
    pub fn new(limit: usize, preview_len: usize) -> Self {
        Self { limit, preview_len }
    }

    pub async fn load(&self, source: &dyn DataSource) -> TransactionFeed {
        let result = source.fetch_transactions(self.limit).await.map(|rows| {
            tracing::debug!(rows = rows.len(), "recent transactions loaded");
            rows.into_iter().map(map_feed_item).collect()
        });
        TransactionFeed::new(settle("recent transactions", result), self.preview_len)
    }
}

impl Default for FeedService {
    fn default() -> Self {
        Self::new(DEFAULT_FEED_FETCH_LIMIT, DEFAULT_FEED_PREVIEW_LEN)
    }
}
