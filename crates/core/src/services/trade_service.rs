use std::cmp::Ordering;

use chrono::{Local, TimeZone};
use icu_collator::{Collator, CollatorOptions, Strength};

use crate::config::DEFAULT_TRADE_FETCH_LIMIT;
use crate::format::{format_timestamp_in, to_fixed};
use crate::lifecycle::{settle, LoadState};
use crate::models::trade::{
    SortColumn, SortDirection, SortState, SortValue, TradeRecord, TransactionRow,
};
use crate::providers::traits::DataSource;

/// Map a raw transaction into a table record, rendering its time in `tz`.
pub fn map_transaction_in<Tz>(row: TransactionRow, tz: &Tz) -> TradeRecord
where
    Tz: TimeZone,
    Tz::Offset: std::fmt::Display,
{
    TradeRecord {
        time: format_timestamp_in(&row.time, tz),
        id: row.id,
        symbol: row.symbol,
        side: row.side,
        quantity: row.quantity,
        price: row.price,
        transaction_fee: row.transaction_fee,
    }
}

/// Map a raw transaction into a table record in local time.
pub fn map_transaction(row: TransactionRow) -> TradeRecord {
    map_transaction_in(row, &Local)
}

thread_local! {
    // Root-locale UCA at tertiary strength: the ordering a browser's
    // default `localeCompare` produces.
    static COLLATOR: Option<Collator> = {
        let mut options = CollatorOptions::new();
        options.strength = Some(Strength::Tertiary);
        Collator::try_new(&Default::default(), options)
            .map_err(|e| tracing::warn!(error = %e, "root collator unavailable, using case-folded ordering"))
            .ok()
    };
}

/// Locale-aware string ordering.
///
/// Symbols sort before digits and digits before letters; accents and case
/// only break ties, lowercase first (`"a" < "A" < "á" < "b"`).
#[must_use]
pub fn locale_compare(a: &str, b: &str) -> Ordering {
    COLLATOR.with(|collator| match collator {
        Some(collator) => collator.compare(a, b),
        None => case_folded_compare(a, b),
    })
}

fn case_folded_compare(a: &str, b: &str) -> Ordering {
    let folded_a = a.chars().flat_map(char::to_lowercase);
    let folded_b = b.chars().flat_map(char::to_lowercase);
    folded_a.cmp(folded_b).then_with(|| b.cmp(a))
}

/// Ascending comparison of two cell values.
///
/// Text compares with [`locale_compare`], numbers numerically. Any other
/// pairing compares equal and leaves the rows where they are.
#[must_use]
pub fn compare_values(a: SortValue<'_>, b: SortValue<'_>) -> Ordering {
    match (a, b) {
        (SortValue::Text(a), SortValue::Text(b)) => locale_compare(a, b),
        (SortValue::Number(a), SortValue::Number(b)) => {
            a.partial_cmp(&b).unwrap_or(Ordering::Equal)
        }
        _ => Ordering::Equal,
    }
}

/// Order `records` by `sort` without touching the input.
///
/// The sort is stable; ties keep their fetched order in both directions.
pub fn sort_trades(records: &[TradeRecord], sort: SortState) -> Vec<&TradeRecord> {
    let mut sorted: Vec<&TradeRecord> = records.iter().collect();
    sorted.sort_by(|a, b| {
        let ord = compare_values(a.sort_value(sort.column), b.sort_value(sort.column));
        match sort.direction {
            SortDirection::Asc => ord,
            SortDirection::Desc => ord.reverse(),
        }
    });
    sorted
}

/// Cell texts of one table row in header order.
#[must_use]
pub fn display_cells(record: &TradeRecord) -> [String; 6] {
    [
        record.symbol.clone(),
        record.side.to_string(),
        to_fixed(record.quantity, 3),
        format!("${}", to_fixed(record.price, 3)),
        format!("${}", to_fixed(record.transaction_fee, 3)),
        record.time.clone(),
    ]
}

/// The trade-history panel: fetched records plus the active sort.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct TradeTable {
    state: LoadState<Vec<TradeRecord>>,
    sort: SortState,
}

impl TradeTable {
    pub fn new(state: LoadState<Vec<TradeRecord>>) -> Self {
        Self {
            state,
            sort: SortState::default(),
        }
    }

    #[must_use]
    pub fn state(&self) -> &LoadState<Vec<TradeRecord>> {
        &self.state
    }

    #[must_use]
    pub fn is_loading(&self) -> bool {
        self.state.is_loading()
    }

    /// Fetched records in fetch order; empty unless loaded.
    #[must_use]
    pub fn records(&self) -> &[TradeRecord] {
        self.state.ready().map(Vec::as_slice).unwrap_or(&[])
    }

    #[must_use]
    pub fn sort(&self) -> SortState {
        self.sort
    }

    /// Header click on `column`.
    pub fn handle_sort(&mut self, column: SortColumn) {
        self.sort.toggle(column);
    }

    #[must_use]
    pub fn sorted_trades(&self) -> Vec<&TradeRecord> {
        sort_trades(self.records(), self.sort)
    }

    /// Header caption, with an arrow on the active column ("Price ↓").
    #[must_use]
    pub fn header_label(&self, column: SortColumn) -> String {
        if self.sort.column == column {
            format!("{} {}", column.title(), self.sort.direction.arrow())
        } else {
            column.title().to_string()
        }
    }
}

/// Loads the trade-history table from `transactions`.
pub struct TradeService {
    limit: usize,
}

impl TradeService {
    pub fn new(limit: usize) -> Self {
        Self { limit }
    }

    pub async fn load(&self, source: &dyn DataSource) -> TradeTable {
        let result = source.fetch_transactions(self.limit).await.map(|rows| {
            tracing::debug!(rows = rows.len(), "trades loaded");
            rows.into_iter().map(map_transaction).collect()
        });
        TradeTable::new(settle("trade table", result))
    }
}

impl Default for TradeService {
    fn default() -> Self {
        Self::new(DEFAULT_TRADE_FETCH_LIMIT)
    }
}
