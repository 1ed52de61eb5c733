use serde::{Deserialize, Serialize};

use super::de::{f64_lenient, id_lenient};
use crate::errors::CoreError;

/// Side of a trade.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TradeSide {
    #[serde(rename = "BUY")]
    Buy,
    #[serde(rename = "SELL")]
    Sell,
}

impl TradeSide {
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            TradeSide::Buy => "BUY",
            TradeSide::Sell => "SELL",
        }
    }
}

impl std::fmt::Display for TradeSide {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A raw row of the `transactions` table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TransactionRow {
    #[serde(deserialize_with = "id_lenient")]
    pub id: String,

    pub symbol: String,

    #[serde(rename = "type")]
    pub side: TradeSide,

    #[serde(deserialize_with = "f64_lenient")]
    pub quantity: f64,

    #[serde(deserialize_with = "f64_lenient")]
    pub price: f64,

    #[serde(deserialize_with = "f64_lenient")]
    pub transaction_fee: f64,

    /// Raw `timestamptz` text
    pub time: String,
}

/// One row of the trade-history table, ready for display.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TradeRecord {
    pub id: String,
    pub symbol: String,
    pub side: TradeSide,
    pub quantity: f64,
    pub price: f64,
    pub transaction_fee: f64,

    /// `YYYY-MM-DD HH:MM:SS` in local time; sorted as text
    pub time: String,
}

/// Sortable column of the trade table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SortColumn {
    Id,
    Symbol,
    Side,
    Quantity,
    Price,
    Fee,
    Time,
}

impl SortColumn {
    /// Columns in table order, as rendered in the header.
    pub const HEADER: [SortColumn; 6] = [
        SortColumn::Symbol,
        SortColumn::Side,
        SortColumn::Quantity,
        SortColumn::Price,
        SortColumn::Fee,
        SortColumn::Time,
    ];

    #[must_use]
    pub fn title(&self) -> &'static str {
        match self {
            SortColumn::Id => "ID",
            SortColumn::Symbol => "Symbol",
            SortColumn::Side => "Type",
            SortColumn::Quantity => "Quantity",
            SortColumn::Price => "Price",
            SortColumn::Fee => "Fee",
            SortColumn::Time => "Time",
        }
    }
}

/// Parses the column keys the web table uses (`id`, `symbol`, `type`,
/// `quantity`, `price`, `transaction_fee`, `time`).
impl std::str::FromStr for SortColumn {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "id" => Ok(SortColumn::Id),
            "symbol" => Ok(SortColumn::Symbol),
            "type" => Ok(SortColumn::Side),
            "quantity" => Ok(SortColumn::Quantity),
            "price" => Ok(SortColumn::Price),
            "transaction_fee" => Ok(SortColumn::Fee),
            "time" => Ok(SortColumn::Time),
            other => Err(CoreError::InvalidValue(format!("unknown sort column '{other}'"))),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortDirection {
    Asc,
    Desc,
}

impl SortDirection {
    #[must_use]
    pub fn flipped(self) -> Self {
        match self {
            SortDirection::Asc => SortDirection::Desc,
            SortDirection::Desc => SortDirection::Asc,
        }
    }

    #[must_use]
    pub fn arrow(&self) -> &'static str {
        match self {
            SortDirection::Asc => "↑",
            SortDirection::Desc => "↓",
        }
    }
}

/// Active column and direction of the trade table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SortState {
    pub column: SortColumn,
    pub direction: SortDirection,
}

impl Default for SortState {
    /// Newest trades first.
    fn default() -> Self {
        Self {
            column: SortColumn::Time,
            direction: SortDirection::Desc,
        }
    }
}

impl SortState {
    /// Header click: the active column flips direction, any other column
    /// becomes active in descending order.
    pub fn toggle(&mut self, column: SortColumn) {
        if self.column == column {
            self.direction = self.direction.flipped();
        } else {
            self.column = column;
            self.direction = SortDirection::Desc;
        }
    }
}

/// A cell value as seen by the sort comparator.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum SortValue<'a> {
    Text(&'a str),
    Number(f64),
    /// Neither text nor number; compares equal to everything.
    Unsupported,
}

impl TradeRecord {
    #[must_use]
    pub fn sort_value(&self, column: SortColumn) -> SortValue<'_> {
        match column {
            SortColumn::Id => SortValue::Text(&self.id),
            SortColumn::Symbol => SortValue::Text(&self.symbol),
            SortColumn::Side => SortValue::Text(self.side.as_str()),
            SortColumn::Quantity => SortValue::Number(self.quantity),
            SortColumn::Price => SortValue::Number(self.price),
            SortColumn::Fee => SortValue::Number(self.transaction_fee),
            SortColumn::Time => SortValue::Text(&self.time),
        }
    }
}
