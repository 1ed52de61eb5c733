//! PostgREST read queries.
//!
//! A `ViewQuery` is the `from(..).select(..).order(..).limit(..)` chain of a
//! Supabase client, reduced to the handful of operators the dashboard uses.

pub const DASHBOARD_STATS_VIEW: &str = "dashboard_stats_view";
pub const CHART_DATA_VIEW: &str = "chart_data_view";
pub const TRANSACTIONS_TABLE: &str = "transactions";
pub const SYSTEM_STATUS_TABLE: &str = "system_status";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ViewQuery {
    relation: String,
    columns: String,
    order: Option<(String, bool)>,
    limit: Option<usize>,
    single: bool,
}

impl ViewQuery {
    /// Start a `select=*` query on a table or view.
    pub fn from(relation: impl Into<String>) -> Self {
        Self {
            relation: relation.into(),
            columns: "*".to_string(),
            order: None,
            limit: None,
            single: false,
        }
    }

    pub fn select(mut self, columns: impl Into<String>) -> Self {
        self.columns = columns.into();
        self
    }

    pub fn order(mut self, column: impl Into<String>, ascending: bool) -> Self {
        self.order = Some((column.into(), ascending));
        self
    }

    pub fn limit(mut self, limit: usize) -> Self {
        self.limit = Some(limit);
        self
    }

    /// Expect exactly one row, returned as an object instead of an array.
    pub fn single(mut self) -> Self {
        self.single = true;
        self
    }

    #[must_use]
    pub fn relation(&self) -> &str {
        &self.relation
    }

    #[must_use]
    pub fn is_single(&self) -> bool {
        self.single
    }

    /// Query-string parameters in PostgREST syntax.
    #[must_use]
    pub fn query_pairs(&self) -> Vec<(String, String)> {
        let mut pairs = vec![("select".to_string(), self.columns.clone())];
        if let Some((column, ascending)) = &self.order {
            let dir = if *ascending { "asc" } else { "desc" };
            pairs.push(("order".to_string(), format!("{column}.{dir}")));
        }
        if let Some(limit) = self.limit {
            pairs.push(("limit".to_string(), limit.to_string()));
        }
        pairs
    }

    /// Full request URL under `rest_base` (e.g. `https://x.supabase.co/rest/v1`).
    #[must_use]
    pub fn url(&self, rest_base: &str) -> String {
        let query = self
            .query_pairs()
            .iter()
            .map(|(k, v)| format!("{k}={v}"))
            .collect::<Vec<_>>()
            .join("&");
        format!("{}/{}?{}", rest_base.trim_end_matches('/'), self.relation, query)
    }

    // ── Dashboard queries ───────────────────────────────────────────

    /// Key metrics in display order.
    #[must_use]
    pub fn dashboard_stats() -> Self {
        Self::from(DASHBOARD_STATS_VIEW).order("sort_order", true)
    }

    /// Every chart point, oldest first.
    #[must_use]
    pub fn chart_data() -> Self {
        Self::from(CHART_DATA_VIEW).order("sort_date", true)
    }

    /// The `limit` newest transactions.
    #[must_use]
    pub fn recent_transactions(limit: usize) -> Self {
        Self::from(TRANSACTIONS_TABLE).order("time", false).limit(limit)
    }

    /// Timestamp of the last data refresh.
    #[must_use]
    pub fn system_status() -> Self {
        Self::from(SYSTEM_STATUS_TABLE)
            .select("last_updated")
            .limit(1)
            .single()
    }
}
