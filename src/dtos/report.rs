use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::domain::reports::{ReportTotals, TransactionTotals};

#[derive(Debug, Clone, Copy, Deserialize)]
pub struct DateRangeQuery {
    pub from: Option<NaiveDate>,
    pub to: Option<NaiveDate>,
}

#[derive(Serialize)]
pub struct ReportSummaryResponse {
    pub from: Option<NaiveDate>,
    pub to: Option<NaiveDate>,
    #[serde(flatten)]
    pub totals: ReportTotals,
}

#[derive(Serialize)]
pub struct TransactionSummaryResponse {
    pub from: Option<NaiveDate>,
    pub to: Option<NaiveDate>,
    #[serde(flatten)]
    pub totals: TransactionTotals,
}
