use chrono::NaiveDate;
use serde::Deserialize;

#[derive(Deserialize)]
pub struct WeekQuery {
    /// First day of the displayed 7-day window.
    pub start: NaiveDate,
}
