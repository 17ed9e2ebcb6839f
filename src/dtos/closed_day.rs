use chrono::NaiveDate;
use serde::Deserialize;

#[derive(Deserialize)]
pub struct CreateClosedDayRequest {
    pub closed_date: NaiveDate,
    pub reason: String,
}
