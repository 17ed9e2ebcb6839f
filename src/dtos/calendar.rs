use serde::{Deserialize, Serialize};

use crate::domain::calendar::CalendarCell;

#[derive(Deserialize)]
pub struct CalendarQuery {
    pub year: i32,
    pub month: u32,
}

#[derive(Serialize)]
pub struct CalendarResponse {
    pub year: i32,
    pub month: u32,
    pub cells: Vec<CalendarCell>,
}
