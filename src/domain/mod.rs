pub mod types;
pub mod expenses;
pub mod calendar;
pub mod reports;
pub mod rules;
pub mod shifts;
