pub mod booking;
pub mod calendar;
pub mod closed_day;
pub mod package;
pub mod report;
pub mod settings;
pub mod shift;
pub mod user;
