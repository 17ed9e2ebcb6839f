pub mod booking;
pub mod closed_day;
pub mod package;
pub mod transaction;
pub mod user;
pub mod settings;
