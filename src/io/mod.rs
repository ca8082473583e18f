/// CSV export of bill breakdowns.
pub mod export;
