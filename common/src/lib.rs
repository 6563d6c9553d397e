pub mod chart;
pub mod notify;
pub mod preset;
pub mod req;
pub mod schedule;
