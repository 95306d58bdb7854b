//! Durable history of exported usage rows

pub mod storage;

pub use storage::{HistoryFilter, ReportStore};
