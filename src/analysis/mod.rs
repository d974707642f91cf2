pub mod log_reader;
pub mod report;
pub mod tables;

pub use log_reader::{parse_log, read_log, state_at, LogEntry};
pub use report::AnalysisReport;
pub use tables::{ActivityTables, StatusCounts};
