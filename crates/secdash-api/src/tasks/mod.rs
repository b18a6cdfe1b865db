//! 백그라운드/유지보수 작업.

pub mod securities_csv_sync;

pub use securities_csv_sync::{sync_securities_from_csv, CsvSyncReport};
