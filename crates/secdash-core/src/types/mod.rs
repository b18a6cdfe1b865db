//! 공용 기본 타입.

pub mod interval;

pub use interval::{interval_label, OhlcInterval};
