//! Core types for timeblock editing.
//!
//! This crate provides:
//! - `Timeblock` and `ClockTime`, the `{date, start_time, end_time}` record
//! - `selection` reductions of picker selections to day spans and clock windows
//! - `TimeblockEditor`, which merges and clips timeblock lists
//! - `TimeblockConfig` and `TimeblockStore` for the CLI

pub mod clock;
pub mod config;
pub mod constants;
pub mod editor;
pub mod error;
pub mod selection;
pub mod store;
pub mod timeblock;

pub use editor::TimeblockEditor;
pub use error::{TimeblockError, TimeblockResult};
pub use timeblock::{ClockTime, Timeblock};
