//! Core types and CSV ingestion for lake water level observations.
//!
//! Raw CSV cells become [`observation::RawRow`]s, which parse into UTC
//! [`observation::Observation`]s and are grouped into
//! [`yearly_series::YearlySeries`] by the `lwl-data` crate.

pub mod error;
pub mod header;
pub mod observation;
pub mod reader;
pub mod yearly_series;

pub use error::{LevelError, Result};
