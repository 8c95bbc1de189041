//! Year bucketing, cross-year aggregation and status statistics for lake
//! water level series.
//!
//! This crate turns raw CSV rows into the per-year lines, the daily
//! aggregate, the current status and the JSON units the charts read.

pub mod aggregate;
pub mod bucket;
pub mod operating_zone;
pub mod palette;
pub mod pipeline;
pub mod selection;
pub mod status;
pub mod writer;
