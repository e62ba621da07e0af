//! Time-series utilities shared by connectors and the orchestrator.
//!
//! Modules include:
//! - `period`: encode/decode calendar period labels to linear indices
//! - `resample`: convert a native series between annual, quarterly and monthly
//! - `util`: decode raw source records and enforce ordering invariants
/// Calendar label codec.
pub mod period;
/// Frequency conversion with average/sum policies.
pub mod resample;
/// Record decoding and native-sequence invariants.
pub mod util;
