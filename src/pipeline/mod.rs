//! Batch generation pipeline.
//!
//! One batch run flows:
//! 1. `BatchRunner::run()` — fixes the batch date, acquires one session
//! 2. `RowProcessor::process()` per row, in input order
//! 3. recipient normalization → context → render each variant → artifact
//! 4. one `RowOutcome` per row, session released exactly once
//!
//! Row-level failures never abort the batch; only session acquisition and
//! template/configuration bugs are fatal.

pub mod row;
pub mod runner;
pub mod types;
