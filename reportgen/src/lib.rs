//! Expose reportgen's internal API for use in integration tests. We do not
//! recommend using this API in production code; it is primarily intended
//! for testing purposes.
pub mod batch;
pub mod cli;
pub mod config;
pub mod error;
pub mod html;
