//! Test Helper Utilities
//!
//! Shared utilities for testing psyscore-engine

#![allow(dead_code)]

pub mod fixtures;
pub mod log_capture;

pub use fixtures::{
    balanced_likert_responses, extreme_likert_responses, gad7, instrument_items, phq9, straight_lined, trait_map, TIMINGS_MS,
};
pub use log_capture::{capture_logs, LogCapture};
