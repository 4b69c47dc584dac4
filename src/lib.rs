//! A small tool for keeping track of body weight.
//!
//! Measurements are appended, one per day, to a plain text log (see
//! [log_format] and [store]). The log can be listed, or charted in the
//! terminal as a smoothed trend with bands showing how far the daily numbers
//! scatter around it (see [trend] and [gui]).
//!
//! The smoothing is a zero-phase Butterworth low-pass filter, implemented in
//! [filter].

#![warn(missing_docs)]
pub mod args;
pub mod axes;
pub mod commands;
pub mod config;
pub mod error;
pub mod filter;
pub mod gui;
pub mod log_format;
pub mod store;
pub mod trend;
