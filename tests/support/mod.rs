//! Shared test utilities.

pub mod fanhub_api;
