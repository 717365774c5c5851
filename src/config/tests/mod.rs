//! Unit tests for configuration loading and precedence.
//!
//! Tests are organised into modules by functional area:
//! - `helpers`: Shared test utilities
//! - `precedence`: Layer precedence tests
//! - `field_resolution`: Base URL, settings path, timeout, and report path
//!   resolution tests
//! - `timeout_loading`: `timeout_seconds` loading from environment and CLI

mod helpers;
