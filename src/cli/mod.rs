//! Terminal front end for the conformance checker.
//!
//! Output formatting utilities are in [`output`].

pub mod output;
