//! Utility functions and helpers.

pub mod scan;

pub use scan::SourceScanner;
