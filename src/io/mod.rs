//! File output for computed results.

/// CSV export of the bill of materials.
pub mod export;
