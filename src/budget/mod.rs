//! The power budget engine: pure calculators over a design snapshot.
//!
//! Two independent projections of the same input (the optical loss/margin
//! budget and the bill of materials) with no control flow between them.

/// Bill-of-materials generation.
pub mod bom;
/// Loss constants and split-ratio parsing.
pub mod loss;
pub mod power;
pub mod types;

// Re-export the main types for convenience
pub use bom::{BomLine, BomQuantity, generate_bom};
pub use power::compute_budget;
pub use types::DesignParameters;
pub use types::MarginStatus;
pub use types::PowerBudgetResult;
pub use types::{SplitterConfig, SplitterTopology};
