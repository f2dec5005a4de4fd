//! Device catalog: OLT/ONT records, repository abstraction, and seed data.

/// Repository trait and in-memory backing store.
pub mod catalog;
/// Built-in Eltex device seed data.
pub mod presets;
pub mod types;

// Re-export the main types for convenience
pub use catalog::CatalogStore;
pub use catalog::InMemoryCatalog;
pub use types::{EthernetPort, OltComponent, OltDevice, OntDevice, SfpOption, UplinkPort};
pub use types::{PonTechnology, WifiSpec};
