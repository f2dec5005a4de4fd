//! Shared test fixtures for integration tests.

use pol_designer::budget::DesignParameters;
use pol_designer::config::DesignConfig;
use pol_designer::devices::InMemoryCatalog;

/// Default seeded catalog.
pub fn default_catalog() -> InMemoryCatalog {
    InMemoryCatalog::with_defaults()
}

/// Baseline design parameters resolved against the default catalog
/// (LTP-8X, NTU-RG-5421G-Wac, 1:32 centralized, 500 m / 50 m).
pub fn baseline_parameters(catalog: &InMemoryCatalog) -> DesignParameters {
    DesignConfig::baseline().to_parameters(catalog)
}
