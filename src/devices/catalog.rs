//! Device repository abstraction and its in-memory backing.
//!
//! The calculators never see this layer; they receive resolved records.
//! Keeping lookup behind [`CatalogStore`] lets the backing store change
//! (seeded defaults, TOML file, remote source) without touching the engine.

use std::fs;
use std::path::Path;

use serde::Deserialize;

use super::presets;
use super::types::{OltDevice, OntDevice};
use crate::config::ConfigError;

/// Uniform get/list/put/delete access to the device catalog.
pub trait CatalogStore {
    /// Looks up an OLT record by id.
    fn olt(&self, id: &str) -> Option<&OltDevice>;
    /// Looks up an ONT record by id.
    fn ont(&self, id: &str) -> Option<&OntDevice>;
    /// All OLT records in catalog order.
    fn olts(&self) -> &[OltDevice];
    /// All ONT records in catalog order.
    fn onts(&self) -> &[OntDevice];
    /// Inserts a record, replacing any existing record with the same id.
    fn put_olt(&mut self, device: OltDevice);
    /// Inserts a record, replacing any existing record with the same id.
    fn put_ont(&mut self, device: OntDevice);
    /// Removes a record; returns whether it existed.
    ///
    /// Design parameters referencing a removed id are not rewritten here;
    /// the parameter cascade re-resolves on its next update.
    fn remove_olt(&mut self, id: &str) -> bool;
    /// Removes a record; returns whether it existed.
    fn remove_ont(&mut self, id: &str) -> bool;
}

/// Catalog file shape: two arrays of device tables.
#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct CatalogFile {
    #[serde(default)]
    olts: Vec<OltDevice>,
    #[serde(default)]
    onts: Vec<OntDevice>,
}

/// Vec-backed catalog preserving insertion order.
#[derive(Debug, Clone, Default)]
pub struct InMemoryCatalog {
    olts: Vec<OltDevice>,
    onts: Vec<OntDevice>,
}

impl InMemoryCatalog {
    /// Creates an empty catalog.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a catalog seeded with the built-in Eltex device set.
    pub fn with_defaults() -> Self {
        Self {
            olts: presets::default_olts(),
            onts: presets::default_onts(),
        }
    }

    /// Loads a catalog from a TOML file.
    ///
    /// # Errors
    ///
    /// Returns a `ConfigError` if the file cannot be read or the TOML is
    /// invalid.
    pub fn from_toml_file(path: &Path) -> Result<Self, ConfigError> {
        let content = fs::read_to_string(path).map_err(|e| ConfigError {
            field: "catalog".to_string(),
            message: format!("cannot read \"{}\": {e}", path.display()),
        })?;
        Self::from_toml_str(&content)
    }

    /// Parses a catalog from a TOML string.
    ///
    /// # Errors
    ///
    /// Returns a `ConfigError` if the TOML is invalid or contains unknown
    /// fields.
    pub fn from_toml_str(s: &str) -> Result<Self, ConfigError> {
        let file: CatalogFile = toml::from_str(s).map_err(|e| ConfigError {
            field: "toml".to_string(),
            message: e.to_string(),
        })?;
        Ok(Self {
            olts: file.olts,
            onts: file.onts,
        })
    }
}

impl CatalogStore for InMemoryCatalog {
    fn olt(&self, id: &str) -> Option<&OltDevice> {
        self.olts.iter().find(|d| d.id == id)
    }

    fn ont(&self, id: &str) -> Option<&OntDevice> {
        self.onts.iter().find(|d| d.id == id)
    }

    fn olts(&self) -> &[OltDevice] {
        &self.olts
    }

    fn onts(&self) -> &[OntDevice] {
        &self.onts
    }

    fn put_olt(&mut self, device: OltDevice) {
        match self.olts.iter_mut().find(|d| d.id == device.id) {
            Some(slot) => *slot = device,
            None => self.olts.push(device),
        }
    }

    fn put_ont(&mut self, device: OntDevice) {
        match self.onts.iter_mut().find(|d| d.id == device.id) {
            Some(slot) => *slot = device,
            None => self.onts.push(device),
        }
    }

    fn remove_olt(&mut self, id: &str) -> bool {
        let before = self.olts.len();
        self.olts.retain(|d| d.id != id);
        self.olts.len() != before
    }

    fn remove_ont(&mut self, id: &str) -> bool {
        let before = self.onts.len();
        self.onts.retain(|d| d.id != id);
        self.onts.len() != before
    }
}
