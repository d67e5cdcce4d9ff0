//! Registry lookup trait and the in-memory token registry.

use std::collections::BTreeMap;

use tracing::debug;

use crate::{Permission, RegistryEntry, RegistryError};

/// Read-only view of the registry consumed by the transfer coordinators.
pub trait RegistryLookup {
    /// Entry for `denom`, or the zero value if the denom is not registered.
    fn get_denom(&self, denom: &str) -> RegistryEntry;

    fn check_denom_permissions(&self, entry: &RegistryEntry, required: &[Permission]) -> bool {
        entry.has_permissions(required)
    }
}

impl<T: RegistryLookup + ?Sized> RegistryLookup for &T {
    fn get_denom(&self, denom: &str) -> RegistryEntry {
        (**self).get_denom(denom)
    }
}

/// In-memory registry keyed by denomination.
#[derive(Clone, Debug, Default)]
pub struct TokenRegistry {
    entries: BTreeMap<String, RegistryEntry>,
}

impl TokenRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a registry from a list of entries, rejecting invalid or repeated denoms.
    pub fn from_entries(entries: impl IntoIterator<Item = RegistryEntry>) -> Result<Self, RegistryError> {
        let mut registry = Self::new();
        for entry in entries {
            entry.validate()?;
            if registry.entries.contains_key(&entry.denom) {
                return Err(RegistryError::DuplicateDenom(entry.denom));
            }
            registry.entries.insert(entry.denom.clone(), entry);
        }
        Ok(registry)
    }

    /// Insert or replace an entry.
    pub fn set_token(&mut self, entry: RegistryEntry) -> Result<(), RegistryError> {
        entry.validate()?;
        debug!(denom = %entry.denom, decimals = entry.decimals, "registry entry set");
        self.entries.insert(entry.denom.clone(), entry);
        Ok(())
    }

    pub fn remove_token(&mut self, denom: &str) -> Option<RegistryEntry> {
        self.entries.remove(denom)
    }

    pub fn get_entry(&self, denom: &str) -> Option<&RegistryEntry> {
        self.entries.get(denom)
    }

    pub fn entries(&self) -> impl Iterator<Item = &RegistryEntry> {
        self.entries.values()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl RegistryLookup for TokenRegistry {
    fn get_denom(&self, denom: &str) -> RegistryEntry {
        self.get_entry(denom).cloned().unwrap_or_default()
    }
}
