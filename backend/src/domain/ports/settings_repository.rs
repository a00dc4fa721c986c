//! Port for key-value system settings.

use std::sync::{Mutex, PoisonError};

use super::RepositoryError;
use crate::domain::settings::{SettingEntry, SettingUpsert};

/// Port for the settings store.
#[cfg_attr(test, mockall::automock)]
pub trait SettingsRepository: Send + Sync {
    /// Insert the entry, or overwrite category, value, and description when
    /// the key already exists. Returns the stored row.
    fn upsert(&self, entry: &SettingUpsert) -> Result<SettingEntry, RepositoryError>;

    /// All entries in key order.
    fn list(&self) -> Result<Vec<SettingEntry>, RepositoryError>;
}

/// In-memory store for tests and demos that do not need a database.
#[derive(Debug, Default)]
pub struct MemorySettingsRepository {
    rows: Mutex<Vec<SettingEntry>>,
}

impl MemorySettingsRepository {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    fn with_rows<T>(&self, body: impl FnOnce(&mut Vec<SettingEntry>) -> T) -> T {
        let mut rows = self.rows.lock().unwrap_or_else(PoisonError::into_inner);
        body(&mut rows)
    }
}

impl SettingsRepository for MemorySettingsRepository {
    fn upsert(&self, entry: &SettingUpsert) -> Result<SettingEntry, RepositoryError> {
        Ok(self.with_rows(|rows| {
            if let Some(existing) = rows.iter_mut().find(|e| e.key == entry.key) {
                existing.category = entry.category.clone();
                existing.value = entry.value.clone();
                existing.description = entry.description.clone();
                return existing.clone();
            }
            let id = rows.iter().map(|e| e.id).max().unwrap_or(0) + 1;
            let entry = SettingEntry {
                id,
                category: entry.category.clone(),
                key: entry.key.clone(),
                value: entry.value.clone(),
                description: entry.description.clone(),
            };
            rows.push(entry.clone());
            entry
        }))
    }

    fn list(&self) -> Result<Vec<SettingEntry>, RepositoryError> {
        Ok(self.with_rows(|rows| {
            let mut entries = rows.clone();
            entries.sort_by(|a, b| a.key.cmp(&b.key));
            entries
        }))
    }
}

#[cfg(test)]
mod tests {
    //! Regression coverage for this module.

    use rstest::rstest;

    use super::*;

    fn upsert(key: &str, value: &str) -> SettingUpsert {
        SettingUpsert {
            category: Some("Branding".to_owned()),
            key: key.to_owned(),
            value: Some(value.to_owned()),
            description: None,
        }
    }

    #[rstest]
    fn repeated_keys_overwrite_in_place() {
        let repo = MemorySettingsRepository::new();
        let first = repo.upsert(&upsert("company_name", "Groundwork")).unwrap();
        let second = repo
            .upsert(&upsert("company_name", "Groundwork Constructions"))
            .unwrap();

        assert_eq!(first.id, second.id);
        let entries = repo.list().unwrap();
        assert_eq!(entries.len(), 1);
        assert_eq!(
            entries[0].value.as_deref(),
            Some("Groundwork Constructions")
        );
    }

    #[rstest]
    fn listing_orders_by_key() {
        let repo = MemorySettingsRepository::new();
        repo.upsert(&upsert("tax_rate", "18")).unwrap();
        repo.upsert(&upsert("company_name", "Groundwork")).unwrap();

        let keys: Vec<_> = repo
            .list()
            .unwrap()
            .into_iter()
            .map(|e| e.key)
            .collect();
        assert_eq!(keys, ["company_name", "tax_rate"]);
    }
}
