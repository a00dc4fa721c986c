//! Port for the licensed software registry.

use std::sync::{Mutex, PoisonError};

use super::RepositoryError;
use crate::domain::software::{NewSoftwareAsset, SoftwareAsset, SoftwareStatus};

/// Port for the software asset store.
#[cfg_attr(test, mockall::automock)]
pub trait SoftwareRepository: Send + Sync {
    /// Register a licence and return it with its assigned id.
    fn insert(&self, asset: &NewSoftwareAsset) -> Result<SoftwareAsset, RepositoryError>;

    /// All licences, oldest first.
    fn list(&self) -> Result<Vec<SoftwareAsset>, RepositoryError>;

    /// Move a licence to `status` and return the stored row.
    fn set_status(
        &self,
        asset_id: i32,
        status: SoftwareStatus,
    ) -> Result<SoftwareAsset, RepositoryError>;
}

/// In-memory store for tests and demos that do not need a database.
#[derive(Debug, Default)]
pub struct MemorySoftwareRepository {
    rows: Mutex<Vec<SoftwareAsset>>,
}

impl MemorySoftwareRepository {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    fn with_rows<T>(&self, body: impl FnOnce(&mut Vec<SoftwareAsset>) -> T) -> T {
        let mut rows = self.rows.lock().unwrap_or_else(PoisonError::into_inner);
        body(&mut rows)
    }
}

impl SoftwareRepository for MemorySoftwareRepository {
    fn insert(&self, asset: &NewSoftwareAsset) -> Result<SoftwareAsset, RepositoryError> {
        Ok(self.with_rows(|rows| {
            let id = rows.iter().map(|a| a.id).max().unwrap_or(0) + 1;
            let asset = SoftwareAsset {
                id,
                name: asset.name.clone(),
                version: asset.version.clone(),
                license_key: asset.license_key.clone(),
                expiry_date: asset.expiry_date,
                status: asset.status,
                assigned_to: asset.assigned_to.clone(),
            };
            rows.push(asset.clone());
            asset
        }))
    }

    fn list(&self) -> Result<Vec<SoftwareAsset>, RepositoryError> {
        Ok(self.with_rows(|rows| rows.clone()))
    }

    fn set_status(
        &self,
        asset_id: i32,
        status: SoftwareStatus,
    ) -> Result<SoftwareAsset, RepositoryError> {
        self.with_rows(|rows| {
            let asset = rows
                .iter_mut()
                .find(|a| a.id == asset_id)
                .ok_or_else(|| RepositoryError::missing("software asset", asset_id))?;
            asset.status = status;
            Ok(asset.clone())
        })
    }
}

#[cfg(test)]
mod tests {
    //! Regression coverage for this module.

    use rstest::rstest;

    use super::*;

    #[rstest]
    fn status_changes_persist() {
        let repo = MemorySoftwareRepository::new();
        let asset = repo.insert(&NewSoftwareAsset::new("Estimator Pro")).unwrap();

        repo.set_status(asset.id, SoftwareStatus::Expired).unwrap();

        let listed = repo.list().unwrap();
        assert_eq!(listed.len(), 1);
        assert_eq!(listed[0].status, SoftwareStatus::Expired);
    }

    #[rstest]
    fn unknown_licence_reports_missing() {
        let repo = MemorySoftwareRepository::new();
        let err = repo
            .set_status(7, SoftwareStatus::PendingUpdate)
            .unwrap_err();
        assert_eq!(err, RepositoryError::missing("software asset", 7_i32));
    }
}
