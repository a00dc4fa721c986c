//! Software management screen: licence registry and expiry watch.

use std::sync::Arc;

use mockable::Clock;

use crate::domain::error::ModuleError;
use crate::domain::menu::Screen;
use crate::domain::modules::{authorize, require_text};
use crate::domain::ports::SoftwareRepository;
use crate::domain::session::Session;
use crate::domain::software::{NewSoftwareAsset, SoftwareAsset, SoftwareStatus};

/// How far ahead the expiry watch looks, in days.
pub const EXPIRY_WINDOW_DAYS: u64 = 30;

/// Service behind the software management screen.
#[derive(Clone)]
pub struct SoftwareService<R> {
    repo: Arc<R>,
    clock: Arc<dyn Clock>,
}

impl<R> SoftwareService<R>
where
    R: SoftwareRepository,
{
    /// Create a software service over the given store.
    pub fn new(repo: Arc<R>, clock: Arc<dyn Clock>) -> Self {
        Self { repo, clock }
    }

    /// Register a licence.
    pub fn register(
        &self,
        session: &Session,
        asset: NewSoftwareAsset,
    ) -> Result<SoftwareAsset, ModuleError> {
        authorize(session, Screen::Software)?;
        require_text("name", &asset.name)?;
        Ok(self.repo.insert(&asset)?)
    }

    /// The licence registry, oldest first.
    pub fn licences(&self, session: &Session) -> Result<Vec<SoftwareAsset>, ModuleError> {
        authorize(session, Screen::Software)?;
        Ok(self.repo.list()?)
    }

    /// Move a licence to a new lifecycle state and return the stored row.
    pub fn set_status(
        &self,
        session: &Session,
        asset_id: i32,
        status: SoftwareStatus,
    ) -> Result<SoftwareAsset, ModuleError> {
        authorize(session, Screen::Software)?;
        Ok(self.repo.set_status(asset_id, status)?)
    }

    /// Licences lapsing within the expiry window, already-lapsed excluded.
    pub fn expiring_soon(&self, session: &Session) -> Result<Vec<SoftwareAsset>, ModuleError> {
        authorize(session, Screen::Software)?;
        let today = self.clock.local().naive_local().date();
        let licences = self.repo.list()?;
        Ok(licences
            .into_iter()
            .filter(|asset| asset.expires_within(today, EXPIRY_WINDOW_DAYS))
            .collect())
    }
}
