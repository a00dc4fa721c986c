//! Site operations and HSE screen: incident log and document registry.

use std::sync::Arc;

use crate::domain::error::ModuleError;
use crate::domain::menu::Screen;
use crate::domain::modules::{authorize, require_text};
use crate::domain::ports::SiteOpsRepository;
use crate::domain::session::Session;
use crate::domain::site_ops::{DocumentAsset, HseRecord, NewDocumentAsset, NewHseRecord};

/// Service behind the site operations and HSE screen.
#[derive(Clone)]
pub struct SiteOpsService<R> {
    repo: Arc<R>,
}

impl<R> SiteOpsService<R>
where
    R: SiteOpsRepository,
{
    /// Create a site operations service over the given store.
    pub fn new(repo: Arc<R>) -> Self {
        Self { repo }
    }

    /// Report an HSE event. New records open in the Open state.
    pub fn report_incident(
        &self,
        session: &Session,
        record: NewHseRecord,
    ) -> Result<HseRecord, ModuleError> {
        authorize(session, Screen::SiteOperations)?;
        Ok(self.repo.report_incident(&record)?)
    }

    /// HSE records, newest first; `open_only` drops closed ones.
    pub fn incidents(
        &self,
        session: &Session,
        open_only: bool,
    ) -> Result<Vec<HseRecord>, ModuleError> {
        authorize(session, Screen::SiteOperations)?;
        Ok(self.repo.list_incidents(open_only)?)
    }

    /// Close an incident and return the stored row.
    pub fn close_incident(
        &self,
        session: &Session,
        record_id: i32,
    ) -> Result<HseRecord, ModuleError> {
        authorize(session, Screen::SiteOperations)?;
        Ok(self.repo.close_incident(record_id)?)
    }

    /// File a site document.
    pub fn file_document(
        &self,
        session: &Session,
        document: NewDocumentAsset,
    ) -> Result<DocumentAsset, ModuleError> {
        authorize(session, Screen::SiteOperations)?;
        require_text("title", &document.title)?;
        Ok(self.repo.add_document(&document)?)
    }

    /// Filed documents, newest first, optionally limited to one category.
    pub fn documents(
        &self,
        session: &Session,
        category: Option<&str>,
    ) -> Result<Vec<DocumentAsset>, ModuleError> {
        authorize(session, Screen::SiteOperations)?;
        Ok(self.repo.list_documents(category)?)
    }
}
