//! Port for HSE records and the site document registry.

use std::sync::{Mutex, PoisonError};

use super::RepositoryError;
use crate::domain::site_ops::{
    DocumentAsset, HseRecord, HseStatus, NewDocumentAsset, NewHseRecord,
};

/// Port for the site operations store.
#[cfg_attr(test, mockall::automock)]
pub trait SiteOpsRepository: Send + Sync {
    /// File an HSE record; it opens in the Open state.
    fn report_incident(&self, record: &NewHseRecord) -> Result<HseRecord, RepositoryError>;

    /// HSE records newest first; `open_only` drops closed ones.
    fn list_incidents(&self, open_only: bool) -> Result<Vec<HseRecord>, RepositoryError>;

    /// Close an HSE record and return the stored row.
    fn close_incident(&self, record_id: i32) -> Result<HseRecord, RepositoryError>;

    /// File a document and return it with its assigned id.
    fn add_document(&self, document: &NewDocumentAsset)
    -> Result<DocumentAsset, RepositoryError>;

    /// Documents newest first, optionally narrowed to one category.
    fn list_documents<'a>(
        &self,
        category: Option<&'a str>,
    ) -> Result<Vec<DocumentAsset>, RepositoryError>;
}

#[derive(Debug, Default)]
struct SiteOpsRows {
    incidents: Vec<HseRecord>,
    documents: Vec<DocumentAsset>,
}

/// In-memory store for tests and demos that do not need a database.
#[derive(Debug, Default)]
pub struct MemorySiteOpsRepository {
    rows: Mutex<SiteOpsRows>,
}

impl MemorySiteOpsRepository {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    fn with_rows<T>(&self, body: impl FnOnce(&mut SiteOpsRows) -> T) -> T {
        let mut rows = self.rows.lock().unwrap_or_else(PoisonError::into_inner);
        body(&mut rows)
    }
}

impl SiteOpsRepository for MemorySiteOpsRepository {
    fn report_incident(&self, record: &NewHseRecord) -> Result<HseRecord, RepositoryError> {
        Ok(self.with_rows(|rows| {
            let id = rows.incidents.iter().map(|r| r.id).max().unwrap_or(0) + 1;
            let record = HseRecord {
                id,
                date: record.date,
                project_id: record.project_id,
                incident_type: Some(record.incident_type),
                description: record.description.clone(),
                action_taken: record.action_taken.clone(),
                reported_by: record.reported_by.clone(),
                status: HseStatus::Open,
            };
            rows.incidents.push(record.clone());
            record
        }))
    }

    fn list_incidents(&self, open_only: bool) -> Result<Vec<HseRecord>, RepositoryError> {
        Ok(self.with_rows(|rows| {
            let mut incidents: Vec<_> = rows
                .incidents
                .iter()
                .filter(|r| !open_only || r.status == HseStatus::Open)
                .cloned()
                .collect();
            incidents.sort_by_key(|r| std::cmp::Reverse(r.id));
            incidents
        }))
    }

    fn close_incident(&self, record_id: i32) -> Result<HseRecord, RepositoryError> {
        self.with_rows(|rows| {
            let record = rows
                .incidents
                .iter_mut()
                .find(|r| r.id == record_id)
                .ok_or_else(|| RepositoryError::missing("HSE record", record_id))?;
            record.status = HseStatus::Closed;
            Ok(record.clone())
        })
    }

    fn add_document(
        &self,
        document: &NewDocumentAsset,
    ) -> Result<DocumentAsset, RepositoryError> {
        Ok(self.with_rows(|rows| {
            let id = rows.documents.iter().map(|d| d.id).max().unwrap_or(0) + 1;
            let document = DocumentAsset {
                id,
                title: document.title.clone(),
                category: document.category.clone(),
                file_path: document.file_path.clone(),
                upload_date: document.upload_date,
                project_id: document.project_id,
            };
            rows.documents.push(document.clone());
            document
        }))
    }

    fn list_documents(
        &self,
        category: Option<&str>,
    ) -> Result<Vec<DocumentAsset>, RepositoryError> {
        Ok(self.with_rows(|rows| {
            let mut documents: Vec<_> = rows
                .documents
                .iter()
                .filter(|d| category.is_none_or(|wanted| d.category.as_deref() == Some(wanted)))
                .cloned()
                .collect();
            documents.sort_by_key(|d| std::cmp::Reverse(d.id));
            documents
        }))
    }
}
