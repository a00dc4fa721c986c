//! Database-backed `SiteOpsRepository` implementation using Diesel.

use diesel::prelude::*;

use crate::domain::ports::{RepositoryError, SiteOpsRepository};
use crate::domain::site_ops::{
    DocumentAsset, HseRecord, HseStatus, NewDocumentAsset, NewHseRecord,
};

use super::diesel_helpers::{
    last_insert_id, map_diesel_error, map_pool_error, parse_label, parse_optional_label,
};
use super::models::{DocumentAssetRow, HseRecordRow, NewDocumentAssetRow, NewHseRecordRow};
use super::pool::DbPool;
use super::schema::{document_assets, hse_records};

/// Diesel-backed implementation of the site operations port.
#[derive(Clone)]
pub struct DieselSiteOpsRepository {
    pool: DbPool,
}

impl DieselSiteOpsRepository {
    /// Create a new repository with the given connection pool.
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

fn row_to_record(row: HseRecordRow) -> Result<HseRecord, RepositoryError> {
    Ok(HseRecord {
        id: row.id,
        date: row.date,
        project_id: row.project_id,
        incident_type: parse_optional_label(row.incident_type.as_deref())?,
        description: row.description,
        action_taken: row.action_taken,
        reported_by: row.reported_by,
        status: parse_label(&row.status)?,
    })
}

fn row_to_document(row: DocumentAssetRow) -> DocumentAsset {
    DocumentAsset {
        id: row.id,
        title: row.title,
        category: row.category,
        file_path: row.file_path,
        upload_date: row.upload_date,
        project_id: row.project_id,
    }
}

impl SiteOpsRepository for DieselSiteOpsRepository {
    fn report_incident(&self, record: &NewHseRecord) -> Result<HseRecord, RepositoryError> {
        let mut conn = self.pool.get().map_err(map_pool_error)?;
        let row = conn
            .transaction(|conn| {
                let new_row = NewHseRecordRow {
                    date: record.date,
                    project_id: record.project_id,
                    incident_type: Some(record.incident_type.as_str()),
                    description: record.description.as_deref(),
                    action_taken: record.action_taken.as_deref(),
                    reported_by: record.reported_by.as_deref(),
                    status: HseStatus::Open.as_str(),
                };
                diesel::insert_into(hse_records::table)
                    .values(&new_row)
                    .execute(conn)?;
                let id = last_insert_id(conn)?;
                hse_records::table
                    .find(id)
                    .select(HseRecordRow::as_select())
                    .first(conn)
            })
            .map_err(map_diesel_error)?;
        row_to_record(row)
    }

    fn list_incidents(&self, open_only: bool) -> Result<Vec<HseRecord>, RepositoryError> {
        let mut conn = self.pool.get().map_err(map_pool_error)?;
        let mut query = hse_records::table.into_boxed();
        if open_only {
            query = query.filter(hse_records::status.eq(HseStatus::Open.as_str()));
        }
        let rows: Vec<HseRecordRow> = query
            .order(hse_records::id.desc())
            .select(HseRecordRow::as_select())
            .load(&mut conn)
            .map_err(map_diesel_error)?;
        rows.into_iter().map(row_to_record).collect()
    }

    fn close_incident(&self, record_id: i32) -> Result<HseRecord, RepositoryError> {
        let mut conn = self.pool.get().map_err(map_pool_error)?;
        let affected = diesel::update(hse_records::table.find(record_id))
            .set(hse_records::status.eq(HseStatus::Closed.as_str()))
            .execute(&mut conn)
            .map_err(map_diesel_error)?;
        if affected == 0 {
            return Err(RepositoryError::missing("HSE record", record_id));
        }
        let row = hse_records::table
            .find(record_id)
            .select(HseRecordRow::as_select())
            .first(&mut conn)
            .optional()
            .map_err(map_diesel_error)?
            .ok_or_else(|| RepositoryError::missing("HSE record", record_id))?;
        row_to_record(row)
    }

    fn add_document(
        &self,
        document: &NewDocumentAsset,
    ) -> Result<DocumentAsset, RepositoryError> {
        let mut conn = self.pool.get().map_err(map_pool_error)?;
        let row = conn
            .transaction(|conn| {
                let new_row = NewDocumentAssetRow {
                    title: &document.title,
                    category: document.category.as_deref(),
                    file_path: document.file_path.as_deref(),
                    upload_date: document.upload_date,
                    project_id: document.project_id,
                };
                diesel::insert_into(document_assets::table)
                    .values(&new_row)
                    .execute(conn)?;
                let id = last_insert_id(conn)?;
                document_assets::table
                    .find(id)
                    .select(DocumentAssetRow::as_select())
                    .first(conn)
            })
            .map_err(map_diesel_error)?;
        Ok(row_to_document(row))
    }

    fn list_documents(
        &self,
        category: Option<&str>,
    ) -> Result<Vec<DocumentAsset>, RepositoryError> {
        let mut conn = self.pool.get().map_err(map_pool_error)?;
        let mut query = document_assets::table.into_boxed();
        if let Some(wanted) = category {
            query = query.filter(document_assets::category.eq(wanted));
        }
        let rows: Vec<DocumentAssetRow> = query
            .order(document_assets::id.desc())
            .select(DocumentAssetRow::as_select())
            .load(&mut conn)
            .map_err(map_diesel_error)?;
        Ok(rows.into_iter().map(row_to_document).collect())
    }
}

#[cfg(test)]
mod tests {
    //! Regression coverage for row conversion.

    use chrono::NaiveDate;
    use rstest::rstest;

    use super::*;
    use crate::domain::site_ops::IncidentKind;

    #[rstest]
    fn record_rows_decode_kind_and_status() {
        let row = HseRecordRow {
            id: 5,
            date: NaiveDate::from_ymd_opt(2024, 3, 4).unwrap(),
            project_id: Some(1),
            incident_type: Some("Near Miss".into()),
            description: Some("Scaffold clamp failure".into()),
            action_taken: None,
            reported_by: Some("Site supervisor".into()),
            status: "Open".into(),
        };

        let record = row_to_record(row).unwrap();
        assert_eq!(record.incident_type, Some(IncidentKind::NearMiss));
        assert_eq!(record.status, HseStatus::Open);
    }

    #[rstest]
    fn unknown_incident_kinds_are_reported() {
        let row = HseRecordRow {
            id: 6,
            date: NaiveDate::from_ymd_opt(2024, 3, 4).unwrap(),
            project_id: None,
            incident_type: Some("Paperwork".into()),
            description: None,
            action_taken: None,
            reported_by: None,
            status: "Open".into(),
        };

        let error = row_to_record(row).unwrap_err();
        assert_eq!(
            error,
            RepositoryError::query("unknown incident type: Paperwork")
        );
    }

    #[rstest]
    fn document_rows_convert_to_domain_documents() {
        let row = DocumentAssetRow {
            id: 2,
            title: "Tower B elevations".into(),
            category: Some("Drawings".into()),
            file_path: Some("/files/tower-b-elevations.pdf".into()),
            upload_date: NaiveDate::from_ymd_opt(2024, 3, 4).unwrap(),
            project_id: Some(1),
        };

        let document = row_to_document(row);
        assert_eq!(document.category.as_deref(), Some("Drawings"));
    }
}
