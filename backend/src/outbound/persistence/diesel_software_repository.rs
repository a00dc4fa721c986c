//! Database-backed `SoftwareRepository` implementation using Diesel.

use diesel::prelude::*;

use crate::domain::ports::{RepositoryError, SoftwareRepository};
use crate::domain::software::{NewSoftwareAsset, SoftwareAsset, SoftwareStatus};

use super::diesel_helpers::{last_insert_id, map_diesel_error, map_pool_error, parse_label};
use super::models::{NewSoftwareAssetRow, SoftwareAssetRow};
use super::pool::DbPool;
use super::schema::software_assets;

/// Diesel-backed implementation of the software registry port.
#[derive(Clone)]
pub struct DieselSoftwareRepository {
    pool: DbPool,
}

impl DieselSoftwareRepository {
    /// Create a new repository with the given connection pool.
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

fn row_to_asset(row: SoftwareAssetRow) -> Result<SoftwareAsset, RepositoryError> {
    Ok(SoftwareAsset {
        id: row.id,
        name: row.name,
        version: row.version,
        license_key: row.license_key,
        expiry_date: row.expiry_date,
        status: parse_label(&row.status)?,
        assigned_to: row.assigned_to,
    })
}

impl SoftwareRepository for DieselSoftwareRepository {
    fn insert(&self, asset: &NewSoftwareAsset) -> Result<SoftwareAsset, RepositoryError> {
        let mut conn = self.pool.get().map_err(map_pool_error)?;
        let row = conn
            .transaction(|conn| {
                let new_row = NewSoftwareAssetRow {
                    name: &asset.name,
                    version: asset.version.as_deref(),
                    license_key: asset.license_key.as_deref(),
                    expiry_date: asset.expiry_date,
                    status: asset.status.as_str(),
                    assigned_to: asset.assigned_to.as_deref(),
                };
                diesel::insert_into(software_assets::table)
                    .values(&new_row)
                    .execute(conn)?;
                let id = last_insert_id(conn)?;
                software_assets::table
                    .find(id)
                    .select(SoftwareAssetRow::as_select())
                    .first(conn)
            })
            .map_err(map_diesel_error)?;
        row_to_asset(row)
    }

    fn list(&self) -> Result<Vec<SoftwareAsset>, RepositoryError> {
        let mut conn = self.pool.get().map_err(map_pool_error)?;
        let rows: Vec<SoftwareAssetRow> = software_assets::table
            .order(software_assets::id.asc())
            .select(SoftwareAssetRow::as_select())
            .load(&mut conn)
            .map_err(map_diesel_error)?;
        rows.into_iter().map(row_to_asset).collect()
    }

    fn set_status(
        &self,
        asset_id: i32,
        status: SoftwareStatus,
    ) -> Result<SoftwareAsset, RepositoryError> {
        let mut conn = self.pool.get().map_err(map_pool_error)?;
        let affected = diesel::update(software_assets::table.find(asset_id))
            .set(software_assets::status.eq(status.as_str()))
            .execute(&mut conn)
            .map_err(map_diesel_error)?;
        if affected == 0 {
            return Err(RepositoryError::missing("software asset", asset_id));
        }
        let row = software_assets::table
            .find(asset_id)
            .select(SoftwareAssetRow::as_select())
            .first(&mut conn)
            .optional()
            .map_err(map_diesel_error)?
            .ok_or_else(|| RepositoryError::missing("software asset", asset_id))?;
        row_to_asset(row)
    }
}
