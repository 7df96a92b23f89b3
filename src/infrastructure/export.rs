//! Kitchen manifest export.

use std::path::Path;

use serde::Serialize;
use thiserror::Error;
use tracing::info;

use crate::domain::{Catalog, Entity, OrderPayload};

#[derive(Debug, Error)]
pub enum ExportError {
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ManifestRow {
    pub entity: Entity,
    pub employee_name: String,
    pub menu_item_id: String,
    pub menu_name: String,
    pub quantity: u32,
}

pub struct ManifestExporter;

impl ManifestExporter {
    /// One row per ordered item, with menu names resolved from the catalog.
    pub fn rows(payload: &OrderPayload, catalog: &Catalog) -> Vec<ManifestRow> {
        payload
            .employee_orders
            .iter()
            .flat_map(|order| {
                order.items.iter().map(move |item| ManifestRow {
                    entity: order.entity,
                    employee_name: order.employee_name.clone(),
                    menu_item_id: item.menu_item_id.clone(),
                    menu_name: catalog
                        .menu_item(&item.menu_item_id)
                        .map(|menu| menu.name.clone())
                        .unwrap_or_default(),
                    quantity: item.quantity,
                })
            })
            .collect()
    }

    pub fn export_manifest(
        payload: &OrderPayload,
        catalog: &Catalog,
        filename: &str,
    ) -> Result<String, ExportError> {
        let rows = Self::rows(payload, catalog);
        let mut writer = csv::Writer::from_path(Path::new(filename))?;
        for row in &rows {
            writer.serialize(row)?;
        }
        writer.flush()?;
        info!(rows = rows.len(), filename, "manifest exported");
        Ok(filename.to_string())
    }
}
