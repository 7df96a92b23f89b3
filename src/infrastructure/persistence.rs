use crate::domain::Catalog;
use std::fs;
use std::path::Path;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("Cannot read catalog: {0}")]
    Io(#[from] std::io::Error),
    #[error("Invalid catalog format - {0}")]
    Format(#[from] serde_json::Error),
}

pub struct CatalogRepository;

impl CatalogRepository {
    pub fn load_catalog(path: &Path) -> Result<Catalog, CatalogError> {
        let content = fs::read_to_string(path)?;
        Ok(serde_json::from_str::<Catalog>(&content)?)
    }

    pub fn save_catalog(catalog: &Catalog, path: &Path) -> Result<(), CatalogError> {
        let json = serde_json::to_string_pretty(catalog)?;
        fs::write(path, json)?;
        Ok(())
    }
}
