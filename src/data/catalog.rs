use std::path::{Path, PathBuf};
use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::data::glass::Glass;
use crate::error::CatalogError;

const SAMPLE_CATALOG: &str = include_str!("../../catalogs/sample.json");

/// Where a catalog came from, so sessions can reload it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum CatalogSource {
    Builtin,
    File(PathBuf),
}

/// On-disk shape of a catalog file.
#[derive(Debug, Deserialize)]
struct CatalogFile {
    name: String,
    #[serde(default)]
    supplier: Option<String>,
    glasses: Vec<Glass>,
}

/// A named collection of glasses from one vendor.
#[derive(Debug, Clone)]
pub struct GlassCatalog {
    pub name: String,
    pub source: CatalogSource,
    glasses: Vec<Arc<Glass>>,
}

impl GlassCatalog {
    /// The sample catalog shipped inside the binary.
    pub fn builtin() -> Result<Self, CatalogError> {
        Self::from_json(SAMPLE_CATALOG, CatalogSource::Builtin)
    }

    pub fn load(path: &Path) -> Result<Self, CatalogError> {
        let text = std::fs::read_to_string(path).map_err(|source| CatalogError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let catalog = Self::from_json(&text, CatalogSource::File(path.to_path_buf()))?;
        tracing::info!(
            "Loaded catalog {} ({} glasses) from {:?}",
            catalog.name,
            catalog.len(),
            path
        );
        Ok(catalog)
    }

    pub fn from_json(text: &str, source: CatalogSource) -> Result<Self, CatalogError> {
        let file: CatalogFile = serde_json::from_str(text).map_err(|e| CatalogError::Parse {
            path: match &source {
                CatalogSource::File(p) => p.clone(),
                CatalogSource::Builtin => PathBuf::from("<builtin>"),
            },
            source: e,
        })?;
        if file.glasses.is_empty() {
            return Err(CatalogError::Empty(file.name));
        }

        let supplier = file.supplier.unwrap_or_else(|| file.name.clone());
        let glasses = file
            .glasses
            .into_iter()
            .map(|mut g| {
                if g.supplier.is_empty() {
                    g.supplier = supplier.clone();
                }
                g.sort_transmittance();
                Arc::new(g)
            })
            .collect();

        Ok(Self {
            name: file.name,
            source,
            glasses,
        })
    }

    pub fn glass(&self, name: &str) -> Option<Arc<Glass>> {
        self.glasses.iter().find(|g| g.name == name).cloned()
    }

    pub fn glasses(&self) -> &[Arc<Glass>] {
        &self.glasses
    }

    pub fn glass_names(&self) -> impl Iterator<Item = &str> {
        self.glasses.iter().map(|g| g.name.as_str())
    }

    pub fn len(&self) -> usize {
        self.glasses.len()
    }
}

/// Find a glass by catalog and glass name across a catalog list.
pub fn find_glass(catalogs: &[GlassCatalog], catalog: &str, glass: &str) -> Option<Arc<Glass>> {
    catalogs
        .iter()
        .find(|c| c.name == catalog)
        .and_then(|c| c.glass(glass))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builtin_catalog_parses() {
        let catalog = GlassCatalog::builtin().expect("sample catalog");
        assert_eq!(catalog.source, CatalogSource::Builtin);
        assert!(catalog.len() >= 3);

        let bk7 = catalog.glass("N-BK7").expect("N-BK7 present");
        assert!(bk7.has_thermal_data());
        assert!(bk7.has_transmittance_data());
        assert!(!bk7.supplier().is_empty());
    }

    #[test]
    fn builtin_catalog_contains_a_glass_without_thermal_data() {
        let catalog = GlassCatalog::builtin().expect("sample catalog");
        assert!(catalog.glasses().iter().any(|g| !g.has_thermal_data()));
    }

    #[test]
    fn null_coefficients_and_default_supplier() {
        let json = r#"{
            "name": "TEST",
            "glasses": [
                {
                    "name": "X1",
                    "dispersion": { "formula": "schott", "a": [2.27, -0.01, 0.01, 0.0, 0.0, 0.0] },
                    "thermal": { "d0": 1e-6, "d1": null },
                    "transmittance": [
                        { "wavelength": 0.5, "tau": 0.9, "thickness": 10.0 },
                        { "wavelength": 0.4, "tau": 0.8, "thickness": 10.0 }
                    ]
                }
            ]
        }"#;
        let catalog = GlassCatalog::from_json(json, CatalogSource::Builtin).expect("parse");
        let glass = catalog.glass("X1").expect("X1");
        assert_eq!(glass.supplier(), "TEST");
        assert!(glass.thermal_data()[1].is_nan());
        assert_eq!(glass.transmittance[0].wavelength, 0.4);
        assert!(catalog.glass("X2").is_none());
    }

    #[test]
    fn empty_catalog_is_rejected() {
        let err = GlassCatalog::from_json(r#"{"name":"E","glasses":[]}"#, CatalogSource::Builtin)
            .unwrap_err();
        assert!(matches!(err, CatalogError::Empty(name) if name == "E"));
    }

    #[test]
    fn missing_file_reports_io_error() {
        let err = GlassCatalog::load(Path::new("/nonexistent/catalog.json")).unwrap_err();
        assert!(matches!(err, CatalogError::Io { .. }));
    }

    #[test]
    fn find_glass_by_catalog_and_name() {
        let catalogs = vec![GlassCatalog::builtin().expect("sample catalog")];
        let name = catalogs[0].name.clone();
        assert!(find_glass(&catalogs, &name, "N-BK7").is_some());
        assert!(find_glass(&catalogs, "OTHER", "N-BK7").is_none());
    }
}
