use std::path::{Path, PathBuf};
use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::data::catalog::{find_glass, CatalogSource, GlassCatalog};
use crate::data::glass::Glass;
use crate::error::CatalogError;
use crate::state::dndt_form::DnDtPlotForm;
use crate::state::plot_form::{AxisFields, PropertyPlotForm};
use crate::state::transmittance_form::TransmittancePlotForm;

pub const VERSION: &str = env!("CARGO_PKG_VERSION");

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Theme {
    #[default]
    Dark,
    Light,
}

impl Theme {
    pub fn toggle(self) -> Self {
        match self {
            Theme::Dark => Theme::Light,
            Theme::Light => Theme::Dark,
        }
    }

    pub fn visuals(self) -> egui::Visuals {
        match self {
            Theme::Dark => egui::Visuals::dark(),
            Theme::Light => egui::Visuals::light(),
        }
    }

    /// Button text offering the other theme.
    pub fn switch_label(self) -> &'static str {
        match self {
            Theme::Dark => "Light Mode",
            Theme::Light => "Dark Mode",
        }
    }
}

/// A glass referenced by catalog and glass name.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GlassKey {
    pub catalog: String,
    pub glass: String,
}

/// Shared form settings stored in a session.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FormSession {
    pub axis: AxisFields,
    pub digits: usize,
    pub legend_visible: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DnDtSession {
    pub form: FormSession,
    pub glass: Option<GlassKey>,
    pub wavelengths: Vec<f64>,
    pub step: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TransmittanceSession {
    pub form: FormSession,
    pub glasses: Vec<GlassKey>,
    pub thickness: String,
}

/// Everything written by "Save Session".
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Session {
    pub theme: Theme,
    pub catalog_files: Vec<PathBuf>,
    pub dndt: DnDtSession,
    pub transmittance: TransmittanceSession,
}

impl Session {
    pub fn save(&self, path: &Path) -> Result<(), CatalogError> {
        let json = serde_json::to_string_pretty(self).map_err(|source| CatalogError::Parse {
            path: path.to_path_buf(),
            source,
        })?;
        std::fs::write(path, json).map_err(|source| CatalogError::Io {
            path: path.to_path_buf(),
            source,
        })
    }

    pub fn load(path: &Path) -> Result<Self, CatalogError> {
        let json = std::fs::read_to_string(path).map_err(|source| CatalogError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        serde_json::from_str(&json).map_err(|source| CatalogError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }
}

/// Which form the central panel shows.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormTab {
    DnDt,
    Transmittance,
}

pub struct AppState {
    pub catalogs: Vec<GlassCatalog>,
    pub dndt: DnDtPlotForm,
    pub transmittance: TransmittancePlotForm,
    pub theme: Theme,
    pub tab: FormTab,
}

impl AppState {
    pub fn new(catalogs: Vec<GlassCatalog>) -> Self {
        Self {
            catalogs,
            dndt: DnDtPlotForm::new(),
            transmittance: TransmittancePlotForm::new(),
            theme: Theme::default(),
            tab: FormTab::DnDt,
        }
    }

    /// Load a catalog file, replacing an already loaded catalog of the same
    /// name.
    pub fn load_catalog(&mut self, path: &Path) -> Result<(), CatalogError> {
        let catalog = GlassCatalog::load(path)?;
        self.add_catalog(catalog);
        Ok(())
    }

    pub fn add_catalog(&mut self, catalog: GlassCatalog) {
        match self.catalogs.iter_mut().find(|c| c.name == catalog.name) {
            Some(existing) => *existing = catalog,
            None => self.catalogs.push(catalog),
        }
    }

    /// Catalog key of a glass held by a form. A glass from a catalog that has
    /// since been reloaded is matched by name and supplier.
    fn key_for(&self, glass: &Glass) -> Option<GlassKey> {
        let key = |c: &GlassCatalog| GlassKey {
            catalog: c.name.clone(),
            glass: glass.name.clone(),
        };
        let same = self.catalogs.iter().find(|c| {
            c.glasses()
                .iter()
                .any(|g| std::ptr::eq(Arc::as_ptr(g), glass))
        });
        let found = same.or_else(|| {
            self.catalogs.iter().find(|c| {
                c.glass(glass.name())
                    .is_some_and(|g| g.supplier() == glass.supplier())
            })
        });
        if found.is_none() {
            tracing::warn!("{} is in no loaded catalog", glass.display_name());
        }
        found.map(key)
    }

    pub fn session(&self) -> Session {
        Session {
            theme: self.theme,
            catalog_files: self
                .catalogs
                .iter()
                .filter_map(|c| match &c.source {
                    CatalogSource::File(path) => Some(path.clone()),
                    CatalogSource::Builtin => None,
                })
                .collect(),
            dndt: DnDtSession {
                form: form_session(&self.dndt),
                glass: self.dndt.glass().and_then(|g| self.key_for(g)),
                wavelengths: self.dndt.wavelengths().to_vec(),
                step: self.dndt.step_text.clone(),
            },
            transmittance: TransmittanceSession {
                form: form_session(&self.transmittance),
                glasses: self
                    .transmittance
                    .glasses()
                    .iter()
                    .filter_map(|g| self.key_for(g))
                    .collect(),
                thickness: self.transmittance.thickness_text.clone(),
            },
        }
    }

    /// Apply a saved session. Catalog files that fail to load and glasses that
    /// can no longer be found are skipped and reported in the returned list.
    pub fn restore(&mut self, session: Session) -> Vec<String> {
        let mut problems = Vec::new();
        self.theme = session.theme;

        for path in &session.catalog_files {
            if let Err(e) = self.load_catalog(path) {
                tracing::error!("Failed to reload catalog: {e}");
                problems.push(e.to_string());
            }
        }

        let mut resolve = |key: &GlassKey| {
            let found = find_glass(&self.catalogs, &key.catalog, &key.glass);
            if found.is_none() {
                problems.push(format!("{} not found in {}", key.glass, key.catalog));
            }
            found
        };

        let dndt_glass = session.dndt.glass.as_ref().and_then(&mut resolve);
        let transmittance_glasses: Vec<_> = session
            .transmittance
            .glasses
            .iter()
            .filter_map(&mut resolve)
            .collect();

        let mut dndt = DnDtPlotForm::new();
        restore_form(&mut dndt, &session.dndt.form);
        dndt.step_text = session.dndt.step.clone();
        if let Some(glass) = dndt_glass {
            if let Err(e) = dndt.set_glass(glass) {
                problems.push(e.to_string());
            } else {
                // set_glass fits the axes; the saved ones win.
                restore_form(&mut dndt, &session.dndt.form);
                dndt.set_wavelengths(session.dndt.wavelengths.clone());
            }
        }
        self.dndt = dndt;

        let mut transmittance = TransmittancePlotForm::new();
        restore_form(&mut transmittance, &session.transmittance.form);
        transmittance.thickness_text = session.transmittance.thickness.clone();
        transmittance.set_glasses(transmittance_glasses);
        self.transmittance = transmittance;

        problems
    }
}

fn form_session(form: &dyn PropertyPlotForm) -> FormSession {
    let base = form.base();
    FormSession {
        axis: base.axis_fields.clone(),
        digits: base.digits,
        legend_visible: base.legend_visible,
    }
}

fn restore_form(form: &mut dyn PropertyPlotForm, saved: &FormSession) {
    let base = form.base_mut();
    base.axis_fields = saved.axis.clone();
    base.digits = saved.digits;
    base.apply_axis_fields();
    form.set_legend_visible(saved.legend_visible);
}

#[cfg(test)]
mod tests {
    use super::*;

    fn state() -> AppState {
        AppState::new(vec![GlassCatalog::builtin().expect("sample catalog")])
    }

    #[test]
    fn theme_toggles() {
        assert_eq!(Theme::Dark.toggle(), Theme::Light);
        assert_eq!(Theme::Light.toggle().toggle(), Theme::Light);
    }

    #[test]
    fn session_round_trip_restores_forms() {
        let mut app = state();
        let catalog = app.catalogs[0].name.clone();
        let bk7 = app.catalogs[0].glass("N-BK7").expect("N-BK7");
        let f2 = app.catalogs[0].glass("F2").expect("F2");

        app.dndt.set_glass(bk7.clone()).expect("glass");
        app.dndt.add_graph(700.0).expect("add");
        app.dndt.base.axis_fields.x_min = "-20".into();
        app.dndt.base.axis_fields.x_max = "60".into();
        app.dndt.set_axis();
        app.dndt.set_legend_visible(false);
        app.transmittance.add_graph(f2).expect("add");
        app.transmittance.thickness_text = "25".into();
        app.theme = Theme::Light;

        let session = app.session();
        assert_eq!(
            session.dndt.glass,
            Some(GlassKey { catalog: catalog.clone(), glass: "N-BK7".into() })
        );
        assert_eq!(session.transmittance.glasses.len(), 1);
        assert!(session.catalog_files.is_empty());

        let json = serde_json::to_string(&session).expect("serialize");
        let decoded: Session = serde_json::from_str(&json).expect("deserialize");
        assert_eq!(decoded, session);

        let mut fresh = state();
        let problems = fresh.restore(decoded);
        assert!(problems.is_empty(), "{problems:?}");
        assert_eq!(fresh.theme, Theme::Light);
        assert_eq!(fresh.dndt.wavelengths(), app.dndt.wavelengths());
        assert_eq!(fresh.dndt.base.x_range, app.dndt.base.x_range);
        assert!(!fresh.dndt.base.legend_visible);
        assert_eq!(fresh.dndt.base.series.len(), 6);
        assert_eq!(fresh.transmittance.glasses().len(), 1);
        assert_eq!(fresh.transmittance.thickness_text, "25");
    }

    #[test]
    fn restore_reports_missing_glasses() {
        let mut app = state();
        let mut session = app.session();
        session.dndt.glass = Some(GlassKey { catalog: "NONE".into(), glass: "X".into() });
        let problems = app.restore(session);
        assert_eq!(problems.len(), 1);
        assert!(app.dndt.glass().is_none());
    }

    #[test]
    fn session_file_round_trip() {
        let app = state();
        let path = std::env::temp_dir().join(format!("glassplot-session-{}.json", std::process::id()));
        app.session().save(&path).expect("save");
        let loaded = Session::load(&path).expect("load");
        assert_eq!(loaded, app.session());
        let _ = std::fs::remove_file(&path);
    }

    #[test]
    fn session_keeps_glasses_after_catalog_reload() {
        let mut app = state();
        let catalog = app.catalogs[0].name.clone();
        let bk7 = app.catalogs[0].glass("N-BK7").expect("N-BK7");
        app.dndt.set_glass(bk7.clone()).expect("glass");
        app.transmittance.add_graph(bk7).expect("add");

        app.add_catalog(GlassCatalog::builtin().expect("sample catalog"));
        let session = app.session();
        assert_eq!(
            session.dndt.glass,
            Some(GlassKey { catalog, glass: "N-BK7".into() })
        );
        assert_eq!(session.transmittance.glasses.len(), 1);
    }

    #[test]
    fn unknown_glass_is_left_out_of_session() {
        let mut app = state();
        let mut stray = (*app.catalogs[0].glass("F2").expect("F2")).clone();
        stray.name = "STRAY".into();
        app.dndt.set_glass(Arc::new(stray)).expect("glass");
        assert_eq!(app.session().dndt.glass, None);
    }

    #[test]
    fn adding_catalog_with_same_name_replaces_it() {
        let mut app = state();
        app.add_catalog(GlassCatalog::builtin().expect("sample catalog"));
        assert_eq!(app.catalogs.len(), 1);
    }
}
