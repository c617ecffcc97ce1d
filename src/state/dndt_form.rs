use std::sync::Arc;

use crate::data::catalog::GlassCatalog;
use crate::data::glass::Glass;
use crate::error::FormError;
use crate::processing::sampling::{scale_vector, vector_from_range, AxisRange};
use crate::state::data_series::{color_from_index, PlotSeries};
use crate::state::plot_form::{format_general, parse_or_zero, PlotData, PlotFormState, PropertyPlotForm};

/// Wavelengths (nm) plotted right after a glass is chosen.
pub const DEFAULT_WAVELENGTHS: [f64; 5] = [435.8, 546.1, 587.0, 852.1, 1060.0];
pub const MAX_WAVELENGTH_NM: f64 = 10000.0;
/// Curves whose name is within this distance of a tracked wavelength match it.
const WAVELENGTH_TOLERANCE: f64 = 0.1;

/// The catalog entry picked in the glass-selection dialog.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GlassSelection {
    pub catalog_index: usize,
    pub glass_name: String,
}

impl GlassSelection {
    pub fn resolve(&self, catalogs: &[GlassCatalog]) -> Result<Arc<Glass>, FormError> {
        let catalog = catalogs
            .get(self.catalog_index)
            .ok_or(FormError::CatalogOutOfRange(self.catalog_index))?;
        catalog.glass(&self.glass_name).ok_or_else(|| FormError::GlassNotFound {
            catalog: catalog.name.clone(),
            glass: self.glass_name.clone(),
        })
    }
}

/// Curves of absolute dn/dT (in 1e-6/K) over temperature, one per wavelength.
pub fn build_dndt_plot(
    glass: &Glass,
    wavelengths: &[f64],
    temperatures: &[f64],
    max_graph_count: usize,
    digits: usize,
) -> PlotData {
    let mut series = Vec::with_capacity(wavelengths.len());
    let mut columns = Vec::with_capacity(wavelengths.len());

    for (i, &wvl) in wavelengths.iter().enumerate() {
        let values = scale_vector(&glass.dn_dt_abs(temperatures, wvl / 1000.0), 1e6);
        let name = format_general(wvl);
        columns.push((format!("{name}nm"), values.clone()));
        series.push(PlotSeries::new(
            name,
            temperatures.to_vec(),
            values,
            color_from_index(i, max_graph_count),
        ));
    }

    PlotData::from_columns(temperatures, "Temperature", columns, series, digits)
}

/// Dn/Dt(abs) plot form: one glass, many wavelengths.
#[derive(Debug, Clone)]
pub struct DnDtPlotForm {
    pub base: PlotFormState,
    glass: Option<Arc<Glass>>,
    /// Tracked wavelengths in nm, in plot/column order. Duplicates allowed.
    wavelengths: Vec<f64>,
    /// Temperature step text field.
    pub step_text: String,
}

impl DnDtPlotForm {
    pub fn new() -> Self {
        Self {
            base: PlotFormState::new(
                "Dn/Dt(abs) Plot",
                "Temperature(C)",
                "Dn/Dt(abs)  [10^(-6) /K]",
                AxisRange::new(-100.0, 140.0),
                AxisRange::new(0.0, 23.0),
                7,
            ),
            glass: None,
            wavelengths: Vec::new(),
            step_text: "5".to_string(),
        }
    }

    pub fn glass(&self) -> Option<&Arc<Glass>> {
        self.glass.as_ref()
    }

    pub fn wavelengths(&self) -> &[f64] {
        &self.wavelengths
    }

    /// Label next to the "Set Glass" button.
    pub fn glass_label(&self) -> String {
        self.glass
            .as_ref()
            .map(|g| g.display_name())
            .unwrap_or_default()
    }

    /// Make `glass` current. Glasses with incomplete thermal data are rejected
    /// and leave the form untouched. On success the default wavelengths are
    /// plotted and the y axis is fitted to them.
    pub fn set_glass(&mut self, glass: Arc<Glass>) -> Result<(), FormError> {
        if !glass.has_thermal_data() {
            tracing::warn!("{} has no thermal data", glass.display_name());
            return Err(FormError::MissingThermalData);
        }

        self.clear_all();
        tracing::info!("Dn/Dt plot glass set to {}", glass.display_name());
        self.glass = Some(glass);
        self.wavelengths = DEFAULT_WAVELENGTHS.to_vec();
        self.update_all();

        self.base.rescale_y();
        self.base.write_axis_fields(1);
        Ok(())
    }

    pub fn apply_selection(
        &mut self,
        catalogs: &[GlassCatalog],
        selection: &GlassSelection,
    ) -> Result<(), FormError> {
        let glass = selection.resolve(catalogs)?;
        self.set_glass(glass)
    }

    /// Check that a wavelength may be added before asking for one.
    pub fn begin_add_graph(&self) -> Result<(), FormError> {
        if self.glass.is_none() {
            return Err(FormError::NoGlassSelected);
        }
        Ok(())
    }

    /// Track another wavelength (nm). Clamped to `[0, 10000]`, two decimals.
    pub fn add_graph(&mut self, wavelength_nm: f64) -> Result<(), FormError> {
        self.begin_add_graph()?;
        let wvl = (wavelength_nm.clamp(0.0, MAX_WAVELENGTH_NM) * 100.0).round() / 100.0;
        self.wavelengths.push(wvl);
        self.update_all();
        Ok(())
    }

    /// Replace the tracked wavelengths, e.g. when restoring a session.
    pub fn set_wavelengths(&mut self, wavelengths: Vec<f64>) {
        self.wavelengths = wavelengths;
        self.update_all();
    }
}

impl Default for DnDtPlotForm {
    fn default() -> Self {
        Self::new()
    }
}

impl PropertyPlotForm for DnDtPlotForm {
    fn base(&self) -> &PlotFormState {
        &self.base
    }

    fn base_mut(&mut self) -> &mut PlotFormState {
        &mut self.base
    }

    fn update_all(&mut self) {
        let Some(glass) = self.glass.clone() else {
            return;
        };
        let step = parse_or_zero(&self.step_text);
        let temperatures = vector_from_range(self.base.x_range, step);
        let data = build_dndt_plot(
            &glass,
            &self.wavelengths,
            &temperatures,
            self.base.max_graph_count,
            self.base.digits,
        );
        self.base.apply_plot(data);
    }

    fn clear_all(&mut self) {
        self.wavelengths.clear();
        self.base.clear_plot();
    }

    fn delete_graph(&mut self) {
        let Some(name) = self.base.selected_series.clone() else {
            return;
        };
        let target = parse_or_zero(&name);
        if let Some(pos) = self
            .wavelengths
            .iter()
            .position(|w| (w - target).abs() < WAVELENGTH_TOLERANCE)
        {
            let removed = self.wavelengths.remove(pos);
            tracing::info!("Removed {removed} nm from Dn/Dt plot");
        }
        self.update_all();
    }
}
