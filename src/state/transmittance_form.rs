use std::sync::Arc;

use crate::data::glass::Glass;
use crate::error::FormError;
use crate::processing::sampling::{vector_from_range, AxisRange};
use crate::state::data_series::{color_from_index, PlotSeries};
use crate::state::plot_form::{parse_or_zero, PlotData, PlotFormState, PropertyPlotForm};

/// Wavelength step of the sample grid, nm.
pub const PLOT_STEP_NM: f64 = 5.0;
pub const MAX_GRAPH_COUNT: usize = 5;

/// Internal transmittance over wavelength (nm), one curve per glass.
pub fn build_transmittance_plot(
    glasses: &[Arc<Glass>],
    wavelengths_nm: &[f64],
    thickness_mm: f64,
    max_graph_count: usize,
    digits: usize,
) -> PlotData {
    let wavelengths_um: Vec<f64> = wavelengths_nm.iter().map(|w| w / 1000.0).collect();

    let mut series = Vec::with_capacity(glasses.len());
    let mut columns = Vec::with_capacity(glasses.len());
    for (i, glass) in glasses.iter().enumerate() {
        let values = glass.transmittance_curve(&wavelengths_um, thickness_mm);
        let name = glass.display_name();
        columns.push((name.clone(), values.clone()));
        series.push(PlotSeries::new(
            name,
            wavelengths_nm.to_vec(),
            values,
            color_from_index(i, max_graph_count),
        ));
    }

    PlotData::from_columns(wavelengths_nm, "Wavelength", columns, series, digits)
}

/// Transmittance plot form: several glasses, one thickness.
#[derive(Debug, Clone)]
pub struct TransmittancePlotForm {
    pub base: PlotFormState,
    glasses: Vec<Arc<Glass>>,
    /// Sample thickness text field, mm.
    pub thickness_text: String,
}

impl TransmittancePlotForm {
    pub fn new() -> Self {
        Self {
            base: PlotFormState::new(
                "Transmittance Plot",
                "Wavelength(nm)",
                "Internal Transmittance",
                AxisRange::new(300.0, 2000.0),
                AxisRange::new(0.0, 1.2),
                MAX_GRAPH_COUNT,
            ),
            glasses: Vec::new(),
            thickness_text: "10".to_string(),
        }
    }

    pub fn glasses(&self) -> &[Arc<Glass>] {
        &self.glasses
    }

    /// Check that another glass may be added before opening the dialog.
    pub fn begin_add_graph(&self) -> Result<(), FormError> {
        if self.glasses.len() >= MAX_GRAPH_COUNT {
            return Err(FormError::TooManyGraphs);
        }
        Ok(())
    }

    pub fn add_graph(&mut self, glass: Arc<Glass>) -> Result<(), FormError> {
        self.begin_add_graph()?;
        if !glass.has_transmittance_data() {
            tracing::warn!("{} has no transmittance data", glass.display_name());
            return Err(FormError::MissingTransmittanceData);
        }
        tracing::info!("Added {} to transmittance plot", glass.display_name());
        self.glasses.push(glass);
        self.update_all();
        Ok(())
    }

    /// Replace the tracked glasses, e.g. when restoring a session.
    pub fn set_glasses(&mut self, glasses: Vec<Arc<Glass>>) {
        self.glasses = glasses;
        self.glasses.truncate(MAX_GRAPH_COUNT);
        self.update_all();
    }
}

impl Default for TransmittancePlotForm {
    fn default() -> Self {
        Self::new()
    }
}

impl PropertyPlotForm for TransmittancePlotForm {
    fn base(&self) -> &PlotFormState {
        &self.base
    }

    fn base_mut(&mut self) -> &mut PlotFormState {
        &mut self.base
    }

    fn update_all(&mut self) {
        if self.glasses.is_empty() {
            self.base.clear_plot();
            return;
        }
        let thickness = parse_or_zero(&self.thickness_text);
        let wavelengths = vector_from_range(self.base.x_range, PLOT_STEP_NM);
        let data = build_transmittance_plot(
            &self.glasses,
            &wavelengths,
            thickness,
            self.base.max_graph_count,
            self.base.digits,
        );
        self.base.apply_plot(data);
    }

    fn clear_all(&mut self) {
        self.glasses.clear();
        self.base.clear_plot();
    }

    fn delete_graph(&mut self) {
        let Some(name) = self.base.selected_series.clone() else {
            return;
        };
        if let Some(pos) = self.glasses.iter().position(|g| g.display_name() == name) {
            let removed = self.glasses.remove(pos);
            tracing::info!("Removed {} from transmittance plot", removed.display_name());
        }
        self.update_all();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::glass::tests::{n_bk7, without_thermal_data};

    fn glass(name: &str) -> Arc<Glass> {
        let mut g = n_bk7();
        g.name = name.to_string();
        Arc::new(g)
    }

    #[test]
    fn one_curve_and_column_per_glass() {
        let mut form = TransmittancePlotForm::new();
        form.add_graph(glass("A")).expect("add");
        form.add_graph(glass("B")).expect("add");

        assert_eq!(form.base.series.len(), 2);
        assert_eq!(form.base.table.column_count(), 3);
        assert_eq!(form.base.table.headers, vec!["Wavelength", "A_SCHOTT", "B_SCHOTT"]);
        // 300..=2000 nm every 5 nm
        assert_eq!(form.base.table.row_count(), 341);
        assert_eq!(form.base.series[0].x[0], 300.0);
    }

    #[test]
    fn thickness_changes_values() {
        let mut form = TransmittancePlotForm::new();
        form.add_graph(glass("A")).expect("add");
        let at_10mm = form.base.series[0].y[0];

        form.thickness_text = "25".into();
        form.update_all();
        let at_25mm = form.base.series[0].y[0];
        assert!((at_25mm - 0.29).abs() < 1e-9);
        assert!(at_10mm > at_25mm);
    }

    #[test]
    fn beyond_measured_range_is_nan_in_table() {
        let mut form = TransmittancePlotForm::new();
        form.add_graph(glass("A")).expect("add");
        let last = form.base.table.row_count() - 1;
        assert_eq!(form.base.table.item(last, 1), Some("NaN"));
    }

    #[test]
    fn max_graph_count_is_enforced() {
        let mut form = TransmittancePlotForm::new();
        for i in 0..MAX_GRAPH_COUNT {
            form.add_graph(glass(&format!("G{i}"))).expect("add");
        }
        assert_eq!(form.begin_add_graph(), Err(FormError::TooManyGraphs));
        assert_eq!(form.add_graph(glass("X")), Err(FormError::TooManyGraphs));
        assert_eq!(form.glasses().len(), MAX_GRAPH_COUNT);
    }

    #[test]
    fn glass_without_transmittance_is_rejected() {
        let mut form = TransmittancePlotForm::new();
        assert_eq!(
            form.add_graph(Arc::new(without_thermal_data())),
            Err(FormError::MissingTransmittanceData)
        );
        assert!(form.glasses().is_empty());
    }

    #[test]
    fn delete_selected_glass() {
        let mut form = TransmittancePlotForm::new();
        form.add_graph(glass("A")).expect("add");
        form.add_graph(glass("B")).expect("add");
        form.add_graph(glass("A")).expect("add");

        form.delete_graph();
        assert_eq!(form.glasses().len(), 3);

        form.base.selected_series = Some("A_SCHOTT".into());
        form.delete_graph();
        let names: Vec<_> = form.glasses().iter().map(|g| g.name().to_string()).collect();
        assert_eq!(names, vec!["B", "A"]);
        assert_eq!(form.base.series.len(), 2);
    }

    #[test]
    fn clear_then_delete_leaves_empty_plot() {
        let mut form = TransmittancePlotForm::new();
        form.add_graph(glass("A")).expect("add");
        form.clear_all();
        assert!(form.glasses().is_empty());
        assert!(form.base.series.is_empty());
        assert!(form.base.table.is_empty());
    }
}
