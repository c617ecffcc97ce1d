use serde::{Deserialize, Serialize};

use crate::processing::sampling::AxisRange;
use crate::state::data_series::PlotSeries;
use crate::state::data_table::DataTable;

/// Parse a numeric text field. Anything that is not a number reads as 0.
pub fn parse_or_zero(text: &str) -> f64 {
    match text.trim().parse::<f64>() {
        Ok(v) => v,
        Err(_) => {
            tracing::debug!("Non-numeric field {text:?} read as 0");
            0.0
        }
    }
}

/// Shortest readable rendering of a number: up to six decimals, trailing
/// zeros dropped (`-100`, `435.8`, `0.3`).
pub fn format_general(value: f64) -> String {
    if !value.is_finite() {
        return format!("{value}");
    }
    let s = format!("{value:.6}");
    let s = s.trim_end_matches('0').trim_end_matches('.');
    if s == "-0" {
        "0".to_string()
    } else {
        s.to_string()
    }
}

/// The four axis-bound text boxes.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AxisFields {
    pub x_min: String,
    pub x_max: String,
    pub y_min: String,
    pub y_max: String,
}

impl AxisFields {
    pub fn from_ranges(x: AxisRange, y: AxisRange, format: impl Fn(f64) -> String) -> Self {
        Self {
            x_min: format(x.lower),
            x_max: format(x.upper),
            y_min: format(y.lower),
            y_max: format(y.upper),
        }
    }

    pub fn x_range(&self) -> AxisRange {
        AxisRange::new(parse_or_zero(&self.x_min), parse_or_zero(&self.x_max))
    }

    pub fn y_range(&self) -> AxisRange {
        AxisRange::new(parse_or_zero(&self.y_min), parse_or_zero(&self.y_max))
    }
}

/// Output of a full rebuild: every curve and the matching table.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PlotData {
    pub series: Vec<PlotSeries>,
    pub table: DataTable,
}

impl PlotData {
    /// Lay out a table for `grid` with one value column per curve. The first
    /// column holds the grid itself, values use `digits` decimals.
    pub fn from_columns(
        grid: &[f64],
        x_header: &str,
        columns: Vec<(String, Vec<f64>)>,
        series: Vec<PlotSeries>,
        digits: usize,
    ) -> Self {
        let mut table = DataTable::with_size(grid.len(), columns.len() + 1);
        for (row, &x) in grid.iter().enumerate() {
            table.add_table_item(row, 0, format_general(x));
        }

        let mut headers = vec![x_header.to_string()];
        for (col, (header, values)) in columns.into_iter().enumerate() {
            headers.push(header);
            for (row, y) in values.iter().enumerate() {
                table.add_table_item(row, col + 1, format!("{y:.digits$}"));
            }
        }
        table.set_horizontal_header_labels(headers);

        Self { series, table }
    }
}

/// State shared by every property plot: chart range, axis fields, legend,
/// curves and table.
#[derive(Debug, Clone)]
pub struct PlotFormState {
    pub title: String,
    pub x_label: String,
    pub y_label: String,
    pub default_x_range: AxisRange,
    pub default_y_range: AxisRange,
    /// Range currently shown by the chart.
    pub x_range: AxisRange,
    pub y_range: AxisRange,
    /// Set when the range changed from code and must be pushed to the chart.
    pub bounds_dirty: bool,
    pub axis_fields: AxisFields,
    pub legend_visible: bool,
    /// Decimal places for table values.
    pub digits: usize,
    /// Span of the color gradient.
    pub max_graph_count: usize,
    pub series: Vec<PlotSeries>,
    pub table: DataTable,
    /// Name of the curve picked in the chart, if any.
    pub selected_series: Option<String>,
}

impl PlotFormState {
    pub fn new(
        title: &str,
        x_label: &str,
        y_label: &str,
        default_x_range: AxisRange,
        default_y_range: AxisRange,
        max_graph_count: usize,
    ) -> Self {
        let mut state = Self {
            title: title.to_string(),
            x_label: x_label.to_string(),
            y_label: y_label.to_string(),
            default_x_range,
            default_y_range,
            x_range: default_x_range,
            y_range: default_y_range,
            bounds_dirty: true,
            axis_fields: AxisFields::default(),
            legend_visible: true,
            digits: 3,
            max_graph_count,
            series: Vec::new(),
            table: DataTable::default(),
            selected_series: None,
        };
        state.set_default();
        state
    }

    /// Read the four axis fields into the chart range. A reversed min/max pair
    /// is swapped, in the fields too, so they match what the chart shows.
    pub fn apply_axis_fields(&mut self) {
        let fields = &mut self.axis_fields;
        if fields.x_range().is_inverted() {
            std::mem::swap(&mut fields.x_min, &mut fields.x_max);
        }
        if fields.y_range().is_inverted() {
            std::mem::swap(&mut fields.y_min, &mut fields.y_max);
        }
        self.x_range = fields.x_range();
        self.y_range = fields.y_range();
        self.bounds_dirty = true;
    }

    /// Reset the chart range and the axis fields to the form defaults.
    pub fn set_default(&mut self) {
        self.x_range = self.default_x_range;
        self.y_range = self.default_y_range;
        self.axis_fields =
            AxisFields::from_ranges(self.default_x_range, self.default_y_range, format_general);
        self.bounds_dirty = true;
    }

    /// Write the current chart range into the axis fields with fixed decimals.
    pub fn write_axis_fields(&mut self, decimals: usize) {
        self.axis_fields = AxisFields::from_ranges(self.x_range, self.y_range, |v| {
            format!("{v:.decimals$}")
        });
    }

    /// Fit the y range to the data of every curve.
    pub fn rescale_y(&mut self) {
        let extent = self
            .series
            .iter()
            .filter_map(PlotSeries::y_extent)
            .reduce(|a, b| (a.0.min(b.0), a.1.max(b.1)));
        if let Some((mut lower, mut upper)) = extent {
            if upper - lower < f64::EPSILON {
                lower -= 0.5;
                upper += 0.5;
            }
            self.y_range = AxisRange::new(lower, upper);
            self.bounds_dirty = true;
        }
    }

    /// Record a range the user panned or zoomed to in the chart.
    pub fn sync_view(&mut self, x_range: AxisRange, y_range: AxisRange) {
        if !self.bounds_dirty {
            self.x_range = x_range;
            self.y_range = y_range;
        }
    }

    pub fn apply_plot(&mut self, data: PlotData) {
        tracing::debug!(
            "{}: {} curves, {} rows",
            self.title,
            data.series.len(),
            data.table.row_count()
        );
        self.series = data.series;
        self.table = data.table;
        self.selected_series = None;
    }

    pub fn clear_plot(&mut self) {
        self.series.clear();
        self.table.clear();
        self.selected_series = None;
    }
}

/// Behavior every property plot form provides. Forms supply the rebuild and
/// list handling, the axis/legend handling is shared.
pub trait PropertyPlotForm {
    fn base(&self) -> &PlotFormState;
    fn base_mut(&mut self) -> &mut PlotFormState;

    /// Recompute every curve and the table from the current state.
    fn update_all(&mut self);

    /// Forget every tracked curve.
    fn clear_all(&mut self);

    /// Remove the tracked entry behind the selected curve, if any.
    fn delete_graph(&mut self);

    fn set_axis(&mut self) {
        self.base_mut().apply_axis_fields();
        self.update_all();
    }

    fn set_default(&mut self) {
        self.base_mut().set_default();
    }

    fn set_legend_visible(&mut self, visible: bool) {
        self.base_mut().legend_visible = visible;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn form() -> PlotFormState {
        PlotFormState::new(
            "Test",
            "x",
            "y",
            AxisRange::new(-100.0, 140.0),
            AxisRange::new(0.0, 23.0),
            7,
        )
    }

    #[test]
    fn default_fields_round_trip() {
        let mut state = form();
        state.axis_fields.x_min = "5".into();
        state.x_range = AxisRange::new(1.0, 2.0);
        state.set_default();
        assert_eq!(state.axis_fields.x_min, "-100");
        assert_eq!(state.axis_fields.x_max, "140");
        assert_eq!(state.axis_fields.y_min, "0");
        assert_eq!(state.axis_fields.y_max, "23");
        assert_eq!(state.axis_fields.x_range(), AxisRange::new(-100.0, 140.0));
        assert_eq!(state.axis_fields.y_range(), AxisRange::new(0.0, 23.0));
        assert_eq!(state.x_range, state.default_x_range);
    }

    #[test]
    fn malformed_axis_text_reads_as_zero() {
        let mut state = form();
        state.axis_fields.x_min = "abc".into();
        state.axis_fields.x_max = " 50 ".into();
        state.axis_fields.y_min = "".into();
        state.axis_fields.y_max = "1e1".into();
        state.bounds_dirty = false;
        state.apply_axis_fields();
        assert_eq!(state.x_range, AxisRange::new(0.0, 50.0));
        assert_eq!(state.y_range, AxisRange::new(0.0, 10.0));
        assert!(state.bounds_dirty);
    }

    #[test]
    fn inverted_axis_range_is_swapped() {
        let mut state = form();
        state.axis_fields.x_min = "10".into();
        state.axis_fields.x_max = "-10".into();
        state.axis_fields.y_min = "5".into();
        state.axis_fields.y_max = "1".into();
        state.apply_axis_fields();
        assert_eq!(state.x_range, AxisRange::new(-10.0, 10.0));
        assert_eq!(state.y_range, AxisRange::new(1.0, 5.0));
        assert_eq!(state.axis_fields.x_min, "-10");
        assert_eq!(state.axis_fields.x_max, "10");
        assert_eq!(state.axis_fields.y_min, "1");
        assert_eq!(state.axis_fields.y_max, "5");
    }

    #[test]
    fn rescale_and_write_fields_with_one_decimal() {
        let mut state = form();
        state.series = vec![
            PlotSeries::new("a".into(), vec![0.0, 1.0], vec![1.23, 4.56], [0; 4]),
            PlotSeries::new("b".into(), vec![0.0, 1.0], vec![-0.5, f64::NAN], [0; 4]),
        ];
        state.rescale_y();
        assert_eq!(state.y_range, AxisRange::new(-0.5, 4.56));
        state.write_axis_fields(1);
        assert_eq!(state.axis_fields.y_min, "-0.5");
        assert_eq!(state.axis_fields.y_max, "4.6");
        assert_eq!(state.axis_fields.x_min, "-100.0");
        assert_eq!(state.axis_fields.x_max, "140.0");
    }

    #[test]
    fn rescale_without_data_keeps_range() {
        let mut state = form();
        state.rescale_y();
        assert_eq!(state.y_range, AxisRange::new(0.0, 23.0));
    }

    #[test]
    fn view_sync_ignored_while_bounds_pending() {
        let mut state = form();
        state.sync_view(AxisRange::new(0.0, 1.0), AxisRange::new(0.0, 1.0));
        assert_eq!(state.x_range, AxisRange::new(-100.0, 140.0));
        state.bounds_dirty = false;
        state.sync_view(AxisRange::new(0.0, 1.0), AxisRange::new(2.0, 3.0));
        assert_eq!(state.y_range, AxisRange::new(2.0, 3.0));
    }

    #[test]
    fn general_number_format() {
        assert_eq!(format_general(-100.0), "-100");
        assert_eq!(format_general(435.8), "435.8");
        assert_eq!(format_general(0.1 + 0.2), "0.3");
        assert_eq!(format_general(0.0), "0");
        assert_eq!(format_general(-0.0000001), "0");
    }

    #[test]
    fn table_layout_from_columns() {
        let grid = [0.0, 5.0];
        let data = PlotData::from_columns(
            &grid,
            "Temperature",
            vec![("587nm".into(), vec![1.23456, 2.0])],
            Vec::new(),
            2,
        );
        assert_eq!(data.table.headers, vec!["Temperature", "587nm"]);
        assert_eq!(data.table.item(1, 0), Some("5"));
        assert_eq!(data.table.item(0, 1), Some("1.23"));
        assert_eq!(data.table.item(1, 1), Some("2.00"));
    }
}
