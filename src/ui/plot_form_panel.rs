use egui_plot::{Corner, Legend, Line, Plot, PlotBounds, PlotPoints};

use crate::processing::export;
use crate::processing::sampling::AxisRange;
use crate::state::data_table::DataTable;
use crate::state::plot_form::{PlotFormState, PropertyPlotForm};

/// Button presses and edits a plot form reports back to its owner.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum FormAction {
    None,
    SetGlass,
    AddGraph,
    DeleteGraph,
    SetAxis,
    SetDefault,
    Clear,
    LegendToggled(bool),
    /// Something the rebuild depends on changed (digits, step, thickness).
    Update,
    ExportCsv,
    CopyTable,
}

/// Helper to create a control button with consistent min size.
fn control_btn(ui: &mut egui::Ui, label: &str) -> egui::Response {
    ui.add(egui::Button::new(label).min_size(egui::vec2(0.0, 26.0)))
}

/// Render a property plot form: controls on the right, chart in the middle,
/// data table at the bottom. `form_controls` draws the form-specific rows at
/// the top of the control column.
pub fn show_plot_form(
    ui: &mut egui::Ui,
    id: &str,
    base: &mut PlotFormState,
    form_controls: impl FnOnce(&mut egui::Ui) -> FormAction,
) -> FormAction {
    let mut action = FormAction::None;

    egui::SidePanel::right(egui::Id::new((id, "controls")))
        .resizable(false)
        .default_width(250.0)
        .show_inside(ui, |ui| {
            egui::ScrollArea::vertical().show(ui, |ui| {
                let form_action = form_controls(ui);
                if form_action != FormAction::None {
                    action = form_action;
                }
                ui.add_space(8.0);
                let common = show_common_controls(ui, base);
                if common != FormAction::None {
                    action = common;
                }
            });
        });

    egui::TopBottomPanel::bottom(egui::Id::new((id, "table")))
        .resizable(true)
        .default_height(220.0)
        .min_height(80.0)
        .show_inside(ui, |ui| {
            show_table(ui, &base.table);
        });

    egui::CentralPanel::default().show_inside(ui, |ui| {
        show_chart(ui, id, base);
    });

    action
}

fn show_common_controls(ui: &mut egui::Ui, base: &mut PlotFormState) -> FormAction {
    let mut action = FormAction::None;

    // --- Curves ---
    ui.label(egui::RichText::new("Graphs").strong());
    ui.horizontal_wrapped(|ui| {
        if control_btn(ui, "Add Graph").clicked() {
            action = FormAction::AddGraph;
        }
        if control_btn(ui, "Delete Graph")
            .on_hover_text("Remove the selected curve")
            .clicked()
        {
            action = FormAction::DeleteGraph;
        }
        if control_btn(ui, "Clear").clicked() {
            action = FormAction::Clear;
        }
    });

    let selected_text = base.selected_series.clone().unwrap_or_else(|| "None".to_string());
    ui.horizontal(|ui| {
        ui.label("Selected:");
        egui::ComboBox::from_id_salt(ui.id().with("selected_curve"))
            .selected_text(selected_text)
            .show_ui(ui, |ui| {
                ui.selectable_value(&mut base.selected_series, None, "None");
                for s in &base.series {
                    ui.selectable_value(
                        &mut base.selected_series,
                        Some(s.name.clone()),
                        egui::RichText::new(&s.name).color(s.color32()),
                    );
                }
            });
    });

    ui.separator();

    // --- Axis ---
    ui.label(egui::RichText::new("Axis").strong());
    egui::Grid::new(ui.id().with("axis_grid"))
        .num_columns(2)
        .spacing([8.0, 4.0])
        .show(ui, |ui| {
            let fields = &mut base.axis_fields;
            for (label, text) in [
                ("X min", &mut fields.x_min),
                ("X max", &mut fields.x_max),
                ("Y min", &mut fields.y_min),
                ("Y max", &mut fields.y_max),
            ] {
                ui.label(label);
                ui.add(egui::TextEdit::singleline(text).desired_width(90.0));
                ui.end_row();
            }
        });
    ui.horizontal(|ui| {
        if control_btn(ui, "Set Axis").clicked() {
            action = FormAction::SetAxis;
        }
        if control_btn(ui, "Default").on_hover_text("Reset the axis range").clicked() {
            action = FormAction::SetDefault;
        }
    });

    ui.separator();

    // --- Display ---
    let mut legend = base.legend_visible;
    if ui.checkbox(&mut legend, "Legend").changed() {
        action = FormAction::LegendToggled(legend);
    }
    ui.horizontal(|ui| {
        ui.label("Digits");
        if ui
            .add(egui::DragValue::new(&mut base.digits).range(0..=10))
            .changed()
        {
            action = FormAction::Update;
        }
    });

    ui.separator();

    ui.horizontal_wrapped(|ui| {
        if control_btn(ui, "Export CSV").clicked() {
            action = FormAction::ExportCsv;
        }
        if control_btn(ui, "Copy Table").clicked() {
            action = FormAction::CopyTable;
        }
    });

    action
}

fn show_chart(ui: &mut egui::Ui, id: &str, base: &mut PlotFormState) {
    let mut plot = Plot::new(egui::Id::new((id, "plot")))
        .x_axis_label(base.x_label.clone())
        .y_axis_label(base.y_label.clone())
        .allow_boxed_zoom(true);
    if base.legend_visible {
        plot = plot.legend(
            Legend::default()
                .position(Corner::RightBottom)
                .background_alpha(0.6),
        );
    }

    let pending_bounds = base.bounds_dirty.then(|| {
        PlotBounds::from_min_max(
            [base.x_range.lower, base.y_range.lower],
            [base.x_range.upper, base.y_range.upper],
        )
    });
    let item_ids: Vec<egui::Id> = (0..base.series.len())
        .map(|i| egui::Id::new((id, "series", i)))
        .collect();
    let selected = base.selected_series.clone();
    let series = &base.series;

    let plot_resp = plot.show(ui, |plot_ui| {
        if let Some(bounds) = pending_bounds {
            if bounds.is_valid() {
                plot_ui.set_plot_bounds(bounds);
            }
        }
        for (s, item_id) in series.iter().zip(&item_ids) {
            let points: PlotPoints = s
                .x
                .iter()
                .zip(s.y.iter())
                .filter(|(_, y)| y.is_finite())
                .map(|(&x, &y)| [x, y])
                .collect();
            let is_selected = selected.as_deref() == Some(s.name.as_str());
            let width = if is_selected { s.line_width * 2.0 } else { s.line_width };
            plot_ui.line(
                Line::new(points)
                    .name(&s.name)
                    .id(*item_id)
                    .color(s.color32())
                    .width(width)
                    .highlight(is_selected),
            );
        }
    });

    base.bounds_dirty = false;
    let bounds = plot_resp.transform.bounds();
    base.sync_view(
        AxisRange::new(bounds.min()[0], bounds.max()[0]),
        AxisRange::new(bounds.min()[1], bounds.max()[1]),
    );

    // Clicking a curve selects it, clicking empty space clears the selection.
    if plot_resp.response.clicked() {
        base.selected_series = plot_resp
            .hovered_plot_item
            .and_then(|hovered| item_ids.iter().position(|i| *i == hovered))
            .and_then(|i| base.series.get(i))
            .map(|s| s.name.clone());
    }
}

fn show_table(ui: &mut egui::Ui, table: &DataTable) {
    if table.column_count() == 0 {
        ui.label(egui::RichText::new("No data.").weak());
        return;
    }

    use egui_extras::{Column, TableBuilder};

    TableBuilder::new(ui)
        .striped(true)
        .resizable(true)
        .cell_layout(egui::Layout::left_to_right(egui::Align::Center))
        .columns(Column::auto().at_least(90.0), table.column_count())
        .min_scrolled_height(0.0)
        .header(20.0, |mut header| {
            for label in &table.headers {
                header.col(|ui| {
                    ui.strong(label);
                });
            }
        })
        .body(|body| {
            body.rows(18.0, table.row_count(), |mut row| {
                let cells = &table.cells[row.index()];
                for cell in cells {
                    row.col(|ui| {
                        ui.label(cell);
                    });
                }
            });
        });
}

/// Handle the actions every form reacts to the same way. Returns the action
/// when it needs form-specific handling.
pub fn apply_common_action<F: PropertyPlotForm>(
    form: &mut F,
    action: FormAction,
    error: &mut Option<String>,
) -> FormAction {
    match action {
        FormAction::DeleteGraph => form.delete_graph(),
        FormAction::SetAxis => form.set_axis(),
        FormAction::SetDefault => {
            form.set_default();
            form.update_all();
        }
        FormAction::Clear => form.clear_all(),
        FormAction::LegendToggled(visible) => form.set_legend_visible(visible),
        FormAction::Update => form.update_all(),
        FormAction::ExportCsv => {
            if let Err(e) = export_csv(&form.base().table, &form.base().title) {
                tracing::error!("{e}");
                *error = Some(e);
            }
        }
        FormAction::CopyTable => {
            if let Err(e) = copy_table(&form.base().table) {
                tracing::error!("{e}");
                *error = Some(e);
            }
        }
        other => return other,
    }
    FormAction::None
}

fn export_csv(table: &DataTable, title: &str) -> Result<(), String> {
    if table.column_count() == 0 {
        return Err("Nothing to export.".to_string());
    }
    let filename = format!("{}.csv", title.replace(['/', ' ', '(', ')'], "_"));
    if let Some(path) = rfd::FileDialog::new()
        .set_file_name(&filename)
        .add_filter("CSV Files", &["csv"])
        .save_file()
    {
        export::export_table_csv(table, &path).map_err(|e| e.to_string())?;
    }
    Ok(())
}

fn copy_table(table: &DataTable) -> Result<(), String> {
    let mut clipboard =
        arboard::Clipboard::new().map_err(|e| format!("Failed to access clipboard: {e}"))?;
    clipboard
        .set_text(export::table_to_tsv(table))
        .map_err(|e| format!("Failed to copy to clipboard: {e}"))?;
    tracing::info!("Copied {} table rows to clipboard", table.row_count());
    Ok(())
}
