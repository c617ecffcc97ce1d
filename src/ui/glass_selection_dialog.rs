use crate::data::catalog::GlassCatalog;
use crate::state::dndt_form::GlassSelection;

/// Result of a modal dialog interaction.
pub enum DialogResult<T> {
    Ok(T),
    Cancel,
}

/// State for the glass selection dialog, created when the user asks to pick a
/// glass and dropped when the dialog closes.
pub struct GlassSelectionState {
    pub catalog_index: usize,
    pub filter: String,
    pub selected: Option<String>,
}

impl GlassSelectionState {
    pub fn new() -> Self {
        Self {
            catalog_index: 0,
            filter: String::new(),
            selected: None,
        }
    }
}

impl Default for GlassSelectionState {
    fn default() -> Self {
        Self::new()
    }
}

/// Show the glass selection dialog as an egui window.
///
/// Returns `Some(DialogResult)` when the user presses OK, Cancel or closes the
/// window, or `None` while the dialog is still open.
pub fn show_glass_selection_dialog(
    ctx: &egui::Context,
    state: &mut GlassSelectionState,
    catalogs: &[GlassCatalog],
) -> Option<DialogResult<GlassSelection>> {
    let mut result = None;
    let mut open = true;

    egui::Window::new("Select Glass")
        .open(&mut open)
        .collapsible(false)
        .resizable(true)
        .default_width(360.0)
        .anchor(egui::Align2::CENTER_CENTER, [0.0, 0.0])
        .show(ctx, |ui| {
            if catalogs.is_empty() {
                ui.label(egui::RichText::new("No catalog loaded.").weak());
                if ui.button("Cancel").clicked() {
                    result = Some(DialogResult::Cancel);
                }
                return;
            }
            state.catalog_index = state.catalog_index.min(catalogs.len() - 1);

            // --- Catalog selector ---
            ui.label(egui::RichText::new("Catalog").strong());
            let current = &catalogs[state.catalog_index];
            egui::ComboBox::from_id_salt("catalog_selector")
                .selected_text(&current.name)
                .width(300.0)
                .show_ui(ui, |ui| {
                    for (i, catalog) in catalogs.iter().enumerate() {
                        if ui
                            .selectable_value(&mut state.catalog_index, i, &catalog.name)
                            .clicked()
                        {
                            state.selected = None;
                        }
                    }
                });

            ui.add_space(8.0);

            // --- Glass list ---
            ui.horizontal(|ui| {
                ui.label("Filter");
                ui.add(egui::TextEdit::singleline(&mut state.filter).desired_width(200.0));
            });
            let filter = state.filter.to_uppercase();
            egui::Frame::group(ui.style())
                .inner_margin(egui::Margin::same(8))
                .show(ui, |ui| {
                    egui::ScrollArea::vertical()
                        .max_height(260.0)
                        .auto_shrink([false, true])
                        .show(ui, |ui| {
                            let catalog = &catalogs[state.catalog_index];
                            for name in catalog
                                .glass_names()
                                .filter(|n| n.to_uppercase().contains(&filter))
                            {
                                let is_selected = state.selected.as_deref() == Some(name);
                                let resp = ui.selectable_label(is_selected, name);
                                if resp.clicked() {
                                    state.selected = Some(name.to_string());
                                }
                                if resp.double_clicked() {
                                    result = Some(DialogResult::Ok(GlassSelection {
                                        catalog_index: state.catalog_index,
                                        glass_name: name.to_string(),
                                    }));
                                }
                            }
                        });
                });

            ui.add_space(12.0);

            // --- OK / Cancel buttons ---
            ui.horizontal(|ui| {
                let ok_btn = ui.add_enabled(
                    state.selected.is_some(),
                    egui::Button::new(egui::RichText::new("OK").strong())
                        .min_size(egui::vec2(100.0, 30.0)),
                );
                if ok_btn.clicked() {
                    if let Some(name) = &state.selected {
                        result = Some(DialogResult::Ok(GlassSelection {
                            catalog_index: state.catalog_index,
                            glass_name: name.clone(),
                        }));
                    }
                }
                if ui
                    .add(egui::Button::new("Cancel").min_size(egui::vec2(100.0, 30.0)))
                    .clicked()
                {
                    result = Some(DialogResult::Cancel);
                }
            });
        });

    if !open && result.is_none() {
        result = Some(DialogResult::Cancel);
    }
    result
}
