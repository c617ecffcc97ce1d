use crate::data::catalog::GlassCatalog;
use crate::state::dndt_form::DnDtPlotForm;
use crate::ui::glass_selection_dialog::{self, DialogResult, GlassSelectionState};
use crate::ui::plot_form_panel::{self, FormAction};
use crate::ui::wavelength_dialog::{self, WavelengthDialogState};

/// Dialogs owned by the Dn/Dt form. Each lives only while it is open.
#[derive(Default)]
pub struct DnDtPanelState {
    glass_dialog: Option<GlassSelectionState>,
    wavelength_dialog: Option<WavelengthDialogState>,
}

pub fn show_dndt_panel(
    ui: &mut egui::Ui,
    panel: &mut DnDtPanelState,
    form: &mut DnDtPlotForm,
    catalogs: &[GlassCatalog],
    error: &mut Option<String>,
) {
    let glass_label = form.glass_label();
    let step_text = &mut form.step_text;

    let action = plot_form_panel::show_plot_form(ui, "dndt", &mut form.base, |ui| {
        let mut action = FormAction::None;
        ui.label(egui::RichText::new("Glass").strong());
        ui.horizontal(|ui| {
            if ui.button("Set Glass").clicked() {
                action = FormAction::SetGlass;
            }
            if glass_label.is_empty() {
                ui.label(egui::RichText::new("(none)").weak());
            } else {
                ui.label(&glass_label);
            }
        });
        ui.horizontal(|ui| {
            ui.label("Plot step");
            let resp = ui.add(egui::TextEdit::singleline(step_text).desired_width(60.0));
            if resp.lost_focus() && ui.input(|i| i.key_pressed(egui::Key::Enter)) {
                action = FormAction::Update;
            }
        });
        action
    });

    match plot_form_panel::apply_common_action(form, action, error) {
        FormAction::SetGlass => panel.glass_dialog = Some(GlassSelectionState::new()),
        FormAction::AddGraph => match form.begin_add_graph() {
            Ok(()) => panel.wavelength_dialog = Some(WavelengthDialogState::new()),
            Err(e) => *error = Some(e.to_string()),
        },
        _ => {}
    }

    let ctx = ui.ctx().clone();

    if let Some(dialog) = panel.glass_dialog.as_mut() {
        if let Some(result) = glass_selection_dialog::show_glass_selection_dialog(&ctx, dialog, catalogs) {
            panel.glass_dialog = None;
            if let DialogResult::Ok(selection) = result {
                if let Err(e) = form.apply_selection(catalogs, &selection) {
                    *error = Some(e.to_string());
                }
            }
        }
    }

    if let Some(dialog) = panel.wavelength_dialog.as_mut() {
        if let Some(result) = wavelength_dialog::show_wavelength_dialog(&ctx, dialog) {
            panel.wavelength_dialog = None;
            if let DialogResult::Ok(wavelength) = result {
                if let Err(e) = form.add_graph(wavelength) {
                    *error = Some(e.to_string());
                }
            }
        }
    }
}
