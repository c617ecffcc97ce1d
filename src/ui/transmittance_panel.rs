use crate::data::catalog::GlassCatalog;
use crate::state::transmittance_form::{TransmittancePlotForm, PLOT_STEP_NM};
use crate::ui::glass_selection_dialog::{self, DialogResult, GlassSelectionState};
use crate::ui::plot_form_panel::{self, FormAction};

#[derive(Default)]
pub struct TransmittancePanelState {
    glass_dialog: Option<GlassSelectionState>,
}

pub fn show_transmittance_panel(
    ui: &mut egui::Ui,
    panel: &mut TransmittancePanelState,
    form: &mut TransmittancePlotForm,
    catalogs: &[GlassCatalog],
    error: &mut Option<String>,
) {
    let glass_count = form.glasses().len();
    let thickness_text = &mut form.thickness_text;

    let action = plot_form_panel::show_plot_form(ui, "transmittance", &mut form.base, |ui| {
        let mut action = FormAction::None;
        ui.label(egui::RichText::new("Sample").strong());
        ui.horizontal(|ui| {
            ui.label("Thickness (mm)");
            let resp = ui.add(egui::TextEdit::singleline(thickness_text).desired_width(60.0));
            if resp.lost_focus() && ui.input(|i| i.key_pressed(egui::Key::Enter)) {
                action = FormAction::Update;
            }
        });
        ui.label(
            egui::RichText::new(format!("{glass_count} glasses, step {PLOT_STEP_NM} nm")).weak(),
        );
        action
    });

    if plot_form_panel::apply_common_action(form, action, error) == FormAction::AddGraph {
        match form.begin_add_graph() {
            Ok(()) => panel.glass_dialog = Some(GlassSelectionState::new()),
            Err(e) => *error = Some(e.to_string()),
        }
    }

    if let Some(dialog) = panel.glass_dialog.as_mut() {
        let ctx = ui.ctx().clone();
        if let Some(result) = glass_selection_dialog::show_glass_selection_dialog(&ctx, dialog, catalogs) {
            panel.glass_dialog = None;
            if let DialogResult::Ok(selection) = result {
                let added = selection
                    .resolve(catalogs)
                    .and_then(|glass| form.add_graph(glass));
                if let Err(e) = added {
                    *error = Some(e.to_string());
                }
            }
        }
    }
}
