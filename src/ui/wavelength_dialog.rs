use crate::state::dndt_form::MAX_WAVELENGTH_NM;
use crate::ui::glass_selection_dialog::DialogResult;

pub struct WavelengthDialogState {
    pub wavelength: f64,
}

impl WavelengthDialogState {
    pub fn new() -> Self {
        Self { wavelength: 587.0 }
    }
}

impl Default for WavelengthDialogState {
    fn default() -> Self {
        Self::new()
    }
}

/// Ask for a wavelength in nm, `[0, 10000]` with two decimals.
pub fn show_wavelength_dialog(
    ctx: &egui::Context,
    state: &mut WavelengthDialogState,
) -> Option<DialogResult<f64>> {
    let mut result = None;
    let mut open = true;

    egui::Window::new("Input new wavelength")
        .open(&mut open)
        .collapsible(false)
        .resizable(false)
        .anchor(egui::Align2::CENTER_CENTER, [0.0, 0.0])
        .show(ctx, |ui| {
            ui.horizontal(|ui| {
                ui.label("wavelength(nm):");
                ui.add(
                    egui::DragValue::new(&mut state.wavelength)
                        .range(0.0..=MAX_WAVELENGTH_NM)
                        .fixed_decimals(2)
                        .speed(0.5),
                );
            });
            ui.add_space(8.0);
            ui.horizontal(|ui| {
                if ui
                    .add(egui::Button::new("OK").min_size(egui::vec2(80.0, 28.0)))
                    .clicked()
                {
                    result = Some(DialogResult::Ok(state.wavelength));
                }
                if ui
                    .add(egui::Button::new("Cancel").min_size(egui::vec2(80.0, 28.0)))
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
