pub mod dndt_panel;
pub mod glass_selection_dialog;
pub mod plot_form_panel;
pub mod transmittance_panel;
pub mod wavelength_dialog;
