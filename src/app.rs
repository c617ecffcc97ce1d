use std::path::PathBuf;

use eframe::egui;

use crate::data::catalog::GlassCatalog;
use crate::state::app_state::{AppState, FormTab, Session, VERSION};
use crate::ui::dndt_panel::{self, DnDtPanelState};
use crate::ui::transmittance_panel::{self, TransmittancePanelState};

/// The main GlassPlot application.
pub struct GlassPlotApp {
    pub state: AppState,
    dndt_panel: DnDtPanelState,
    transmittance_panel: TransmittancePanelState,
    /// Message for the modal error window.
    pub error_message: Option<String>,
    pub show_about: bool,
}

impl GlassPlotApp {
    /// Build the app with the built-in sample catalog plus any catalog files
    /// named on the command line.
    pub fn new(cc: &eframe::CreationContext<'_>, catalog_paths: Vec<PathBuf>) -> Self {
        let mut errors = Vec::new();
        let mut catalogs = Vec::new();
        match GlassCatalog::builtin() {
            Ok(c) => catalogs.push(c),
            Err(e) => {
                tracing::error!("Built-in catalog is unusable: {e}");
                errors.push(e.to_string());
            }
        }

        let mut state = AppState::new(catalogs);
        for path in &catalog_paths {
            if let Err(e) = state.load_catalog(path) {
                tracing::error!("Failed to load catalog: {e}");
                errors.push(e.to_string());
            }
        }

        // --- Global UI style ---
        let ctx = &cc.egui_ctx;
        let mut style = (*ctx.style()).clone();
        style.text_styles.insert(
            egui::TextStyle::Body,
            egui::FontId::proportional(14.5),
        );
        style.text_styles.insert(
            egui::TextStyle::Button,
            egui::FontId::proportional(14.0),
        );
        style.text_styles.insert(
            egui::TextStyle::Heading,
            egui::FontId::proportional(20.0),
        );
        style.spacing.button_padding = egui::vec2(10.0, 5.0);
        style.spacing.item_spacing = egui::vec2(8.0, 6.0);
        ctx.set_style(style);
        ctx.set_visuals(state.theme.visuals());

        Self {
            state,
            dndt_panel: DnDtPanelState::default(),
            transmittance_panel: TransmittancePanelState::default(),
            error_message: (!errors.is_empty()).then(|| errors.join("\n")),
            show_about: false,
        }
    }

    /// Open a native file dialog and add the chosen catalog.
    fn open_catalog_dialog(&mut self) {
        if let Some(path) = rfd::FileDialog::new()
            .add_filter("Glass Catalog", &["json"])
            .add_filter("All Files", &["*"])
            .pick_file()
        {
            if let Err(e) = self.state.load_catalog(&path) {
                tracing::error!("Failed to load catalog: {e}");
                self.error_message = Some(e.to_string());
            }
        }
    }

    fn save_session(&mut self) {
        if let Some(path) = rfd::FileDialog::new()
            .set_file_name("session.json")
            .add_filter("GlassPlot Session", &["json"])
            .save_file()
        {
            match self.state.session().save(&path) {
                Ok(()) => tracing::info!("Session saved to {:?}", path),
                Err(e) => {
                    tracing::error!("Failed to save session: {e}");
                    self.error_message = Some(e.to_string());
                }
            }
        }
    }

    fn load_session(&mut self) {
        if let Some(path) = rfd::FileDialog::new()
            .add_filter("GlassPlot Session", &["json"])
            .pick_file()
        {
            match Session::load(&path) {
                Ok(session) => {
                    let problems = self.state.restore(session);
                    tracing::info!("Session loaded from {:?}", path);
                    if !problems.is_empty() {
                        self.error_message = Some(problems.join("\n"));
                    }
                }
                Err(e) => self.error_message = Some(e.to_string()),
            }
        }
    }

    fn show_error_window(&mut self, ctx: &egui::Context) {
        let Some(message) = self.error_message.clone() else {
            return;
        };
        let mut dismiss = false;
        egui::Window::new("Error")
            .collapsible(false)
            .resizable(false)
            .anchor(egui::Align2::CENTER_CENTER, [0.0, 0.0])
            .show(ctx, |ui| {
                ui.label(message);
                ui.add_space(8.0);
                if ui
                    .add(egui::Button::new("OK").min_size(egui::vec2(80.0, 28.0)))
                    .clicked()
                {
                    dismiss = true;
                }
            });
        if dismiss {
            self.error_message = None;
        }
    }
}

impl eframe::App for GlassPlotApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        ctx.set_visuals(self.state.theme.visuals());

        // --- Header panel ---
        let mut load_catalog = false;
        let mut save_session = false;
        let mut load_session = false;
        egui::TopBottomPanel::top("header")
            .frame(egui::Frame::side_top_panel(&ctx.style()).inner_margin(egui::Margin::symmetric(16, 8)))
            .show(ctx, |ui| {
                ui.horizontal(|ui| {
                    let heading = ui.heading("GlassPlot");
                    heading.context_menu(|ui| {
                        if ui.button("About GlassPlot").clicked() {
                            self.show_about = true;
                            ui.close_menu();
                        }
                    });

                    ui.separator();
                    ui.selectable_value(&mut self.state.tab, FormTab::DnDt, "Dn/Dt(abs) Plot");
                    ui.selectable_value(
                        &mut self.state.tab,
                        FormTab::Transmittance,
                        "Transmittance Plot",
                    );
                    ui.separator();

                    if ui.button("Load Catalog").clicked() {
                        load_catalog = true;
                    }
                    if ui.button("Save Session").clicked() {
                        save_session = true;
                    }
                    if ui.button("Load Session").clicked() {
                        load_session = true;
                    }

                    ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                        if ui.button(self.state.theme.switch_label()).clicked() {
                            self.state.theme = self.state.theme.toggle();
                        }
                        ui.separator();
                        ui.small(format!("v{VERSION}"));
                    });
                });
            });

        if load_catalog {
            self.open_catalog_dialog();
        }
        if save_session {
            self.save_session();
        }
        if load_session {
            self.load_session();
        }

        // --- Footer panel ---
        egui::TopBottomPanel::bottom("footer")
            .frame(egui::Frame::side_top_panel(&ctx.style()).inner_margin(egui::Margin::symmetric(16, 6)))
            .show(ctx, |ui| {
                ui.horizontal(|ui| {
                    let names: Vec<&str> = self.state.catalogs.iter().map(|c| c.name.as_str()).collect();
                    let glass_count: usize = self.state.catalogs.iter().map(GlassCatalog::len).sum();
                    ui.label(
                        egui::RichText::new(format!(
                            "Catalogs: {} ({} glasses)",
                            names.join(", "),
                            glass_count
                        ))
                        .weak(),
                    );
                });
            });

        // --- Central panel with the active form ---
        egui::CentralPanel::default().show(ctx, |ui| {
            let state = &mut self.state;
            match state.tab {
                FormTab::DnDt => dndt_panel::show_dndt_panel(
                    ui,
                    &mut self.dndt_panel,
                    &mut state.dndt,
                    &state.catalogs,
                    &mut self.error_message,
                ),
                FormTab::Transmittance => transmittance_panel::show_transmittance_panel(
                    ui,
                    &mut self.transmittance_panel,
                    &mut state.transmittance,
                    &state.catalogs,
                    &mut self.error_message,
                ),
            }
        });

        self.show_error_window(ctx);

        if self.show_about {
            egui::Window::new("About GlassPlot")
                .open(&mut self.show_about)
                .collapsible(false)
                .resizable(false)
                .default_width(320.0)
                .show(ctx, |ui| {
                    ui.heading("GlassPlot");
                    ui.label(format!("Version: {VERSION}"));
                    ui.add_space(4.0);
                    ui.label("Thermal and transmittance plots for optical glass catalogs.");
                    ui.add_space(10.0);
                    ui.label("Click a curve to select it for Delete Graph.");
                    ui.label("Right-click the title for this menu.");
                });
        }
    }
}
