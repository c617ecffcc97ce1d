pub mod app_state;
pub mod data_series;
pub mod data_table;
pub mod dndt_form;
pub mod plot_form;
pub mod transmittance_form;
