pub mod app;
pub mod chart_view;
pub mod controls_panel;
pub mod description_view;
pub mod error_panel;
