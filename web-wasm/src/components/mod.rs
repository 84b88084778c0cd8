pub mod comparison_panel;
pub mod editor;
pub mod header;
pub mod history_panel;
pub mod output_panel;
