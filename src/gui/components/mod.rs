// src/gui/components/mod.rs
pub mod export_bar;
pub mod results_table;
pub mod run_panel;
pub mod sidebar;
