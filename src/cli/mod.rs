//! User-facing side: options, interactive menu, text tables and SVG figures

pub mod config;
pub mod menu;
pub mod plot;
pub mod table;
