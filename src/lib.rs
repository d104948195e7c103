//! attrikpi: HR attrition KPI dashboard library
//!
//! Loads an HR dataset, derives a binary attrition flag and builds the
//! chart tables for four KPIs: attrition by satisfaction, tenure distribution
//! by attrition, attrition by category and a correlation heatmap. Tables are
//! handed to a [`render::RenderSink`] for display.

pub mod cli;
pub mod pipeline;
pub mod render;
pub mod utils;
