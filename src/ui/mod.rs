//! UI modules for Sundae
//!
//! Phase views plus the theme presets applied to egui's visuals.

pub mod theme;
mod views;

pub use views::{ViewAction, render_about_dialog, render_session};
