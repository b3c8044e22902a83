use eframe::egui::{self, Color32, Stroke, Visuals};
use serde::{Deserialize, Serialize};

/// Available theme presets
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum ThemePreset {
    #[default]
    Strawberry,
    Midnight,
}

impl ThemePreset {
    /// Get all available presets
    pub fn all() -> &'static [ThemePreset] {
        &[ThemePreset::Strawberry, ThemePreset::Midnight]
    }

    /// Get display name for the preset
    pub fn name(&self) -> &'static str {
        match self {
            ThemePreset::Strawberry => "Strawberry",
            ThemePreset::Midnight => "Midnight",
        }
    }

    /// Get the theme colors for this preset
    pub fn theme(&self) -> Theme {
        match self {
            ThemePreset::Strawberry => Theme::strawberry(),
            ThemePreset::Midnight => Theme::midnight(),
        }
    }
}

/// Theme color definitions
#[derive(Debug, Clone)]
pub struct Theme {
    /// Whether the preset builds on egui's dark visuals
    pub dark: bool,

    // Base colors
    pub bg_deep: Color32,
    pub bg_panel: Color32,
    pub bg_card: Color32,

    // Text colors
    pub text_primary: Color32,
    pub text_secondary: Color32,
    pub text_muted: Color32,

    // Accent colors
    pub accent: Color32,
    pub accent_hover: Color32,

    // Semantic colors
    pub error: Color32,

    // UI element colors
    pub border: Color32,
}

impl Theme {
    /// Strawberry theme - light, matches the parlor vibe
    pub fn strawberry() -> Self {
        Self {
            dark: false,

            bg_deep: Color32::from_rgb(253, 242, 248),  // Pink-50
            bg_panel: Color32::from_rgb(255, 251, 253),
            bg_card: Color32::from_rgb(252, 231, 243),  // Pink-100

            text_primary: Color32::from_rgb(55, 65, 81),    // Gray-700
            text_secondary: Color32::from_rgb(107, 114, 128), // Gray-500
            text_muted: Color32::from_rgb(244, 114, 182),   // Pink-400

            accent: Color32::from_rgb(236, 72, 153),       // Pink-500
            accent_hover: Color32::from_rgb(219, 39, 119), // Pink-600

            error: Color32::from_rgb(220, 38, 38), // Red-600

            border: Color32::from_rgb(251, 207, 232), // Pink-200
        }
    }

    /// Midnight theme - dark variant for late-night cravings
    pub fn midnight() -> Self {
        Self {
            dark: true,

            bg_deep: Color32::from_rgb(24, 17, 24),
            bg_panel: Color32::from_rgb(32, 24, 32),
            bg_card: Color32::from_rgb(46, 34, 46),

            text_primary: Color32::from_rgb(250, 245, 250),
            text_secondary: Color32::from_rgb(200, 185, 200),
            text_muted: Color32::from_rgb(150, 130, 150),

            accent: Color32::from_rgb(244, 114, 182),       // Pink-400
            accent_hover: Color32::from_rgb(249, 168, 212), // Pink-300

            error: Color32::from_rgb(248, 113, 113), // Red-400

            border: Color32::from_rgb(70, 55, 70),
        }
    }

    /// Apply this theme to egui's visuals
    pub fn apply(&self, ctx: &egui::Context) {
        let mut visuals = if self.dark {
            Visuals::dark()
        } else {
            Visuals::light()
        };

        // Window and panel backgrounds
        visuals.window_fill = self.bg_panel;
        visuals.panel_fill = self.bg_deep;
        visuals.faint_bg_color = self.bg_card;

        // Widget backgrounds
        visuals.widgets.noninteractive.bg_stroke = Stroke::new(1.0, self.border);
        visuals.widgets.noninteractive.fg_stroke = Stroke::new(1.0, self.text_primary);

        visuals.widgets.inactive.bg_fill = self.bg_card;
        visuals.widgets.inactive.weak_bg_fill = self.bg_card;
        visuals.widgets.inactive.fg_stroke = Stroke::new(1.0, self.text_primary);

        visuals.widgets.hovered.bg_stroke = Stroke::new(1.0, self.accent);
        visuals.widgets.hovered.fg_stroke = Stroke::new(1.0, self.text_primary);

        visuals.widgets.active.bg_fill = self.accent_hover;
        visuals.widgets.active.bg_stroke = Stroke::new(1.0, self.accent);

        // Selection and links
        visuals.selection.stroke = Stroke::new(1.0, self.accent);
        visuals.hyperlink_color = self.accent;

        // Window styling
        visuals.window_stroke = Stroke::new(1.0, self.border);

        ctx.set_visuals(visuals);
    }
}
