//! Phase-dispatched views for the search flow.
//!
//! Each view is a pure function of the session state; interaction comes back
//! to the app as a `ViewAction` instead of mutating anything here.

use eframe::egui::{self, RichText};

use crate::gemini::Place;
use crate::markdown::{self, Inline};
use crate::session::{Phase, SearchSession};
use crate::ui::theme::Theme;

/// What the user asked for this frame
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ViewAction {
    None,
    StartSearch,
    Reset,
}

/// Render the view for the session's current phase
pub fn render_session(ui: &mut egui::Ui, theme: &Theme, session: &SearchSession) -> ViewAction {
    match session.phase() {
        Phase::Idle => render_idle(ui, theme),
        Phase::GettingLocation => {
            render_loading(ui, theme, "Getting your location...");
            ViewAction::None
        }
        Phase::FetchingPlaces => {
            render_loading(ui, theme, "Scooping up the best spots...");
            ViewAction::None
        }
        Phase::ShowingResults => render_results(ui, theme, session),
        Phase::Error => render_error(ui, theme, session.error()),
    }
}

fn render_idle(ui: &mut egui::Ui, theme: &Theme) -> ViewAction {
    let mut action = ViewAction::None;

    ui.vertical_centered(|ui| {
        ui.add_space(48.0);
        ui.label(
            RichText::new("Craving Ice Cream?")
                .size(34.0)
                .strong()
                .color(theme.text_primary),
        );
        ui.add_space(8.0);
        ui.label(
            RichText::new("Let's find the best ice cream shops near you. One click is all it takes!")
                .size(16.0)
                .color(theme.text_secondary),
        );
        ui.add_space(24.0);

        let button = egui::Button::new(
            RichText::new("Find Ice Cream Near Me")
                .size(18.0)
                .strong()
                .color(egui::Color32::WHITE),
        )
        .fill(theme.accent);

        if ui.add(button).clicked() {
            action = ViewAction::StartSearch;
        }
    });

    action
}

fn render_loading(ui: &mut egui::Ui, theme: &Theme, message: &str) {
    ui.vertical_centered(|ui| {
        ui.add_space(80.0);
        ui.spinner();
        ui.add_space(16.0);
        ui.label(
            RichText::new(message)
                .size(18.0)
                .strong()
                .color(theme.text_secondary),
        );
    });
}

fn render_results(ui: &mut egui::Ui, theme: &Theme, session: &SearchSession) -> ViewAction {
    let mut action = ViewAction::None;

    ui.add_space(12.0);
    ui.label(
        RichText::new("Sweet Spots Found!")
            .size(28.0)
            .strong()
            .color(theme.text_primary),
    );
    ui.add_space(12.0);

    egui::ScrollArea::vertical().show(ui, |ui| {
        if let Some(text) = session.text() {
            egui::Frame::group(ui.style())
                .fill(theme.bg_card)
                .show(ui, |ui| {
                    ui.set_width(ui.available_width());
                    render_summary(ui, theme, text);
                });
            ui.add_space(12.0);
        }

        ui.horizontal_wrapped(|ui| {
            for chunk in session.chunks() {
                // Chunks without a maps place are citations only, not cards
                if let Some(place) = &chunk.maps {
                    render_place_card(ui, theme, place);
                }
            }
        });

        ui.add_space(16.0);
        if ui
            .button(RichText::new("Search Again").color(theme.accent))
            .clicked()
        {
            action = ViewAction::Reset;
        }
    });

    action
}

/// Render the API summary as styled text runs
fn render_summary(ui: &mut egui::Ui, theme: &Theme, text: &str) {
    let runs = markdown::tokenize(text);

    for line in runs.split(|run| matches!(run, Inline::LineBreak)) {
        if line.is_empty() {
            ui.add_space(6.0);
            continue;
        }
        ui.horizontal_wrapped(|ui| {
            ui.spacing_mut().item_spacing.x = 0.0;
            for run in line {
                let rich = match run {
                    Inline::Text(t) => RichText::new(t),
                    Inline::Bold(t) => RichText::new(t).strong(),
                    Inline::Italic(t) => RichText::new(t).italics(),
                    Inline::LineBreak => continue,
                };
                ui.label(rich.color(theme.text_primary));
            }
        });
    }
}

fn render_place_card(ui: &mut egui::Ui, theme: &Theme, place: &Place) {
    egui::Frame::group(ui.style())
        .fill(theme.bg_card)
        .show(ui, |ui| {
            ui.set_width(200.0);
            ui.vertical(|ui| {
                ui.label(
                    RichText::new(&place.title)
                        .size(15.0)
                        .strong()
                        .color(theme.text_primary),
                );
                ui.add_space(8.0);
                if ui.button("View on Map").clicked() {
                    if let Err(e) = open::that(&place.uri) {
                        tracing::warn!("Failed to open {}: {}", place.uri, e);
                    }
                }
            });
        });
}

fn render_error(ui: &mut egui::Ui, theme: &Theme, message: Option<&str>) -> ViewAction {
    let mut action = ViewAction::None;

    ui.vertical_centered(|ui| {
        ui.add_space(48.0);
        ui.label(RichText::new("Oops!").size(30.0).strong().color(theme.error));
        ui.add_space(8.0);
        ui.label(
            RichText::new(message.unwrap_or("Something went wrong."))
                .size(16.0)
                .color(theme.text_secondary),
        );
        ui.add_space(24.0);
        if ui.button(RichText::new("Try Again").size(16.0)).clicked() {
            action = ViewAction::Reset;
        }
    });

    action
}

/// Render the About dialog
pub fn render_about_dialog(ctx: &egui::Context, theme: &Theme, show: &mut bool) {
    if !*show {
        return;
    }

    egui::Window::new("About Sundae")
        .collapsible(false)
        .resizable(false)
        .anchor(egui::Align2::CENTER_CENTER, [0.0, 0.0])
        .show(ctx, |ui| {
            ui.vertical_centered(|ui| {
                ui.add_space(8.0);
                ui.label(RichText::new("Sundae").size(24.0).strong().color(theme.accent));
                ui.add_space(4.0);
                ui.label(
                    RichText::new("Nearby ice cream shop finder")
                        .size(14.0)
                        .color(theme.text_secondary),
                );
                ui.add_space(12.0);
                ui.label(
                    RichText::new(format!("Version {}", env!("CARGO_PKG_VERSION")))
                        .color(theme.text_muted),
                );
                ui.add_space(12.0);
                ui.label(
                    RichText::new("Powered by Gemini Maps grounding")
                        .size(11.0)
                        .color(theme.text_muted),
                );
                ui.add_space(12.0);
                if ui.button("Close").clicked() {
                    *show = false;
                }
                ui.add_space(8.0);
            });
        });
}
