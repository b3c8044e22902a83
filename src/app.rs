use eframe::egui;
use futures::FutureExt;
use tokio::sync::watch;
use tokio::task::JoinHandle;

use crate::config::Config;
use crate::gemini::{GeminiClient, SearchError, SessionResult};
use crate::geolocate::{self, GeolocateError};
use crate::session::{SearchSession, SessionEvent};
use crate::ui::{self, ViewAction, theme::Theme};

/// Stage signals sent by the search task while it runs
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum SearchStage {
    Locating,
    Fetching,
}

/// Why the search task failed, so the right session event can be applied
#[derive(Debug)]
enum SearchTaskError {
    Location(GeolocateError),
    Fetch(SearchError),
}

/// Main application state
pub struct SundaeApp {
    /// Application configuration
    config: Config,
    /// Colors for the active preset
    theme: Theme,
    /// Whether theme needs to be applied
    theme_dirty: bool,
    /// The five-phase search session
    session: SearchSession,
    /// Gemini API client
    gemini: GeminiClient,
    /// Async task for the current search
    search_task: Option<JoinHandle<Result<SessionResult, SearchTaskError>>>,
    /// Channel receiver for stage changes within the task
    stage_rx: Option<watch::Receiver<SearchStage>>,
    /// Attempt id the running task is tagged with
    task_attempt: u64,
    /// Status message for the status bar
    status_message: String,
    /// Whether to show the About dialog
    show_about_dialog: bool,
}

impl SundaeApp {
    /// Create a new application instance.
    ///
    /// The API key was already validated in `main`; a missing key never gets
    /// this far.
    pub fn new(_cc: &eframe::CreationContext<'_>, api_key: String) -> anyhow::Result<Self> {
        let config = Config::load().unwrap_or_else(|e| {
            tracing::warn!("Failed to load config, using defaults: {}", e);
            Config::default()
        });

        let gemini = GeminiClient::new(api_key, config.search.model.clone())?;
        let theme = config.ui.theme.theme();

        Ok(Self {
            config,
            theme,
            theme_dirty: true,
            session: SearchSession::default(),
            gemini,
            search_task: None,
            stage_rx: None,
            task_attempt: 0,
            status_message: "Ready".to_string(),
            show_about_dialog: false,
        })
    }

    /// Spawn the geolocate-then-search task for a fresh attempt
    fn start_search(&mut self) {
        if self.search_task.is_some() {
            return; // Already searching
        }

        let attempt = self.session.begin_search();
        self.task_attempt = attempt;
        self.status_message = "Getting your location...".to_string();

        let (stage_tx, stage_rx) = watch::channel(SearchStage::Locating);
        self.stage_rx = Some(stage_rx);

        let gemini = self.gemini.clone();

        tracing::info!("Starting search (attempt {})", attempt);

        self.search_task = Some(tokio::spawn(async move {
            // Stage 1: one-shot position lookup, fixed 10 s timeout
            let coords = geolocate::current_position(gemini.client())
                .await
                .map_err(SearchTaskError::Location)?;

            tracing::info!(
                "Position acquired: {:.2}, {:.2}",
                coords.latitude,
                coords.longitude
            );
            let _ = stage_tx.send(SearchStage::Fetching);

            // Stage 2: grounded Gemini query, never issued before stage 1 resolves
            gemini
                .find_nearby(coords.latitude, coords.longitude)
                .await
                .map_err(SearchTaskError::Fetch)
        }));
    }

    /// Poll the search task and feed its outcome into the session reducer
    fn poll_search_task(&mut self, ctx: &egui::Context) {
        // Stage change: geolocation resolved, API call now in flight
        if let Some(rx) = &mut self.stage_rx {
            if rx.has_changed().unwrap_or(false) && *rx.borrow_and_update() == SearchStage::Fetching
            {
                self.session
                    .apply(self.task_attempt, SessionEvent::LocationAcquired);
                self.status_message = "Scooping up the best spots...".to_string();
            }
        }

        let Some(task) = &mut self.search_task else {
            return;
        };

        if !task.is_finished() {
            ctx.request_repaint();
            return;
        }

        let task = self.search_task.take().unwrap();
        self.stage_rx = None;
        let attempt = self.task_attempt;

        // Use now_or_never() since we know the task is finished
        match task.now_or_never() {
            Some(Ok(Ok(result))) => {
                let count = result.chunks.len();
                self.session
                    .apply(attempt, SessionEvent::ResultsReceived(result));
                self.status_message = if count > 0 {
                    format!("Found {} spots", count)
                } else {
                    "No shops found".to_string()
                };
            }
            Some(Ok(Err(SearchTaskError::Location(e)))) => {
                tracing::warn!("Geolocation failed: {}", e);
                self.session.apply(attempt, SessionEvent::LocationFailed(e));
                self.status_message = "Could not determine location".to_string();
            }
            Some(Ok(Err(SearchTaskError::Fetch(e)))) => {
                tracing::error!("Search failed: {}", e);
                self.session.apply(attempt, SessionEvent::SearchFailed);
                self.status_message = "Search failed".to_string();
            }
            Some(Err(e)) => {
                tracing::error!("Search task panicked: {}", e);
                self.session.apply(attempt, SessionEvent::SearchFailed);
                self.status_message = "Search failed".to_string();
            }
            None => {
                tracing::warn!("Task not ready despite is_finished()");
            }
        }
    }

    /// Clear the display back to idle.
    ///
    /// Does not abort an in-flight task; the bumped attempt id makes any
    /// late outcome a discarded no-op.
    fn reset(&mut self) {
        self.session.reset();
        self.search_task = None;
        self.stage_rx = None;
        self.status_message = "Ready".to_string();
    }

    /// Switch theme preset and persist the choice
    fn set_theme(&mut self, preset: crate::ui::theme::ThemePreset) {
        if self.config.ui.theme == preset {
            return;
        }
        self.config.ui.theme = preset;
        self.theme = preset.theme();
        self.theme_dirty = true;
        if let Err(e) = self.config.save() {
            tracing::error!("Failed to save config: {}", e);
        }
    }
}

impl eframe::App for SundaeApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        if self.theme_dirty {
            self.theme.apply(ctx);
            self.theme_dirty = false;
        }

        // Poll the async search task
        self.poll_search_task(ctx);

        // Top menu bar
        egui::TopBottomPanel::top("menu_bar").show(ctx, |ui| {
            ui.horizontal(|ui| {
                ui.menu_button("File", |ui| {
                    if ui.button("Exit").clicked() {
                        ctx.send_viewport_cmd(egui::ViewportCommand::Close);
                    }
                });
                ui.menu_button("View", |ui| {
                    for &preset in crate::ui::theme::ThemePreset::all() {
                        if ui
                            .selectable_label(self.config.ui.theme == preset, preset.name())
                            .clicked()
                        {
                            self.set_theme(preset);
                        }
                    }
                });
                ui.menu_button("Help", |ui| {
                    if ui.button("About").clicked() {
                        self.show_about_dialog = true;
                    }
                });
            });
        });

        // Status bar at bottom
        egui::TopBottomPanel::bottom("status_bar").show(ctx, |ui| {
            ui.horizontal(|ui| {
                ui.label(&self.status_message);
                ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                    ui.label(
                        egui::RichText::new("Powered by Gemini")
                            .size(11.0)
                            .color(self.theme.text_muted),
                    );
                });
            });
        });

        // Main content area, dispatched on the session phase
        let action = egui::CentralPanel::default()
            .show(ctx, |ui| ui::render_session(ui, &self.theme, &self.session))
            .inner;

        match action {
            ViewAction::StartSearch => self.start_search(),
            ViewAction::Reset => self.reset(),
            ViewAction::None => {}
        }

        ui::render_about_dialog(ctx, &self.theme, &mut self.show_about_dialog);
    }
}
