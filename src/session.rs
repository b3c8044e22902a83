//! Search session state machine.
//!
//! The whole UI flow hangs off one `SearchSession`: a five-phase state with
//! transitions driven exclusively through `begin_search`, `reset`, and the
//! `apply` reducer. Rendering never mutates the session; the app layer feeds
//! it events from the background search task.
//!
//! Every search attempt gets a monotonically increasing id. `reset` and
//! `begin_search` bump the id, and `apply` drops any event tagged with a
//! stale id, so a callback from an abandoned search can never overwrite the
//! state of a newer one.

use crate::gemini::{GroundingChunk, SessionResult};
use crate::geolocate::GeolocateError;

/// Shown when the API returned places but no summary text
pub const FALLBACK_SUMMARY: &str = "I found some great places for you! Here they are:";

/// Shown when the API answered but grounded no places
pub const NO_SHOPS_MESSAGE: &str =
    "Sorry, I couldn't find any ice cream shops nearby. Maybe try moving to a different spot?";

/// Shown for any search transport/API failure
pub const FETCH_FAILED_MESSAGE: &str =
    "An error occurred while fetching ice cream places. Please try again.";

/// The single discrete UI state of the session
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Phase {
    #[default]
    Idle,
    GettingLocation,
    FetchingPlaces,
    ShowingResults,
    Error,
}

/// Outcomes the background search task reports back
#[derive(Debug)]
pub enum SessionEvent {
    /// Geolocation resolved; the API call is now in flight
    LocationAcquired,
    /// Geolocation failed with one of the four reason codes
    LocationFailed(GeolocateError),
    /// The API answered; may still carry zero chunks
    ResultsReceived(SessionResult),
    /// The API call failed; detail was already logged
    SearchFailed,
}

/// Single source of truth for the view flow.
///
/// Invariants: an error message and results are never both populated;
/// `ShowingResults` implies a non-empty chunk list; `Error` implies a
/// message is set and results are cleared.
#[derive(Debug, Default)]
pub struct SearchSession {
    phase: Phase,
    error: Option<String>,
    text: Option<String>,
    chunks: Vec<GroundingChunk>,
    attempt: u64,
}

impl SearchSession {
    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub fn text(&self) -> Option<&str> {
        self.text.as_deref()
    }

    pub fn chunks(&self) -> &[GroundingChunk] {
        &self.chunks
    }

    /// Id of the attempt currently allowed to mutate state
    pub fn attempt(&self) -> u64 {
        self.attempt
    }

    /// Return to `Idle` and clear everything. Callable from any phase.
    ///
    /// Does not abort an in-flight search; bumping the attempt id makes its
    /// eventual outcome a no-op instead.
    pub fn reset(&mut self) {
        self.phase = Phase::Idle;
        self.error = None;
        self.text = None;
        self.chunks.clear();
        self.attempt += 1;
    }

    /// Start a new search attempt and return its id.
    ///
    /// Clears any prior error or results and moves to `GettingLocation`.
    pub fn begin_search(&mut self) -> u64 {
        self.phase = Phase::GettingLocation;
        self.error = None;
        self.text = None;
        self.chunks.clear();
        self.attempt += 1;
        self.attempt
    }

    /// Apply one event from the search task tagged with its attempt id.
    ///
    /// Events from a superseded attempt are discarded.
    pub fn apply(&mut self, attempt: u64, event: SessionEvent) {
        if attempt != self.attempt {
            tracing::debug!(
                "Discarding stale search event (attempt {} != {})",
                attempt,
                self.attempt
            );
            return;
        }

        match event {
            SessionEvent::LocationAcquired => {
                self.phase = Phase::FetchingPlaces;
            }
            SessionEvent::LocationFailed(err) => {
                self.fail(err.user_message().to_string());
            }
            SessionEvent::ResultsReceived(result) => {
                if result.chunks.is_empty() {
                    self.fail(NO_SHOPS_MESSAGE.to_string());
                } else {
                    self.text = Some(result.text.unwrap_or_else(|| FALLBACK_SUMMARY.to_string()));
                    self.chunks = result.chunks;
                    self.error = None;
                    self.phase = Phase::ShowingResults;
                }
            }
            SessionEvent::SearchFailed => {
                self.fail(FETCH_FAILED_MESSAGE.to_string());
            }
        }
    }

    fn fail(&mut self, message: String) {
        self.error = Some(message);
        self.text = None;
        self.chunks.clear();
        self.phase = Phase::Error;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::gemini::Place;

    fn maps_chunk(uri: &str, title: &str) -> GroundingChunk {
        GroundingChunk {
            maps: Some(Place {
                uri: uri.to_string(),
                title: title.to_string(),
            }),
            web: None,
        }
    }

    #[test]
    fn test_begin_search_enters_getting_location() {
        let mut session = SearchSession::default();
        let attempt = session.begin_search();

        assert_eq!(session.phase(), Phase::GettingLocation);
        assert_eq!(attempt, session.attempt());
        assert!(session.error().is_none());
    }

    #[test]
    fn test_location_acquired_enters_fetching() {
        let mut session = SearchSession::default();
        let attempt = session.begin_search();
        session.apply(attempt, SessionEvent::LocationAcquired);

        assert_eq!(session.phase(), Phase::FetchingPlaces);
    }

    #[test]
    fn test_location_failure_messages() {
        let cases = [
            (
                GeolocateError::PermissionDenied,
                "Please allow location access to find nearby ice cream shops.",
            ),
            (
                GeolocateError::PositionUnavailable("x".to_string()),
                "Your location information is unavailable.",
            ),
            (
                GeolocateError::Timeout,
                "The request to get your location timed out.",
            ),
            (
                GeolocateError::Service(reqwest::StatusCode::BAD_GATEWAY),
                "Could not get your location.",
            ),
        ];

        for (err, expected) in cases {
            let mut session = SearchSession::default();
            let attempt = session.begin_search();
            session.apply(attempt, SessionEvent::LocationFailed(err));

            assert_eq!(session.phase(), Phase::Error);
            assert_eq!(session.error(), Some(expected));
            assert!(session.text().is_none());
            assert!(session.chunks().is_empty());
        }
    }

    #[test]
    fn test_results_with_chunks_shows_results() {
        let mut session = SearchSession::default();
        let attempt = session.begin_search();
        session.apply(attempt, SessionEvent::LocationAcquired);
        session.apply(
            attempt,
            SessionEvent::ResultsReceived(SessionResult {
                text: Some("Try Bob's!".to_string()),
                chunks: vec![maps_chunk("https://maps/x", "Bob's Ice Cream")],
            }),
        );

        assert_eq!(session.phase(), Phase::ShowingResults);
        assert_eq!(session.text(), Some("Try Bob's!"));
        assert_eq!(session.chunks().len(), 1);
        assert_eq!(
            session.chunks()[0].maps.as_ref().unwrap().title,
            "Bob's Ice Cream"
        );
        assert!(session.error().is_none());
    }

    #[test]
    fn test_results_without_text_gets_fallback_summary() {
        let mut session = SearchSession::default();
        let attempt = session.begin_search();
        session.apply(
            attempt,
            SessionEvent::ResultsReceived(SessionResult {
                text: None,
                chunks: vec![maps_chunk("https://maps/x", "Bob's Ice Cream")],
            }),
        );

        assert_eq!(session.phase(), Phase::ShowingResults);
        assert_eq!(session.text(), Some(FALLBACK_SUMMARY));
    }

    #[test]
    fn test_zero_chunks_is_an_error_and_drops_text() {
        let mut session = SearchSession::default();
        let attempt = session.begin_search();
        session.apply(
            attempt,
            SessionEvent::ResultsReceived(SessionResult {
                text: Some("There are no shops.".to_string()),
                chunks: Vec::new(),
            }),
        );

        assert_eq!(session.phase(), Phase::Error);
        assert_eq!(session.error(), Some(NO_SHOPS_MESSAGE));
        assert!(session.text().is_none());
        assert!(session.chunks().is_empty());
    }

    #[test]
    fn test_search_failure_uses_generic_message() {
        let mut session = SearchSession::default();
        let attempt = session.begin_search();
        session.apply(attempt, SessionEvent::LocationAcquired);
        session.apply(attempt, SessionEvent::SearchFailed);

        assert_eq!(session.phase(), Phase::Error);
        assert_eq!(session.error(), Some(FETCH_FAILED_MESSAGE));
    }

    #[test]
    fn test_reset_clears_everything_from_any_phase() {
        let mut session = SearchSession::default();
        let attempt = session.begin_search();
        session.apply(
            attempt,
            SessionEvent::ResultsReceived(SessionResult {
                text: Some("Try Bob's!".to_string()),
                chunks: vec![maps_chunk("https://maps/x", "Bob's Ice Cream")],
            }),
        );
        session.reset();

        assert_eq!(session.phase(), Phase::Idle);
        assert!(session.error().is_none());
        assert!(session.text().is_none());
        assert!(session.chunks().is_empty());

        let attempt = session.begin_search();
        session.apply(attempt, SessionEvent::SearchFailed);
        session.reset();

        assert_eq!(session.phase(), Phase::Idle);
        assert!(session.error().is_none());
    }

    #[test]
    fn test_stale_attempt_events_are_discarded() {
        let mut session = SearchSession::default();
        let stale = session.begin_search();
        session.reset();

        session.apply(
            stale,
            SessionEvent::ResultsReceived(SessionResult {
                text: Some("old answer".to_string()),
                chunks: vec![maps_chunk("https://maps/old", "Old Shop")],
            }),
        );

        assert_eq!(session.phase(), Phase::Idle);
        assert!(session.text().is_none());
        assert!(session.chunks().is_empty());

        // A stale failure must not clobber a newer attempt either
        let current = session.begin_search();
        session.apply(stale, SessionEvent::SearchFailed);
        assert_eq!(session.phase(), Phase::GettingLocation);

        session.apply(current, SessionEvent::LocationAcquired);
        assert_eq!(session.phase(), Phase::FetchingPlaces);
    }

    #[test]
    fn test_full_scenario_near_mission_district() {
        // Coordinates (37.77, -122.41): geolocation resolves, API answers
        // with text and one maps chunk.
        let mut session = SearchSession::default();
        let attempt = session.begin_search();
        session.apply(attempt, SessionEvent::LocationAcquired);
        session.apply(
            attempt,
            SessionEvent::ResultsReceived(SessionResult {
                text: Some("Try Bob's!".to_string()),
                chunks: vec![maps_chunk("https://maps/x", "Bob's Ice Cream")],
            }),
        );

        assert_eq!(session.phase(), Phase::ShowingResults);
        assert_eq!(session.text(), Some("Try Bob's!"));
        let cards: Vec<&Place> = session
            .chunks()
            .iter()
            .filter_map(|chunk| chunk.maps.as_ref())
            .collect();
        assert_eq!(cards.len(), 1);
        assert_eq!(cards[0].title, "Bob's Ice Cream");
    }
}
