//! Gemini API client for grounded place search.
//!
//! This module provides:
//!
//! - `GeminiClient`: HTTP client wrapper around the `generateContent` endpoint
//! - `Place` and `GroundingChunk`: deserialized grounding citations
//! - `find_nearby`: one grounded query for ice cream shops around a coordinate
//!
//! The request carries the Google Maps grounding tool plus a
//! `retrievalConfig.latLng` so the model answers for the caller's actual
//! position. The API is treated as an opaque black box: on any transport or
//! API failure the caller gets a single collapsed error and the detail is
//! only logged.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Gemini API base URL
const API_BASE: &str = "https://generativelanguage.googleapis.com/v1beta";

/// Fixed query sent with every search
const PROMPT: &str =
    "What are some good ice cream shops near me? Give me a friendly and brief summary.";

/// User agent for API requests
const USER_AGENT: &str = concat!("Sundae/", env!("CARGO_PKG_VERSION"));

/// A place citation with an outbound link
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Place {
    pub uri: String,
    pub title: String,
}

/// One grounding citation returned by the API.
///
/// Either side may be absent; only `maps` entries are rendered as cards.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct GroundingChunk {
    pub maps: Option<Place>,
    pub web: Option<Place>,
}

/// Outcome of one grounded search
#[derive(Debug, Clone, PartialEq)]
pub struct SessionResult {
    /// Free-form summary text, absent when the model returned no text parts
    pub text: Option<String>,
    /// Grounding citations of the first candidate, in response order
    pub chunks: Vec<GroundingChunk>,
}

/// Search failure, collapsed for the UI and detailed only in logs
#[derive(Debug, Error)]
pub enum SearchError {
    #[error("failed to reach the Gemini API")]
    Transport(#[from] reqwest::Error),
    #[error("Gemini API returned status {0}")]
    Api(reqwest::StatusCode),
}

// Request wire types

#[derive(Serialize)]
struct GenerateContentRequest<'a> {
    contents: Vec<Content<'a>>,
    tools: Vec<Tool>,
    #[serde(rename = "toolConfig")]
    tool_config: ToolConfig,
}

#[derive(Serialize)]
struct Content<'a> {
    parts: Vec<Part<'a>>,
}

#[derive(Serialize)]
struct Part<'a> {
    text: &'a str,
}

#[derive(Serialize)]
struct Tool {
    #[serde(rename = "googleMaps")]
    google_maps: MapsTool,
}

/// Serializes as `{}`; the Maps grounding tool takes no parameters
#[derive(Serialize)]
struct MapsTool {}

#[derive(Serialize)]
struct ToolConfig {
    #[serde(rename = "retrievalConfig")]
    retrieval_config: RetrievalConfig,
}

#[derive(Serialize)]
struct RetrievalConfig {
    #[serde(rename = "latLng")]
    lat_lng: LatLng,
}

#[derive(Serialize)]
struct LatLng {
    latitude: f64,
    longitude: f64,
}

// Response wire types

#[derive(Deserialize)]
struct GenerateContentResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Deserialize)]
struct Candidate {
    content: Option<CandidateContent>,
    #[serde(rename = "groundingMetadata")]
    grounding_metadata: Option<GroundingMetadata>,
}

#[derive(Deserialize)]
struct CandidateContent {
    #[serde(default)]
    parts: Vec<ResponsePart>,
}

#[derive(Deserialize)]
struct ResponsePart {
    text: Option<String>,
}

#[derive(Deserialize)]
struct GroundingMetadata {
    #[serde(rename = "groundingChunks", default)]
    grounding_chunks: Vec<GroundingChunk>,
}

/// Gemini API client
#[derive(Clone)]
pub struct GeminiClient {
    client: reqwest::Client,
    api_key: String,
    model: String,
}

impl GeminiClient {
    /// Create a new client for the given model.
    ///
    /// The API key comes from the environment at startup; a missing key is a
    /// fatal startup condition handled in `main`, never here.
    pub fn new(api_key: String, model: String) -> anyhow::Result<Self> {
        let client = reqwest::Client::builder().user_agent(USER_AGENT).build()?;

        Ok(Self {
            client,
            api_key,
            model,
        })
    }

    /// Get a reference to the underlying HTTP client
    pub fn client(&self) -> &reqwest::Client {
        &self.client
    }

    /// Ask for ice cream shops near the given coordinates.
    ///
    /// Issues exactly one `generateContent` request with the Maps grounding
    /// tool. No retries, no partial results; the geolocation leg has already
    /// resolved by the time this runs.
    pub async fn find_nearby(
        &self,
        latitude: f64,
        longitude: f64,
    ) -> Result<SessionResult, SearchError> {
        let url = format!("{}/models/{}:generateContent", API_BASE, self.model);

        let request = GenerateContentRequest {
            contents: vec![Content {
                parts: vec![Part { text: PROMPT }],
            }],
            tools: vec![Tool {
                google_maps: MapsTool {},
            }],
            tool_config: ToolConfig {
                retrieval_config: RetrievalConfig {
                    lat_lng: LatLng {
                        latitude,
                        longitude,
                    },
                },
            },
        };

        let response = self
            .client
            .post(&url)
            .header("x-goog-api-key", &self.api_key)
            .json(&request)
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            tracing::error!("Gemini API error: {} - {}", status, body);
            return Err(SearchError::Api(status));
        }

        let response: GenerateContentResponse = response.json().await?;
        Ok(extract_result(response))
    }
}

/// Pull the summary text and grounding chunks out of the first candidate.
///
/// Absent text parts collapse to `None`; absent grounding metadata collapses
/// to an empty chunk list. Both cases are decided by the session reducer, not
/// here.
fn extract_result(response: GenerateContentResponse) -> SessionResult {
    let Some(candidate) = response.candidates.into_iter().next() else {
        return SessionResult {
            text: None,
            chunks: Vec::new(),
        };
    };

    let text = candidate.content.map(|content| {
        content
            .parts
            .into_iter()
            .filter_map(|part| part.text)
            .collect::<String>()
    });
    let text = text.filter(|t| !t.is_empty());

    let chunks = candidate
        .grounding_metadata
        .map(|metadata| metadata.grounding_chunks)
        .unwrap_or_default();

    SessionResult { text, chunks }
}
