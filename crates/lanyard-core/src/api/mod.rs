//! Typed API gateway.
//!
//! Single point of outbound network access: hides transport, auth-header
//! injection, and envelope unwrapping. The bearer token is read from the
//! shared [`TokenCell`] per request, so the gateway never holds its own
//! copy of the credential.

use std::sync::Arc;

use anyhow::Result;
use reqwest::{Method, RequestBuilder, StatusCode};
use serde::Serialize;
use serde::de::DeserializeOwned;
use tracing::debug;

use crate::config::Config;
use crate::session::TokenCell;

mod envelope;
pub mod errors;
pub mod types;

pub use envelope::Envelope;
pub use errors::{ApiError, SessionError};
use types::{
    AuthPayload, DriveLink, Event, EventDetail, GeneralInfo, RegisterPayload, Registration,
    Schedule, Section, Speaker, Sponsor, Venue,
};

/// Gateway to the event-attendance backend.
pub struct ApiClient {
    http: reqwest::Client,
    base_url: String,
    tokens: Arc<TokenCell>,
}

impl ApiClient {
    /// Builds a gateway from config plus the session's token cell.
    pub fn new(config: &Config, tokens: Arc<TokenCell>) -> Result<Self> {
        let http = reqwest::Client::builder()
            .timeout(config.request_timeout())
            .build()?;

        Ok(Self {
            http,
            base_url: config.effective_api_base_url(),
            tokens,
        })
    }

    /// POST /auth/login
    pub async fn login(&self, email: &str, password: &str) -> Result<AuthPayload, ApiError> {
        self.post(
            "/auth/login",
            &serde_json::json!({ "email": email, "password": password }),
            "Login failed",
        )
        .await
    }

    /// POST /auth/register. Returns the server's ack message.
    pub async fn register(&self, payload: &RegisterPayload) -> Result<String, ApiError> {
        let envelope = self
            .send::<serde_json::Value>(Method::POST, "/auth/register", Some(payload))
            .await?;
        envelope.into_ack("Account created", "Registration failed")
    }

    /// GET /events
    pub async fn list_events(&self) -> Result<Vec<Event>, ApiError> {
        self.get("/events", "Failed to fetch events").await
    }

    /// GET /events/{id}
    pub async fn get_event(&self, id: &str) -> Result<Event, ApiError> {
        self.get(&format!("/events/{id}"), "Failed to fetch event")
            .await
    }

    /// GET /events/{id}/{section} with a caller-chosen payload type.
    pub async fn event_section<T: DeserializeOwned>(
        &self,
        event_id: &str,
        section: Section,
    ) -> Result<T, ApiError> {
        self.get(
            &format!("/events/{event_id}/{}", section.as_path()),
            section.fallback_message(),
        )
        .await
    }

    pub async fn general_info(&self, event_id: &str) -> Result<GeneralInfo, ApiError> {
        self.event_section(event_id, Section::GeneralInfo).await
    }

    pub async fn schedule(&self, event_id: &str) -> Result<Schedule, ApiError> {
        self.event_section(event_id, Section::Schedule).await
    }

    pub async fn speakers(&self, event_id: &str) -> Result<Vec<Speaker>, ApiError> {
        self.event_section(event_id, Section::Speakers).await
    }

    pub async fn sponsors(&self, event_id: &str) -> Result<Vec<Sponsor>, ApiError> {
        self.event_section(event_id, Section::Sponsors).await
    }

    pub async fn venue(&self, event_id: &str) -> Result<Venue, ApiError> {
        self.event_section(event_id, Section::Venue).await
    }

    pub async fn event_details(&self, event_id: &str) -> Result<Vec<EventDetail>, ApiError> {
        self.event_section(event_id, Section::EventDetails).await
    }

    /// GET /user/registrations/{eventId}
    pub async fn user_registration(&self, event_id: &str) -> Result<Registration, ApiError> {
        self.get(
            &format!("/user/registrations/{event_id}"),
            "Failed to fetch registration",
        )
        .await
    }

    /// GET /user/registrations
    pub async fn list_user_registrations(&self) -> Result<Vec<Registration>, ApiError> {
        self.get("/user/registrations", "Failed to fetch registrations")
            .await
    }

    /// GET /events/{id}/google-drive. Returns the photo-drive URL.
    pub async fn drive_link(&self, event_id: &str) -> Result<String, ApiError> {
        let link: DriveLink = self
            .get(
                &format!("/events/{event_id}/google-drive"),
                "Failed to fetch photo drive link",
            )
            .await?;
        Ok(link.url)
    }

    async fn get<T: DeserializeOwned>(
        &self,
        path: &str,
        fallback: &str,
    ) -> Result<T, ApiError> {
        let envelope = self.send::<T>(Method::GET, path, None::<&()>).await?;
        envelope.into_data(fallback)
    }

    async fn post<T: DeserializeOwned, B: Serialize>(
        &self,
        path: &str,
        body: &B,
        fallback: &str,
    ) -> Result<T, ApiError> {
        let envelope = self.send::<T>(Method::POST, path, Some(body)).await?;
        envelope.into_data(fallback)
    }

    /// Issues one request and decodes the envelope. 401 drops the bearer
    /// token before the error propagates, so no later request goes out
    /// under a dead credential.
    async fn send<T: DeserializeOwned>(
        &self,
        method: Method,
        path: &str,
        body: Option<&impl Serialize>,
    ) -> Result<Envelope<T>, ApiError> {
        debug!(%method, path, "api request");

        let mut request = self.request(method, path);
        if let Some(body) = body {
            request = request.json(body);
        }

        let response = request
            .send()
            .await
            .map_err(|e| ApiError::from_reqwest(&e))?;

        let status = response.status();
        if status == StatusCode::UNAUTHORIZED {
            self.tokens.clear();
            return Err(ApiError::AuthExpired);
        }
        if !status.is_success() {
            return Err(ApiError::Transport(format!("HTTP {status}")));
        }

        response
            .json::<Envelope<T>>()
            .await
            .map_err(|e| ApiError::Transport(format!("Invalid response body: {e}")))
    }

    fn request(&self, method: Method, path: &str) -> RequestBuilder {
        let url = format!("{}{}", self.base_url, path);
        let mut builder = self
            .http
            .request(method, &url)
            .header("content-type", "application/json")
            .header("accept", "application/json");

        if let Some(token) = self.tokens.get() {
            builder = builder.header("authorization", format!("Bearer {token}"));
        }

        builder
    }
}
