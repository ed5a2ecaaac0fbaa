//! Wire types for the event-attendance API.
//!
//! All shapes are immutable snapshots of what the backend returns; there is
//! no client-side merge logic. Field names are camelCase on the wire, with
//! Mongo-style `_id` identifiers.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Identity and contact fields of an attendee.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserProfile {
    pub name: String,
    pub company: String,
    pub position: String,
    pub phone: String,
    /// Brazilian tax id (CPF).
    pub cpf: String,
}

/// The authenticated user as returned by the backend and persisted locally.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StoredUser {
    #[serde(rename = "_id")]
    pub id: String,
    pub email: String,
    pub role: String,
    pub profile: UserProfile,
}

/// Payload of a successful login.
#[derive(Debug, Clone, Deserialize)]
pub struct AuthPayload {
    pub user: StoredUser,
    pub token: String,
}

/// Request body for account registration.
#[derive(Debug, Clone, Serialize)]
pub struct RegisterPayload {
    pub email: String,
    pub password: String,
    pub profile: UserProfile,
}

/// An event as listed on the home screen.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Event {
    #[serde(rename = "_id")]
    pub id: String,
    pub title: String,
    #[serde(rename = "type", default)]
    pub kind: Option<String>,
    #[serde(default)]
    pub date: Option<String>,
    #[serde(default)]
    pub location: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
}

/// A named sub-resource of an event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Section {
    GeneralInfo,
    Schedule,
    Speakers,
    Sponsors,
    Venue,
    EventDetails,
}

impl Section {
    /// URL path segment for this section.
    pub fn as_path(self) -> &'static str {
        match self {
            Section::GeneralInfo => "general-info",
            Section::Schedule => "schedule",
            Section::Speakers => "speakers",
            Section::Sponsors => "sponsors",
            Section::Venue => "venue",
            Section::EventDetails => "event-details",
        }
    }

    /// Fixed fallback message when the server fails without saying why.
    pub(crate) fn fallback_message(self) -> &'static str {
        match self {
            Section::GeneralInfo => "Failed to fetch general info",
            Section::Schedule => "Failed to fetch schedule",
            Section::Speakers => "Failed to fetch speakers",
            Section::Sponsors => "Failed to fetch sponsors",
            Section::Venue => "Failed to fetch venue",
            Section::EventDetails => "Failed to fetch event details",
        }
    }
}

impl fmt::Display for Section {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_path())
    }
}

impl FromStr for Section {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "general-info" => Ok(Section::GeneralInfo),
            "schedule" => Ok(Section::Schedule),
            "speakers" => Ok(Section::Speakers),
            "sponsors" => Ok(Section::Sponsors),
            "venue" => Ok(Section::Venue),
            "event-details" => Ok(Section::EventDetails),
            other => Err(format!("unknown section: {other}")),
        }
    }
}

/// Schedule for an event, split by day.
#[derive(Debug, Clone, Deserialize)]
pub struct Schedule {
    #[serde(rename = "_id")]
    pub id: String,
    pub days: Vec<ScheduleDay>,
}

impl Schedule {
    /// The day a schedule view opens on: the first day in the payload.
    pub fn default_day(&self) -> Option<u32> {
        self.days.first().map(|d| d.day)
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct ScheduleDay {
    pub day: u32,
    pub date: String,
    pub items: Vec<ScheduleItem>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScheduleItem {
    #[serde(rename = "_id")]
    pub id: String,
    pub start_time: String,
    pub end_time: String,
    pub title: String,
    #[serde(rename = "type")]
    pub kind: ScheduleItemKind,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub speaker: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ScheduleItemKind {
    Talk,
    Break,
    Networking,
    Panel,
    Sponsor,
    Opening,
}

impl ScheduleItemKind {
    pub fn label(self) -> &'static str {
        match self {
            ScheduleItemKind::Talk => "talk",
            ScheduleItemKind::Break => "break",
            ScheduleItemKind::Networking => "networking",
            ScheduleItemKind::Panel => "panel",
            ScheduleItemKind::Sponsor => "sponsor",
            ScheduleItemKind::Opening => "opening",
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct Speaker {
    #[serde(rename = "_id")]
    pub id: String,
    pub name: String,
    pub title: String,
    pub description: String,
    #[serde(rename = "type")]
    pub kind: String,
    #[serde(default)]
    pub photo: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Sponsor {
    #[serde(rename = "_id")]
    pub id: String,
    pub name: String,
    pub category: SponsorTier,
    #[serde(default)]
    pub logo: Option<String>,
}

/// Sponsorship tiers as the backend spells them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
pub enum SponsorTier {
    #[serde(rename = "MASTER")]
    Master,
    #[serde(rename = "GOLD")]
    Gold,
    #[serde(rename = "SILVER")]
    Silver,
    #[serde(rename = "APOIO")]
    Support,
}

impl SponsorTier {
    pub fn label(self) -> &'static str {
        match self {
            SponsorTier::Master => "MASTER",
            SponsorTier::Gold => "GOLD",
            SponsorTier::Silver => "SILVER",
            SponsorTier::Support => "APOIO",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
pub struct Coordinates {
    pub latitude: f64,
    pub longitude: f64,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Venue {
    #[serde(rename = "_id")]
    pub id: String,
    pub name: String,
    pub short_address: String,
    pub neighborhood: String,
    pub city: String,
    pub zip_code: String,
    #[serde(default)]
    pub description: Option<String>,
    pub coordinates: Coordinates,
    #[serde(default)]
    pub phone: Option<String>,
    #[serde(default)]
    pub website: Option<String>,
    #[serde(default)]
    pub rating: Option<String>,
    #[serde(default)]
    pub facilities: Vec<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct GeneralInfo {
    #[serde(rename = "_id")]
    pub id: String,
    pub title: String,
    pub sections: Vec<InfoSection>,
    #[serde(default)]
    pub highlight: Option<InfoFeature>,
    #[serde(default)]
    pub features: Option<Vec<InfoFeature>>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct InfoSection {
    pub content: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct InfoFeature {
    pub icon: String,
    pub title: String,
    pub description: String,
}

/// One entry on the event-details screen.
///
/// Navigation targets come from the server-supplied `route` key; entries
/// without a recognized key are informational only.
#[derive(Debug, Clone, Deserialize)]
pub struct EventDetail {
    #[serde(rename = "_id")]
    pub id: String,
    pub title: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub icon: Option<String>,
    #[serde(default)]
    pub route: Option<DetailRoute>,
}

/// Server-supplied route key on an event-detail entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum DetailRoute {
    GeneralInfo,
    Venue,
    Schedule,
    Profile,
    Photos,
}

impl DetailRoute {
    pub fn label(self) -> &'static str {
        match self {
            DetailRoute::GeneralInfo => "general-info",
            DetailRoute::Venue => "venue",
            DetailRoute::Schedule => "schedule",
            DetailRoute::Profile => "profile",
            DetailRoute::Photos => "photos",
        }
    }
}

/// The caller's registration for an event (the digital credential).
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Registration {
    #[serde(rename = "_id")]
    pub id: String,
    pub registration_number: String,
    pub registration_type: String,
    /// Embedded event summary (the backend populates the reference).
    #[serde(rename = "eventId")]
    pub event: RegistrationEvent,
}

#[derive(Debug, Clone, Deserialize)]
pub struct RegistrationEvent {
    pub title: String,
    #[serde(default)]
    pub date: Option<String>,
    #[serde(default)]
    pub location: Option<String>,
}

/// Payload of the photos drive-link endpoint.
#[derive(Debug, Clone, Deserialize)]
pub(crate) struct DriveLink {
    #[serde(rename = "googleDriveURL")]
    pub url: String,
}
