//! Map-link capability.
//!
//! The core never depends on a concrete map provider at compile time; venue
//! views go through [`MapRenderer`] and get back a URL to hand to the user.

use crate::api::types::Coordinates;

/// Narrow seam for whatever renders venue locations.
pub trait MapRenderer {
    /// Produces a link (or embed reference) for the given coordinates.
    /// Must not fail: a missing provider key degrades, it doesn't crash.
    fn render_map(&self, coordinates: &Coordinates, marker_label: &str) -> String;
}

/// Link-building renderer. With an API key it produces a static-map image
/// URL; without one it falls back to a plain maps search link.
#[derive(Debug, Clone, Default)]
pub struct StaticMapLink {
    api_key: Option<String>,
}

impl StaticMapLink {
    pub fn new(api_key: Option<String>) -> Self {
        let api_key = api_key.filter(|k| !k.trim().is_empty());
        Self { api_key }
    }
}

impl MapRenderer for StaticMapLink {
    fn render_map(&self, coordinates: &Coordinates, marker_label: &str) -> String {
        let Coordinates {
            latitude,
            longitude,
        } = *coordinates;

        match &self.api_key {
            Some(key) => {
                let label = marker_label
                    .chars()
                    .next()
                    .filter(char::is_ascii_alphanumeric)
                    .map(|c| c.to_ascii_uppercase())
                    .unwrap_or('V');
                format!(
                    "https://maps.googleapis.com/maps/api/staticmap?center={latitude},{longitude}&zoom=16&size=640x360&markers=label:{label}%7C{latitude},{longitude}&key={key}"
                )
            }
            None => format!("https://maps.google.com/maps?q={latitude},{longitude}"),
        }
    }
}
