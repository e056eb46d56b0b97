use std::fs;
use std::path::Path;

use chrono::{Duration, NaiveDateTime};
use serde::Deserialize;
use tracing::debug;

use crate::europython::sheets::error::{Result, ToolError};

/// Settings for the export commands. Every field has a default, so a
/// settings file only needs to list what differs.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct ExportSettings {
    /// Base URL used to make profile links absolute.
    pub website_url: String,
    /// Path of a public profile; `{slug}` is replaced by the profile slug.
    pub profile_path: String,
    pub profile_link_text: String,
    /// Conference name shown in video descriptions.
    pub event_name: String,
    /// Venue line shown in video descriptions.
    pub location: String,
    /// Programme categories in output order.
    pub type_names: Vec<TypeName>,
    /// Fallback slot for poster sessions that have no schedule event.
    pub poster_session: Option<PosterSession>,
}

/// Maps a one-letter talk category to the plural label used as session type.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct TypeName {
    pub code: char,
    pub label: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct PosterSession {
    pub start: NaiveDateTime,
    pub duration_minutes: i64,
    pub room: String,
}

impl PosterSession {
    pub fn time_range(&self) -> (NaiveDateTime, NaiveDateTime) {
        (self.start, self.start + Duration::minutes(self.duration_minutes))
    }
}

impl Default for ExportSettings {
    fn default() -> Self {
        let type_names = [
            ('k', "Keynotes"),
            ('t', "Talks"),
            ('r', "Training sessions"),
            ('p', "Poster sessions"),
            ('i', "Interactive sessions"),
            ('n', "Panels"),
            ('h', "Help desks"),
            ('m', "EuroPython sessions"),
        ]
        .into_iter()
        .map(|(code, label)| TypeName {
            code,
            label: label.to_string(),
        })
        .collect();

        Self {
            website_url: "https://ep2018.europython.eu/".to_string(),
            profile_path: "/conference/p/{slug}".to_string(),
            profile_link_text: "Profile on EuroPython Website".to_string(),
            event_name: "EuroPython 2018".to_string(),
            location: "Edinburgh, UK".to_string(),
            type_names,
            poster_session: None,
        }
    }
}

impl ExportSettings {
    /// Reads settings from a JSON file, or returns the defaults when no path
    /// is given.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let Some(path) = path else {
            return Ok(Self::default());
        };
        if !path.exists() {
            return Err(ToolError::MissingInput(path.to_path_buf()));
        }
        let data = fs::read_to_string(path)?;
        let settings: Self = serde_json::from_str(&data)?;
        debug!(path = %path.display(), ?settings, "settings loaded");
        Ok(settings)
    }

    /// Session type label for a talk category, if the category is exported.
    pub fn type_label(&self, code: char) -> Option<&str> {
        self.type_names
            .iter()
            .find(|name| name.code == code)
            .map(|name| name.label.as_str())
    }
}
