use chrono::NaiveDateTime;
use serde::Deserialize;

/// Numeric primary key as exported by the conference database.
pub type RecordId = u64;

/// Status value of talks that made it into the programme.
pub const ACCEPTED: &str = "accepted";

/// Visibility value of public attendee profiles.
pub const PUBLIC_VISIBILITY: &str = "p";

/// A talk submission.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Talk {
    pub id: RecordId,
    pub conference: String,
    pub status: String,
    /// Submission type code, e.g. `t_30` or `p_180`. Only the first letter
    /// is significant.
    #[serde(rename = "type", default)]
    pub talk_type: String,
    /// Type override set by the programme team, e.g. `k` for keynotes.
    #[serde(default)]
    pub admin_type: String,
    pub title: String,
    #[serde(rename = "abstract", default)]
    pub abstract_text: String,
    /// Speaker ids in listing order.
    #[serde(default)]
    pub speakers: Vec<RecordId>,
}

impl Talk {
    pub fn is_accepted(&self) -> bool {
        self.status == ACCEPTED
    }

    /// One-letter programme category: `m` and `k` admin types win over the
    /// submission type.
    pub fn category(&self) -> Option<char> {
        match self.admin_type.chars().next() {
            Some(admin @ ('m' | 'k')) => Some(admin),
            _ => self.talk_type.chars().next(),
        }
    }

    pub fn is_poster(&self) -> bool {
        self.talk_type.starts_with('p')
    }
}

/// A speaker account and its attendee profile.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Speaker {
    pub id: RecordId,
    pub first_name: String,
    pub last_name: String,
    #[serde(default)]
    pub profile: Option<Profile>,
}

impl Speaker {
    /// "First Last", exactly as entered.
    pub fn display_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Profile {
    pub slug: String,
    pub visibility: String,
    #[serde(default)]
    pub company: String,
    #[serde(default)]
    pub job_title: String,
    #[serde(default)]
    pub twitter: String,
}

impl Profile {
    pub fn is_public(&self) -> bool {
        self.visibility == PUBLIC_VISIBILITY
    }
}

/// A schedule slot, either backing a talk or standing on its own (breaks,
/// lightning talks, social events).
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Event {
    pub id: RecordId,
    pub conference: String,
    /// Talk scheduled in this slot, if any.
    #[serde(default)]
    pub talk: Option<RecordId>,
    /// Free-form title for slots without a talk.
    #[serde(default)]
    pub custom: String,
    #[serde(rename = "abstract", default)]
    pub abstract_text: String,
    pub start: NaiveDateTime,
    pub end: NaiveDateTime,
    /// Track titles; the first one names the room.
    #[serde(default)]
    pub tracks: Vec<String>,
}

impl Event {
    pub fn time_range(&self) -> (NaiveDateTime, NaiveDateTime) {
        (self.start, self.end)
    }

    pub fn room(&self) -> &str {
        self.tracks.first().map(String::as_str).unwrap_or_default()
    }
}

/// Full JSON export of the conference database.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct ConferenceExport {
    #[serde(default)]
    pub talks: Vec<Talk>,
    #[serde(default)]
    pub speakers: Vec<Speaker>,
    #[serde(default)]
    pub events: Vec<Event>,
}
