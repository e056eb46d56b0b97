use std::collections::BTreeMap;

use tracing::{debug, info, instrument};
use url::Url;

use crate::europython::sheets::config::ExportSettings;
use crate::europython::sheets::error::Result;
use crate::europython::sheets::io::store::{CellValue, Row};
use crate::europython::sheets::model::Speaker;
use crate::europython::sheets::source::ConferenceSource;
use crate::europython::sheets::text::{title_case, twitter_handle};

/// Column headers of the Attendify speakers sheet, in order.
pub const SPEAKER_COLUMNS: [&str; 13] = [
    "First Name",
    "Last Name",
    "Company (Optional)",
    "Position (Optional)",
    "Group (Optional)",
    "Profile (Optional)",
    "Email (Optional)",
    "Phone (Optional)",
    "Twitter (Optional)",
    "Facebook (Optional)",
    "LinkedIn (Optional)",
    "Google+ (Optional)",
    "UID (do not delete)",
];

/// One row of the speakers sheet.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord)]
pub struct SpeakerRow {
    pub first_name: String,
    pub last_name: String,
    pub company: String,
    pub position: String,
    pub profile: String,
    pub twitter: String,
}

impl SpeakerRow {
    /// Cells in [`SPEAKER_COLUMNS`] order. Unpublished columns and the UID
    /// are blank.
    pub fn into_row(self) -> Row {
        [
            self.first_name,
            self.last_name,
            self.company,
            self.position,
            String::new(),
            self.profile,
            String::new(),
            String::new(),
            self.twitter,
            String::new(),
            String::new(),
            String::new(),
            String::new(),
        ]
        .into_iter()
        .map(CellValue::from)
        .collect()
    }
}

/// Collects every speaker of an accepted talk, once, sorted by name.
#[instrument(level = "info", skip(source, settings))]
pub fn collect_speakers<S: ConferenceSource + ?Sized>(
    source: &S,
    settings: &ExportSettings,
    conference: &str,
) -> Result<Vec<SpeakerRow>> {
    let mut speakers: BTreeMap<u64, &Speaker> = BTreeMap::new();
    for talk in source.accepted_talks(conference) {
        for speaker in source.talk_speakers(talk) {
            speakers.insert(speaker.id, speaker);
        }
    }

    let mut rows = Vec::with_capacity(speakers.len());
    for speaker in speakers.into_values() {
        if let Some(row) = speaker_row(speaker, settings)? {
            rows.push(row);
        }
    }
    rows.sort();
    info!(speakers = rows.len(), "collected speakers");
    Ok(rows)
}

/// Builds the row for one speaker, or `None` when the speaker must not be
/// published.
pub fn speaker_row(speaker: &Speaker, settings: &ExportSettings) -> Result<Option<SpeakerRow>> {
    let Some(profile) = &speaker.profile else {
        info!(speaker = speaker.id, "speaker has no attendee profile; skipping");
        return Ok(None);
    };
    if !profile.is_public() {
        debug!(speaker = speaker.id, "speaker profile is not public; skipping");
        return Ok(None);
    }

    let first_name = title_case(&speaker.first_name);
    let last_name = title_case(&speaker.last_name);
    if first_name == "To Be" && last_name == "Announced" {
        return Ok(None);
    }

    let url = profile_url(settings, &profile.slug)?;
    Ok(Some(SpeakerRow {
        first_name,
        last_name,
        company: profile.company.clone(),
        position: profile.job_title.clone(),
        profile: format!(r#"<a href="{url}">{}</a>"#, settings.profile_link_text),
        twitter: twitter_handle(&profile.twitter).to_string(),
    }))
}

/// Absolute URL of a public profile page.
pub fn profile_url(settings: &ExportSettings, slug: &str) -> Result<Url> {
    let base = Url::parse(&settings.website_url)?;
    Ok(base.join(&settings.profile_path.replace("{slug}", slug))?)
}
