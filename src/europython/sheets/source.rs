use std::collections::HashMap;
use std::fs;
use std::path::Path;

use tracing::{info, instrument, warn};

use crate::europython::sheets::error::{Result, ToolError};
use crate::europython::sheets::model::{ConferenceExport, Event, RecordId, Speaker, Talk};

/// Read-only accessors the collectors need from the conference database.
pub trait ConferenceSource {
    /// Accepted talks of `conference`, in export order.
    fn accepted_talks(&self, conference: &str) -> Vec<&Talk>;

    /// Speakers of `talk`, in listing order. Unknown ids are dropped.
    fn talk_speakers(&self, talk: &Talk) -> Vec<&Speaker>;

    /// Schedule slot of `talk`, if it was scheduled.
    fn talk_event(&self, talk: &Talk) -> Option<&Event>;

    /// Every schedule slot of `conference`.
    fn schedule_events(&self, conference: &str) -> Vec<&Event>;
}

/// [`ConferenceSource`] backed by a JSON export of the conference database.
#[derive(Debug, Clone, Default)]
pub struct JsonExport {
    export: ConferenceExport,
    speakers: HashMap<RecordId, usize>,
    talk_events: HashMap<RecordId, usize>,
}

impl JsonExport {
    pub fn new(export: ConferenceExport) -> Self {
        let speakers = export
            .speakers
            .iter()
            .enumerate()
            .map(|(index, speaker)| (speaker.id, index))
            .collect();
        let talk_events = export
            .events
            .iter()
            .enumerate()
            .filter_map(|(index, event)| event.talk.map(|talk| (talk, index)))
            .collect();
        Self {
            export,
            speakers,
            talk_events,
        }
    }

    /// Loads an export file written by the conference web application.
    #[instrument(level = "info", skip_all, fields(path = %path.display()))]
    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Err(ToolError::MissingInput(path.to_path_buf()));
        }
        let source = fs::read_to_string(path)?;
        let export: ConferenceExport = serde_json::from_str(&source)?;
        info!(
            talks = export.talks.len(),
            speakers = export.speakers.len(),
            events = export.events.len(),
            "conference export loaded"
        );
        Ok(Self::new(export))
    }
}

impl ConferenceSource for JsonExport {
    fn accepted_talks(&self, conference: &str) -> Vec<&Talk> {
        self.export
            .talks
            .iter()
            .filter(|talk| talk.conference == conference && talk.is_accepted())
            .collect()
    }

    fn talk_speakers(&self, talk: &Talk) -> Vec<&Speaker> {
        talk.speakers
            .iter()
            .filter_map(|id| match self.speakers.get(id) {
                Some(&index) => Some(&self.export.speakers[index]),
                None => {
                    warn!(talk = talk.id, speaker = *id, "talk references unknown speaker");
                    None
                }
            })
            .collect()
    }

    fn talk_event(&self, talk: &Talk) -> Option<&Event> {
        self.talk_events
            .get(&talk.id)
            .map(|&index| &self.export.events[index])
    }

    fn schedule_events(&self, conference: &str) -> Vec<&Event> {
        self.export
            .events
            .iter()
            .filter(|event| event.conference == conference)
            .collect()
    }
}
