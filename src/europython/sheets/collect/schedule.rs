use std::collections::{BTreeMap, HashSet};

use chrono::NaiveDateTime;
use tracing::{debug, info, instrument};

use crate::europython::sheets::config::ExportSettings;
use crate::europython::sheets::io::store::{CellValue, Row};
use crate::europython::sheets::model::{Event, RecordId, Talk};
use crate::europython::sheets::source::ConferenceSource;
use crate::europython::sheets::text::{TextFormat, format_text, title_case};

/// Column headers of the video schedule sheet, in order.
pub const SCHEDULE_COLUMNS: [&str; 11] = [
    "Speaker(s)",
    "Session Title",
    "Date",
    "Start Time",
    "End Time",
    "Video Title",
    "Video Description",
    "Session abstract",
    "Room",
    "Session Type",
    "UID (do not delete)",
];

/// One row of the video schedule sheet.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScheduleRow {
    pub speakers: String,
    pub title: String,
    pub date: String,
    pub start_time: String,
    pub end_time: String,
    pub video_title: String,
    pub video_description: String,
    pub abstract_html: String,
    pub room: String,
    pub session_type: String,
    /// Event id, blank for poster sessions placed through the fallback slot.
    pub uid: String,
}

impl ScheduleRow {
    /// Cells in [`SCHEDULE_COLUMNS`] order.
    pub fn into_row(self) -> Row {
        [
            self.speakers,
            self.title,
            self.date,
            self.start_time,
            self.end_time,
            self.video_title,
            self.video_description,
            self.abstract_html,
            self.room,
            self.session_type,
            self.uid,
        ]
        .into_iter()
        .map(CellValue::from)
        .collect()
    }
}

/// The record a schedule row is built from.
#[derive(Debug, Clone, Copy)]
pub enum Entry<'a> {
    Talk(&'a Talk),
    Event(&'a Event),
}

/// Collects accepted talks grouped by programme category, followed by the
/// schedule slots that do not carry one of those talks.
#[instrument(level = "info", skip(source, settings))]
pub fn collect_schedule<S: ConferenceSource + ?Sized>(
    source: &S,
    settings: &ExportSettings,
    conference: &str,
) -> Vec<ScheduleRow> {
    let mut by_category: BTreeMap<char, Vec<&Talk>> = BTreeMap::new();
    for talk in source.accepted_talks(conference) {
        match talk.category() {
            Some(category) if settings.type_label(category).is_some() => {
                by_category.entry(category).or_default().push(talk);
            }
            category => {
                debug!(title = %talk.title, ?category, "talk category is not exported; skipping");
            }
        }
    }

    let mut rows = Vec::new();
    let mut talk_events: HashSet<RecordId> = HashSet::new();

    for type_name in &settings.type_names {
        let Some(bag) = by_category.get_mut(&type_name.code) else {
            continue;
        };
        bag.sort_by_cached_key(|talk| title_case(&talk_title(talk)));

        for talk in bag.iter() {
            let event = source.talk_event(talk);
            if let Some(event) = event {
                talk_events.insert(event.id);
            }
            if let Some(row) = schedule_row(
                source,
                settings,
                Entry::Talk(talk),
                event,
                &type_name.label,
            ) {
                rows.push(row);
            }
        }
    }

    for event in source.schedule_events(conference) {
        if talk_events.contains(&event.id) {
            continue;
        }
        if let Some(row) = schedule_row(source, settings, Entry::Event(event), Some(event), "") {
            rows.push(row);
        }
    }

    info!(entries = rows.len(), "collected schedule");
    rows
}

/// Builds the row for a talk or a standalone event.
///
/// Returns `None` for entries without a title and for talks that have no
/// schedule slot (unless the poster-session fallback applies).
pub fn schedule_row<S: ConferenceSource + ?Sized>(
    source: &S,
    settings: &ExportSettings,
    entry: Entry<'_>,
    event: Option<&Event>,
    session_type: &str,
) -> Option<ScheduleRow> {
    let (speakers, title, abstract_html) = match entry {
        Entry::Talk(talk) => (
            speaker_listing(source, talk),
            talk_title(talk),
            format_text(&talk.abstract_text, TextFormat::HTML),
        ),
        Entry::Event(event) => (
            String::new(),
            format_text(&event.custom, TextFormat::PLAIN),
            format_text(&event.abstract_text, TextFormat::HTML),
        ),
    };

    let (time_range, room, uid) = match (event, entry) {
        (Some(event), _) => (event.time_range(), event.room().to_string(), event.id.to_string()),
        (None, Entry::Talk(talk)) => match &settings.poster_session {
            Some(poster) if talk.is_poster() => {
                (poster.time_range(), poster.room.clone(), String::new())
            }
            _ => {
                info!(
                    title = %title,
                    talk_type = %talk.talk_type,
                    "talk does not have an event associated with it; skipping"
                );
                return None;
            }
        },
        (None, Entry::Event(_)) => return None,
    };

    if title.is_empty() {
        debug!(uid = %uid, "entry without title; skipping");
        return None;
    }

    let (start, end) = time_range;
    let date = start.format("%Y-%m-%d").to_string();
    let video_description =
        video_description(settings, &title, &abstract_html, session_type, &date, &room);

    Some(ScheduleRow {
        video_title: video_title(&title, &speakers),
        speakers,
        title,
        start_time: clock_time(start),
        end_time: clock_time(end),
        date,
        video_description,
        abstract_html,
        room,
        session_type: session_type.to_string(),
        uid,
    })
}

fn talk_title(talk: &Talk) -> String {
    format_text(&talk.title, TextFormat::PLAIN)
}

fn speaker_listing<S: ConferenceSource + ?Sized>(source: &S, talk: &Talk) -> String {
    source
        .talk_speakers(talk)
        .iter()
        .map(|speaker| speaker.display_name())
        .collect::<Vec<_>>()
        .join(", ")
}

fn clock_time(time: NaiveDateTime) -> String {
    time.format("%H:%M").to_string()
}

pub fn video_title(title: &str, speakers: &str) -> String {
    format!("{speakers} - {title}")
}

/// Description block uploaded with each recording.
pub fn video_description(
    settings: &ExportSettings,
    title: &str,
    abstract_html: &str,
    session_type: &str,
    date: &str,
    room: &str,
) -> String {
    let session_type = session_type.strip_suffix('s').unwrap_or(session_type);
    format!(
        "{title}\n[{} - {session_type} - {date} - {room}]\n[{}]\n\n{abstract_html}\n",
        settings.event_name, settings.location
    )
}
