//! Collectors turning conference records into export rows.

pub mod schedule;
pub mod speakers;

pub use schedule::{SCHEDULE_COLUMNS, ScheduleRow, collect_schedule};
pub use speakers::{SPEAKER_COLUMNS, SpeakerRow, collect_speakers};
