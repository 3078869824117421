//! Calendar projection of schedule details.
//!
//! [`to_events`] turns details into renderable events. Two inverse lookups
//! exist: [`resolve_event`] by the record id each event carries, and
//! [`resolve`] by re-parsing the shift name out of an event title.

use chrono::NaiveDate;
use serde::Serialize;

use crate::i18n::{status_label, Locale};
use crate::models::{ScheduleDetail, ScheduleStatus, Shift, ShiftCatalog};

/// Background/text color pair of an event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ColorPair {
    pub background: &'static str,
    pub text: &'static str,
}

/// Colors keyed by shift display name.
const SHIFT_COLORS: [(&str, ColorPair); 4] = [
    (
        "Ca sáng",
        ColorPair {
            background: "#FFF9DB",
            text: "#E67700",
        },
    ),
    (
        "Ca chiều",
        ColorPair {
            background: "#E7F5FF",
            text: "#1971C2",
        },
    ),
    (
        "Ca tối",
        ColorPair {
            background: "#F3F0FF",
            text: "#6741D9",
        },
    ),
    (
        "Cả ngày",
        ColorPair {
            background: "#EBFBEE",
            text: "#2F9E44",
        },
    ),
];

/// Amber pair for shift names missing from the table.
pub const DEFAULT_COLORS: ColorPair = ColorPair {
    background: "#FFF4E6",
    text: "#D9480F",
};

pub fn colors_for(shift_name: &str) -> ColorPair {
    SHIFT_COLORS
        .iter()
        .find(|(name, _)| *name == shift_name)
        .map(|(_, colors)| *colors)
        .unwrap_or(DEFAULT_COLORS)
}

/// One renderable calendar entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CalendarEvent {
    /// `<shiftDate>-<index>`; only stable while the source list keeps its order.
    pub id: String,
    pub title: String,
    pub start: NaiveDate,
    pub background_color: &'static str,
    pub text_color: &'static str,
    /// Id of the backing schedule detail.
    pub detail_id: String,
    pub status: ScheduleStatus,
}

impl CalendarEvent {
    /// Localized attendance label, for tooltips.
    pub fn status_label(&self, locale: Locale) -> &'static str {
        status_label(locale, self.status)
    }
}

/// `"<Name> (<HH:MM> - <HH:MM>)"`
pub fn format_title(shift: &Shift) -> String {
    format!(
        "{} ({} - {})",
        shift.name,
        shift.start_time.format("%H:%M"),
        shift.end_time.format("%H:%M")
    )
}

/// Shift name out of a title produced by [`format_title`].
pub fn parse_title(title: &str) -> Option<&str> {
    let inner = title.strip_suffix(')')?;
    let (name, range) = inner.rsplit_once(" (")?;
    let (start, end) = range.split_once(" - ")?;
    if !is_clock(start) || !is_clock(end) || name.is_empty() {
        return None;
    }
    Some(name)
}

fn is_clock(s: &str) -> bool {
    chrono::NaiveTime::parse_from_str(s, "%H:%M").is_ok()
}

/// Project details onto calendar events.
///
/// Details whose shift cannot be resolved are skipped. Output order follows
/// input order.
pub fn to_events(details: &[ScheduleDetail], catalog: &ShiftCatalog) -> Vec<CalendarEvent> {
    details
        .iter()
        .enumerate()
        .filter_map(|(index, detail)| {
            let shift = catalog.resolve(&detail.shift)?;
            let colors = colors_for(&shift.name);
            Some(CalendarEvent {
                id: format!("{}-{}", detail.shift_date, index),
                title: format_title(shift),
                start: detail.shift_date,
                background_color: colors.background,
                text_color: colors.text,
                detail_id: detail.id.clone(),
                status: detail.status,
            })
        })
        .collect()
}

/// Detail behind a clicked event, by the id it carries.
pub fn resolve_event<'a>(
    event: &CalendarEvent,
    details: &'a [ScheduleDetail],
) -> Option<&'a ScheduleDetail> {
    details.iter().find(|d| d.id == event.detail_id)
}

/// Detail behind a clicked event, from its title and date alone.
///
/// Returns the first detail on `clicked_date` whose shift resolves to the
/// name in the title. Ambiguous when two details share a date and shift name.
pub fn resolve<'a>(
    clicked_title: &str,
    clicked_date: NaiveDate,
    details: &'a [ScheduleDetail],
    catalog: &ShiftCatalog,
) -> Option<&'a ScheduleDetail> {
    let name = parse_title(clicked_title)?;
    details.iter().find(|d| {
        d.shift_date == clicked_date && catalog.name_of(&d.shift) == Some(name)
    })
}
