//! Shift reference data.

use chrono::NaiveTime;
use serde::{Deserialize, Serialize};

/// Time-of-day work period.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ShiftKind {
    Morning,
    Afternoon,
    Night,
    FullDay,
}

impl ShiftKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ShiftKind::Morning => "MORNING",
            ShiftKind::Afternoon => "AFTERNOON",
            ShiftKind::Night => "NIGHT",
            ShiftKind::FullDay => "FULL_DAY",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "MORNING" => Some(ShiftKind::Morning),
            "AFTERNOON" => Some(ShiftKind::Afternoon),
            "NIGHT" => Some(ShiftKind::Night),
            "FULL_DAY" => Some(ShiftKind::FullDay),
            _ => None,
        }
    }
}

/// A named shift with fixed start and end times.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Shift {
    pub id: String,
    pub name: String,
    pub kind: ShiftKind,
    pub start_time: NaiveTime,
    pub end_time: NaiveTime,
}

/// Shifts loaded once per session.
///
/// Schedule details reference their shift either by shift id or by kind
/// value depending on which view wrote them; [`ShiftCatalog::resolve`]
/// accepts both, preferring an id match.
#[derive(Debug, Clone, Default)]
pub struct ShiftCatalog {
    shifts: Vec<Shift>,
}

impl ShiftCatalog {
    pub fn new(shifts: Vec<Shift>) -> Self {
        Self { shifts }
    }

    pub fn resolve(&self, reference: &str) -> Option<&Shift> {
        self.shifts
            .iter()
            .find(|s| s.id == reference)
            .or_else(|| {
                let kind = ShiftKind::parse(reference)?;
                self.shifts.iter().find(|s| s.kind == kind)
            })
    }

    /// Display name for a shift reference.
    pub fn name_of(&self, reference: &str) -> Option<&str> {
        self.resolve(reference).map(|s| s.name.as_str())
    }

    pub fn shifts(&self) -> &[Shift] {
        &self.shifts
    }

    pub fn is_empty(&self) -> bool {
        self.shifts.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn shift(id: &str, kind: ShiftKind, name: &str) -> Shift {
        Shift {
            id: id.to_string(),
            name: name.to_string(),
            kind,
            start_time: NaiveTime::from_hms_opt(7, 0, 0).unwrap(),
            end_time: NaiveTime::from_hms_opt(11, 0, 0).unwrap(),
        }
    }

    #[test]
    fn test_resolve_by_id_or_kind() {
        let catalog = ShiftCatalog::new(vec![
            shift("a1", ShiftKind::Morning, "Ca sáng"),
            shift("b2", ShiftKind::Night, "Ca tối"),
        ]);

        assert_eq!(catalog.name_of("a1"), Some("Ca sáng"));
        assert_eq!(catalog.name_of("NIGHT"), Some("Ca tối"));
        assert_eq!(catalog.name_of("AFTERNOON"), None);
        assert_eq!(catalog.name_of("zzz"), None);
    }

    #[test]
    fn test_id_match_wins_over_kind() {
        let catalog = ShiftCatalog::new(vec![
            shift("x", ShiftKind::Morning, "Ca sáng"),
            shift("MORNING", ShiftKind::FullDay, "Cả ngày"),
        ]);
        assert_eq!(catalog.name_of("MORNING"), Some("Cả ngày"));
    }

    #[test]
    fn test_kind_wire_format() {
        let json = serde_json::to_string(&ShiftKind::FullDay).unwrap();
        assert_eq!(json, "\"FULL_DAY\"");
        assert_eq!(ShiftKind::parse("FULL_DAY"), Some(ShiftKind::FullDay));
        assert_eq!(ShiftKind::Afternoon.as_str(), "AFTERNOON");
    }
}
