//! Slot model.
//!
//! A slot is one cell of the abstract weekly grid: a day pattern
//! (e.g. Monday/Wednesday/Friday lectures) combined with a start time.
//! Slots carry a hard maximum and a soft minimum occupancy.
//!
//! # Time Model
//! Start times are half-hour ticks since midnight (`0..=47`), so
//! `SlotTime::hm(18, 0)` is tick 36. Durations depend only on the
//! day pattern.
//!
//! # Identity
//! Two slots with the same [`SlotKey`] are the same slot, regardless
//! of their capacities. Maps throughout the crate are keyed by `SlotKey`.

use serde::{Deserialize, Serialize};
use std::fmt;

const MON: u8 = 1 << 0;
const TUE: u8 = 1 << 1;
const WED: u8 = 1 << 2;
const THU: u8 = 1 << 3;
const FRI: u8 = 1 << 4;

/// Abstract day pattern of a slot.
///
/// Variant order is the canonical enumeration order of the timetable.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum SlotKind {
    /// Monday/Wednesday/Friday lecture, 1h.
    MwfLecture,
    /// Tuesday/Thursday lecture, 1h.
    TtLecture,
    /// Monday/Wednesday lab, 1.5h.
    MwLab,
    /// Tuesday/Thursday lab, 1.5h.
    TtLab,
    /// Friday lab, 2h.
    FriLab,
}

impl SlotKind {
    /// All kinds in canonical order.
    pub const ALL: [SlotKind; 5] = [
        SlotKind::MwfLecture,
        SlotKind::TtLecture,
        SlotKind::MwLab,
        SlotKind::TtLab,
        SlotKind::FriLab,
    ];

    /// Whether lectures (rather than labs) are placed in this kind of slot.
    #[inline]
    pub fn is_lecture(self) -> bool {
        matches!(self, SlotKind::MwfLecture | SlotKind::TtLecture)
    }

    /// Whether labs are placed in this kind of slot.
    #[inline]
    pub fn is_lab(self) -> bool {
        !self.is_lecture()
    }

    /// Duration in half-hour ticks.
    #[inline]
    pub fn duration_ticks(self) -> u8 {
        match self {
            SlotKind::MwfLecture | SlotKind::TtLecture => 2,
            SlotKind::MwLab | SlotKind::TtLab => 3,
            SlotKind::FriLab => 4,
        }
    }

    fn days(self) -> u8 {
        match self {
            SlotKind::MwfLecture => MON | WED | FRI,
            SlotKind::TtLecture | SlotKind::TtLab => TUE | THU,
            SlotKind::MwLab => MON | WED,
            SlotKind::FriLab => FRI,
        }
    }

    /// Whether two patterns meet on at least one common weekday.
    #[inline]
    pub fn shares_day(self, other: SlotKind) -> bool {
        self.days() & other.days() != 0
    }

    /// Whether this pattern meets on Tuesday.
    #[inline]
    pub fn meets_tuesday(self) -> bool {
        self.days() & TUE != 0
    }

    /// Maps an input day code (`MO`, `TU`, `FR`) to a pattern.
    ///
    /// Returns `None` for unknown codes and for Friday lectures, which
    /// the grid does not have.
    pub fn from_day_code(day: &str, is_lab: bool) -> Option<Self> {
        match (day.trim().to_ascii_uppercase().as_str(), is_lab) {
            ("MO", false) => Some(SlotKind::MwfLecture),
            ("TU", false) => Some(SlotKind::TtLecture),
            ("MO", true) => Some(SlotKind::MwLab),
            ("TU", true) => Some(SlotKind::TtLab),
            ("FR", true) => Some(SlotKind::FriLab),
            _ => None,
        }
    }

    /// Short human-readable label.
    pub fn label(self) -> &'static str {
        match self {
            SlotKind::MwfLecture => "MWF Lec",
            SlotKind::TtLecture => "TuTh Lec",
            SlotKind::MwLab => "MW Lab",
            SlotKind::TtLab => "TuTh Lab",
            SlotKind::FriLab => "Fri Lab",
        }
    }
}

/// Slot start time, in half-hour ticks since midnight.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct SlotTime(u8);

impl SlotTime {
    /// Number of half-hour ticks in a day.
    pub const TICKS_PER_DAY: u8 = 48;

    /// 18:00, the start of the evening.
    pub const EVENING: SlotTime = SlotTime(36);

    /// Creates a time from raw ticks. Out-of-range values map to 0:00.
    pub fn from_ticks(ticks: u8) -> Self {
        if ticks >= Self::TICKS_PER_DAY {
            Self(0)
        } else {
            Self(ticks)
        }
    }

    /// Creates a time from hours and minutes.
    ///
    /// Minutes round to the nearest half hour; anything past 23:30
    /// after rounding maps to 0:00.
    pub fn hm(hour: u8, minute: u8) -> Self {
        let minutes = u32::from(hour) * 60 + u32::from(minute);
        let ticks = (minutes + 15) / 30;
        match u8::try_from(ticks) {
            Ok(t) => Self::from_ticks(t),
            Err(_) => Self(0),
        }
    }

    /// Parses `H:MM` or `HH:MM`.
    pub fn parse(s: &str) -> Option<Self> {
        let (h, m) = s.trim().split_once(':')?;
        let hour: u8 = h.trim().parse().ok()?;
        let minute: u8 = m.trim().parse().ok()?;
        if minute >= 60 {
            return None;
        }
        Some(Self::hm(hour, minute))
    }

    /// Raw tick value.
    #[inline]
    pub fn ticks(self) -> u8 {
        self.0
    }

    /// Hour component (0-23).
    #[inline]
    pub fn hour(self) -> u8 {
        self.0 / 2
    }

    /// Minute component (0 or 30).
    #[inline]
    pub fn minute(self) -> u8 {
        (self.0 % 2) * 30
    }
}

impl fmt::Display for SlotTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{:02}", self.hour(), self.minute())
    }
}

/// Identity of a slot: day pattern plus start time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct SlotKey {
    /// Day pattern.
    pub kind: SlotKind,
    /// Start time.
    pub time: SlotTime,
}

impl SlotKey {
    /// Creates a new slot key.
    pub fn new(kind: SlotKind, time: SlotTime) -> Self {
        Self { kind, time }
    }

    /// Shorthand for `SlotKey::new(kind, SlotTime::hm(hour, minute))`.
    pub fn at(kind: SlotKind, hour: u8, minute: u8) -> Self {
        Self::new(kind, SlotTime::hm(hour, minute))
    }

    /// End of the slot in ticks (exclusive). May exceed one day for late labs.
    #[inline]
    pub fn end_ticks(&self) -> u8 {
        self.time.ticks() + self.kind.duration_ticks()
    }

    /// Whether this slot starts at or after 18:00.
    #[inline]
    pub fn is_evening(&self) -> bool {
        self.time >= SlotTime::EVENING
    }

    /// Whether two slots meet at the same time on some weekday.
    ///
    /// True iff the patterns share a day and the half-open intervals
    /// `[start, start + duration)` intersect.
    pub fn overlaps(&self, other: &SlotKey) -> bool {
        self.kind.shares_day(other.kind)
            && self.time.ticks() < other.end_ticks()
            && other.time.ticks() < self.end_ticks()
    }
}

impl fmt::Display for SlotKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.kind.label(), self.time)
    }
}

/// A schedulable slot with occupancy bounds.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Slot {
    /// Slot identity.
    pub key: SlotKey,
    /// Maximum number of items (hard). Zero means the slot cannot be used.
    pub max: u32,
    /// Desired minimum number of items (soft).
    pub min: u32,
}

impl Slot {
    /// Creates a slot with zero capacity.
    pub fn new(kind: SlotKind, time: SlotTime) -> Self {
        Self {
            key: SlotKey::new(kind, time),
            max: 0,
            min: 0,
        }
    }

    /// Sets the maximum occupancy.
    pub fn with_max(mut self, max: u32) -> Self {
        self.max = max;
        self
    }

    /// Sets the minimum occupancy.
    pub fn with_min(mut self, min: u32) -> Self {
        self.min = min;
        self
    }

    /// Day pattern of this slot.
    #[inline]
    pub fn kind(&self) -> SlotKind {
        self.key.kind
    }

    /// Start time of this slot.
    #[inline]
    pub fn time(&self) -> SlotTime {
        self.key.time
    }
}

impl fmt::Display for Slot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:>15} | Max = {} ; Min = {}", self.key.to_string(), self.max, self.min)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_time_rounding_and_range() {
        assert_eq!(SlotTime::hm(8, 0).ticks(), 16);
        assert_eq!(SlotTime::hm(8, 20).ticks(), 17);
        assert_eq!(SlotTime::hm(8, 10).ticks(), 16);
        assert_eq!(SlotTime::hm(23, 30).ticks(), 47);
        assert_eq!(SlotTime::hm(23, 50).ticks(), 0);
        assert_eq!(SlotTime::hm(30, 0).ticks(), 0);
        assert_eq!(SlotTime::from_ticks(99).ticks(), 0);
    }

    #[test]
    fn test_time_parse_and_display() {
        assert_eq!(SlotTime::parse("8:00"), Some(SlotTime::hm(8, 0)));
        assert_eq!(SlotTime::parse(" 18:30 "), Some(SlotTime::hm(18, 30)));
        assert_eq!(SlotTime::parse("8"), None);
        assert_eq!(SlotTime::parse("8:75"), None);
        assert_eq!(SlotTime::hm(9, 30).to_string(), "9:30");
        assert_eq!(SlotTime::hm(18, 0).to_string(), "18:00");
    }

    #[test]
    fn test_day_codes() {
        assert_eq!(SlotKind::from_day_code("MO", false), Some(SlotKind::MwfLecture));
        assert_eq!(SlotKind::from_day_code("tu", false), Some(SlotKind::TtLecture));
        assert_eq!(SlotKind::from_day_code("MO", true), Some(SlotKind::MwLab));
        assert_eq!(SlotKind::from_day_code("TU", true), Some(SlotKind::TtLab));
        assert_eq!(SlotKind::from_day_code("FR", true), Some(SlotKind::FriLab));
        assert_eq!(SlotKind::from_day_code("FR", false), None);
        assert_eq!(SlotKind::from_day_code("WE", true), None);
    }

    #[test]
    fn test_shared_days() {
        use SlotKind::*;
        assert!(MwfLecture.shares_day(MwLab));
        assert!(MwfLecture.shares_day(FriLab));
        assert!(!MwfLecture.shares_day(TtLecture));
        assert!(!MwLab.shares_day(FriLab));
        assert!(TtLecture.shares_day(TtLab));
        assert!(!TtLab.shares_day(MwLab));
        assert!(TtLecture.meets_tuesday() && TtLab.meets_tuesday());
        assert!(!MwfLecture.meets_tuesday() && !MwLab.meets_tuesday() && !FriLab.meets_tuesday());
    }

    #[test]
    fn test_overlap_by_interval() {
        let lec8 = SlotKey::at(SlotKind::MwfLecture, 8, 0);
        // 8:00-9:00 vs 8:30-10:00
        assert!(lec8.overlaps(&SlotKey::at(SlotKind::MwLab, 8, 30)));
        // 8:00-9:00 vs 9:00-11:00 (touching is not overlapping)
        assert!(!lec8.overlaps(&SlotKey::at(SlotKind::FriLab, 9, 0)));
        // 7:00-9:00 Friday lab covers the lecture
        assert!(lec8.overlaps(&SlotKey::at(SlotKind::FriLab, 7, 0)));
        // Different days
        assert!(!lec8.overlaps(&SlotKey::at(SlotKind::TtLecture, 8, 0)));
        // Self-overlap
        assert!(lec8.overlaps(&lec8));

        // TuTh 9:30-10:30 vs TuTh lab 10:00-11:30
        let tt = SlotKey::at(SlotKind::TtLecture, 9, 30);
        assert!(tt.overlaps(&SlotKey::at(SlotKind::TtLab, 10, 0)));
        assert!(!tt.overlaps(&SlotKey::at(SlotKind::TtLab, 10, 30)));
    }

    #[test]
    fn test_slot_display_and_evening() {
        let slot = Slot::new(SlotKind::TtLab, SlotTime::hm(18, 0))
            .with_max(3)
            .with_min(1);
        assert!(slot.key.is_evening());
        assert_eq!(slot.key.to_string(), "TuTh Lab 18:00");
        assert!(slot.to_string().contains("Max = 3 ; Min = 1"));
        assert!(!SlotKey::at(SlotKind::MwLab, 17, 30).is_evening());
    }

    #[test]
    fn test_key_ordering_follows_kind_then_time() {
        let a = SlotKey::at(SlotKind::MwfLecture, 20, 0);
        let b = SlotKey::at(SlotKind::TtLecture, 8, 0);
        let c = SlotKey::at(SlotKind::TtLecture, 9, 30);
        assert!(a < b);
        assert!(b < c);
    }
}
