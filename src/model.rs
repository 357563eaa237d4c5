use chrono::{DateTime, FixedOffset, Utc, Weekday};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

pub const SCHEMA_VERSION: u32 = 1;

pub const DAYS_PER_WEEK: usize = 7;
pub const HOURS_PER_DAY: usize = 24;

/// Row order of the punch card, top to bottom.
pub const DAY_ORDER: [Day; DAYS_PER_WEEK] = [
    Day::Sat,
    Day::Fri,
    Day::Thu,
    Day::Wed,
    Day::Tue,
    Day::Mon,
    Day::Sun,
];

pub const HOUR_LABELS: [&str; HOURS_PER_DAY] = [
    "12am", "1", "2", "3", "4", "5", "6", "7", "8", "9", "10", "11", "12pm", "1", "2", "3", "4",
    "5", "6", "7", "8", "9", "10", "11",
];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Day {
    Sat,
    Fri,
    Thu,
    Wed,
    Tue,
    Mon,
    Sun,
}

impl Day {
    /// Position of the day in [`DAY_ORDER`].
    pub fn index(self) -> usize {
        match self {
            Day::Sat => 0,
            Day::Fri => 1,
            Day::Thu => 2,
            Day::Wed => 3,
            Day::Tue => 4,
            Day::Mon => 5,
            Day::Sun => 6,
        }
    }

    pub fn abbrev(self) -> &'static str {
        match self {
            Day::Sat => "Sat",
            Day::Fri => "Fri",
            Day::Thu => "Thu",
            Day::Wed => "Wed",
            Day::Tue => "Tue",
            Day::Mon => "Mon",
            Day::Sun => "Sun",
        }
    }
}

impl From<Weekday> for Day {
    fn from(weekday: Weekday) -> Self {
        match weekday {
            Weekday::Mon => Day::Mon,
            Weekday::Tue => Day::Tue,
            Weekday::Wed => Day::Wed,
            Weekday::Thu => Day::Thu,
            Weekday::Fri => Day::Fri,
            Weekday::Sat => Day::Sat,
            Weekday::Sun => Day::Sun,
        }
    }
}

impl FromStr for Day {
    type Err = String;

    /// Accepts the three-letter abbreviation, case-sensitive as git writes it.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        DAY_ORDER
            .iter()
            .copied()
            .find(|day| day.abbrev() == s)
            .ok_or_else(|| format!("unknown day-of-week '{s}'"))
    }
}

impl fmt::Display for Day {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.abbrev())
    }
}

/// Day and hour of a single commit, after any timezone shift.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Stamp {
    day: Day,
    hour: u8,
}

impl Stamp {
    /// `None` unless `hour` is 0-23.
    pub fn new(day: Day, hour: u8) -> Option<Self> {
        if (hour as usize) < HOURS_PER_DAY {
            Some(Self { day, hour })
        } else {
            None
        }
    }

    pub fn day(&self) -> Day {
        self.day
    }

    pub fn hour(&self) -> u8 {
        self.hour
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct HistogramEntry {
    pub weight: f64,
    /// Hour of day, 0-23.
    pub x: u8,
    /// Row index in [`DAY_ORDER`].
    pub y: u8,
    pub count: u32,
}

impl HistogramEntry {
    pub fn day(&self) -> Day {
        DAY_ORDER[self.y as usize]
    }
}

/// Normalized punch card handed to renderers.
#[derive(Debug, Clone)]
pub struct Punchcard {
    pub entries: Vec<HistogramEntry>,
    pub total_commits: u64,
    pub max_count: u32,
    /// Offset the hours were converted to; `None` keeps each commit's own.
    pub timezone: Option<FixedOffset>,
}

impl Punchcard {
    pub fn entry(&self, day: Day, hour: u8) -> Option<&HistogramEntry> {
        let y = day.index() as u8;
        self.entries.iter().find(|e| e.y == y && e.x == hour)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PunchcardOutput {
    pub version: u32,
    pub generated_at: DateTime<Utc>,
    /// Offset such as `+05:30`, or null when hours are as written.
    pub timezone: Option<String>,
    pub day_order: Vec<Day>,
    pub total_commits: u64,
    pub max_count: u32,
    pub entries: Vec<HistogramEntry>,
}

impl PunchcardOutput {
    pub fn new(card: &Punchcard) -> Self {
        Self {
            version: SCHEMA_VERSION,
            generated_at: Utc::now(),
            timezone: card.timezone.map(|tz| tz.to_string()),
            day_order: DAY_ORDER.to_vec(),
            total_commits: card.total_commits,
            max_count: card.max_count,
            entries: card.entries.clone(),
        }
    }
}
