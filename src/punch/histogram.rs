use crate::error::{PunchError, Result};
use crate::model::{Day, HistogramEntry, Punchcard, Stamp, DAYS_PER_WEEK, DAY_ORDER, HOURS_PER_DAY};

/// Commit counts per (day, hour). All 168 cells always exist.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Histogram {
    counts: [[u32; HOURS_PER_DAY]; DAYS_PER_WEEK],
}

impl Histogram {
    pub fn new() -> Self {
        Self {
            counts: [[0; HOURS_PER_DAY]; DAYS_PER_WEEK],
        }
    }

    pub fn from_stamps<I>(stamps: I) -> Self
    where
        I: IntoIterator<Item = Stamp>,
    {
        let mut histogram = Self::new();
        for stamp in stamps {
            histogram.add(stamp);
        }
        histogram
    }

    pub fn add(&mut self, stamp: Stamp) {
        self.counts[stamp.day().index()][stamp.hour() as usize] += 1;
    }

    /// Zero for hours outside 0-23.
    pub fn count(&self, day: Day, hour: u8) -> u32 {
        self.counts[day.index()]
            .get(hour as usize)
            .copied()
            .unwrap_or(0)
    }

    pub fn total(&self) -> u64 {
        self.counts.iter().flatten().map(|&c| c as u64).sum()
    }

    pub fn max(&self) -> u32 {
        self.counts.iter().flatten().copied().max().unwrap_or(0)
    }

    /// Divides every cell by the busiest one.
    ///
    /// Returns [`PunchError::NoCommits`] for an empty grid instead of
    /// producing NaN weights.
    pub fn normalize(&self) -> Result<Punchcard> {
        let max_count = self.max();
        if max_count == 0 {
            return Err(PunchError::NoCommits);
        }

        let mut entries = Vec::with_capacity(DAYS_PER_WEEK * HOURS_PER_DAY);
        for day in DAY_ORDER {
            for hour in 0..HOURS_PER_DAY as u8 {
                let count = self.count(day, hour);
                entries.push(HistogramEntry {
                    weight: count as f64 / max_count as f64,
                    x: hour,
                    y: day.index() as u8,
                    count,
                });
            }
        }

        Ok(Punchcard {
            entries,
            total_commits: self.total(),
            max_count,
            timezone: None,
        })
    }
}

impl Default for Histogram {
    fn default() -> Self {
        Self::new()
    }
}
