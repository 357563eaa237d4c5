use crate::error::{PunchError, Result};
use crate::model::{Day, Stamp};
use chrono::{DateTime, Datelike, FixedOffset, Timelike};
use tracing::debug;

/// Parses one RFC 2822 date such as `Wed, 21 Oct 2015 07:28:00 -0500`.
///
/// The leading day-of-week token is required and must agree with the date.
///
/// Without `timezone` the day and hour are read as written. With it, the
/// date is resolved to an instant through its own offset and re-expressed in
/// `timezone`, so the day rolls over when the shift crosses midnight.
///
/// The error's `line_no` is 0; [`parse_log`] fills in the real position.
pub fn parse_line(line: &str, timezone: Option<FixedOffset>) -> Result<Stamp> {
    let line = line.trim();
    let malformed = |reason: String| PunchError::MalformedLine {
        line_no: 0,
        line: line.to_string(),
        reason,
    };

    let (token, _) = line
        .split_once(',')
        .ok_or_else(|| malformed("missing day-of-week token".to_string()))?;
    let written_day: Day = token.trim().parse().map_err(malformed)?;

    let parsed = DateTime::parse_from_rfc2822(line).map_err(|e| malformed(e.to_string()))?;
    let (day, hour) = match timezone {
        Some(tz) => {
            let shifted = parsed.with_timezone(&tz);
            (shifted.weekday().into(), shifted.hour())
        }
        None => (written_day, parsed.hour()),
    };

    Stamp::new(day, hour as u8).ok_or_else(|| malformed(format!("hour {hour} out of range")))
}

/// Parses every non-blank line of `git log` output.
pub fn parse_log(text: &str, timezone: Option<FixedOffset>) -> Result<Vec<Stamp>> {
    let stamps = text
        .lines()
        .enumerate()
        .filter(|(_, line)| !line.trim().is_empty())
        .map(|(i, line)| {
            parse_line(line, timezone).map_err(|e| match e {
                PunchError::MalformedLine { line, reason, .. } => PunchError::MalformedLine {
                    line_no: i + 1,
                    line,
                    reason,
                },
                other => other,
            })
        })
        .collect::<Result<Vec<_>>>()?;

    debug!(commits = stamps.len(), shifted = timezone.is_some(), "parsed log");
    Ok(stamps)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn hours(h: i32) -> Option<FixedOffset> {
        FixedOffset::east_opt(h * 3600)
    }

    fn at(day: Day, hour: u8) -> Stamp {
        Stamp::new(day, hour).unwrap()
    }

    #[test]
    fn reads_day_and_hour_as_written() {
        let stamp = parse_line("Wed, 21 Oct 2015 07:28:00 -0500", None).unwrap();
        assert_eq!(stamp, at(Day::Wed, 7));

        let stamp = parse_line("Mon, 1 Jan 2024 14:00:00 +0000", None).unwrap();
        assert_eq!(stamp, at(Day::Mon, 14));
    }

    #[test]
    fn utc_override_moves_hour_back() {
        let stamp = parse_line("Wed, 15 Mar 2023 09:15:00 +0500", hours(0)).unwrap();
        assert_eq!(stamp, at(Day::Wed, 4));
    }

    #[test]
    fn override_rolls_over_to_previous_day() {
        let stamp = parse_line("Mon, 1 Jan 2024 02:30:00 +0500", hours(0)).unwrap();
        assert_eq!(stamp, at(Day::Sun, 21));
    }

    #[test]
    fn override_rolls_over_to_next_day() {
        let stamp = parse_line("Sat, 6 Jan 2024 22:00:00 -0300", hours(2)).unwrap();
        assert_eq!(stamp, at(Day::Sun, 3));
    }

    #[test]
    fn fractional_offset() {
        let tz = FixedOffset::east_opt(5 * 3600 + 1800);
        let stamp = parse_line("Tue, 2 Jan 2024 23:45:00 +0000", tz).unwrap();
        assert_eq!(stamp, at(Day::Wed, 5));
    }

    #[test]
    fn shift_and_shift_back_is_identity() {
        let lines = [
            "Wed, 21 Oct 2015 07:28:00 -0500",
            "Sun, 7 Jan 2024 23:59:59 +0100",
            "Sat, 6 Jan 2024 00:00:00 +0000",
            "Fri, 5 Jan 2024 12:00:00 -0800",
        ];
        for line in lines {
            let orig = DateTime::parse_from_rfc2822(line).unwrap();
            let there = orig.with_timezone(&hours(7).unwrap()).to_rfc2822();
            let back = *orig.offset();
            let round_trip = parse_line(&there, Some(back)).unwrap();
            assert_eq!(round_trip, parse_line(line, None).unwrap(), "{line}");
        }
    }

    #[test]
    fn rejects_malformed_lines() {
        for line in [
            "not a date",
            "Xyz, 21 Oct 2015 07:28:00 -0500",
            "Wed, 21 Oct 2015 25:28:00 -0500",
            "Thu, 21 Oct 2015 07:28:00 -0500",
            "21 Oct 2015 07:28:00 -0500",
            "wed, 21 Oct 2015 07:28:00 -0500",
            "Wednesday, 21 Oct 2015 07:28:00 -0500",
            "",
        ] {
            let err = parse_line(line, None).unwrap_err();
            assert!(matches!(err, PunchError::MalformedLine { .. }), "{line}");
        }
    }

    #[test]
    fn parse_log_skips_blank_lines() {
        let text = "Wed, 21 Oct 2015 07:28:00 -0500\n\n  \nMon, 1 Jan 2024 14:00:00 +0000\n";
        let stamps = parse_log(text, None).unwrap();
        assert_eq!(stamps.len(), 2);
    }

    #[test]
    fn parse_log_reports_line_number() {
        let text = "Wed, 21 Oct 2015 07:28:00 -0500\ngarbage\n";
        match parse_log(text, None).unwrap_err() {
            PunchError::MalformedLine { line_no, line, .. } => {
                assert_eq!(line_no, 2);
                assert_eq!(line, "garbage");
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn empty_text_parses_to_nothing() {
        assert!(parse_log("", None).unwrap().is_empty());
    }
}
