//! Puzzle URL validation
//!
//! Puzzles unlock at midnight UTC-5 on each day of December, one per day up
//! to day 25. A URL is only accepted when it names a puzzle that has already
//! been released relative to the supplied "now".

use crate::error::ValidationError;
use chrono::{DateTime, Datelike, FixedOffset, Utc};
use reqwest::Url;

/// Host every puzzle URL must point at
pub const AOC_HOST: &str = "adventofcode.com";

/// Year of the first event
pub const FIRST_YEAR: i32 = 2015;

/// Last puzzle day of an event
pub const LAST_DAY: u8 = 25;

const DECEMBER: u32 = 12;

/// Puzzles are released at midnight in this offset (EST, no DST in December)
const RELEASE_OFFSET_WEST_SECS: i32 = 5 * 3600;

/// Current time in the zone puzzles are released in
pub fn release_now() -> DateTime<FixedOffset> {
    let offset =
        FixedOffset::west_opt(RELEASE_OFFSET_WEST_SECS).expect("UTC-5 is always a valid offset");
    Utc::now().with_timezone(&offset)
}

/// A URL that names a released puzzle: `https://adventofcode.com/{year}/day/{day}`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PuzzleUrl {
    url: Url,
    year: u16,
    day: u8,
}

impl PuzzleUrl {
    /// Parse and validate a puzzle URL against `now`
    ///
    /// Checks run in order and the first failure is returned:
    /// parseable, host, path length, year, `day` token, day range, release.
    ///
    /// # Example
    ///
    /// ```
    /// use aoc_fetcher::PuzzleUrl;
    /// use chrono::NaiveDate;
    ///
    /// let now = NaiveDate::from_ymd_opt(2022, 12, 1).unwrap();
    /// let url = PuzzleUrl::parse("https://adventofcode.com/2022/day/1", &now).unwrap();
    /// assert_eq!((url.year(), url.day()), (2022, 1));
    /// ```
    pub fn parse<D: Datelike>(input: &str, now: &D) -> Result<Self, ValidationError> {
        let url = Url::parse(input).map_err(|e| ValidationError::MalformedUrl {
            url: input.to_string(),
            reason: e.to_string(),
        })?;

        if url.host_str() != Some(AOC_HOST) {
            return Err(ValidationError::WrongHost(input.to_string()));
        }

        // Leading slash yields an empty segment 0
        let segments: Vec<&str> = url.path().split('/').collect();
        if segments.len() < 4 {
            return Err(ValidationError::MissingDay);
        }

        let year = validate_year(segments[1], now)?;

        if segments[2] != "day" {
            return Err(ValidationError::MissingDayToken);
        }

        let day = validate_day(segments[3], year, now)?;

        Ok(Self { url, year, day })
    }

    /// Event year
    pub fn year(&self) -> u16 {
        self.year
    }

    /// Puzzle day (1-25)
    pub fn day(&self) -> u8 {
        self.day
    }

    /// The URL as given by the caller
    pub fn as_url(&self) -> &Url {
        &self.url
    }

    /// Path segments of the input endpoint for this puzzle
    pub fn input_path_segments(&self) -> [String; 4] {
        [
            self.year.to_string(),
            "day".to_string(),
            self.day.to_string(),
            "input".to_string(),
        ]
    }
}

/// Validate a puzzle URL without keeping the parsed result
pub fn validate_url<D: Datelike>(input: &str, now: &D) -> Result<(), ValidationError> {
    PuzzleUrl::parse(input, now).map(|_| ())
}

fn validate_year<D: Datelike>(segment: &str, now: &D) -> Result<u16, ValidationError> {
    let invalid = |reason| ValidationError::InvalidYear {
        year: segment.to_string(),
        reason,
    };

    let year: i32 = segment.parse().map_err(|_| invalid("not a number"))?;
    if year < FIRST_YEAR {
        return Err(invalid("the first event was in 2015"));
    }
    if year > now.year() {
        return Err(invalid("the event has not happened yet"));
    }
    if year == now.year() && now.month() != DECEMBER {
        return Err(invalid("it is not December yet"));
    }

    u16::try_from(year).map_err(|_| invalid("out of range"))
}

fn validate_day<D: Datelike>(segment: &str, year: u16, now: &D) -> Result<u8, ValidationError> {
    let day = segment
        .parse::<u8>()
        .ok()
        .filter(|day| (1..=LAST_DAY).contains(day))
        .ok_or_else(|| ValidationError::InvalidDay(segment.to_string()))?;

    // Past events are fully open; only the running event is gated by date
    if i32::from(year) == now.year() && u32::from(day) > now.day() {
        return Err(ValidationError::DayNotYetOpen(day));
    }

    Ok(day)
}
