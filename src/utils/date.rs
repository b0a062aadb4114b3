//! Strict calendar-date and clock-time parsing.
//!
//! Talk dates must be exactly `YYYY-MM-DD`; anything else is rejected rather
//! than guessed. Times describe the start of a window such as `14:00–15:00`.

use anyhow::{Result, bail};

/// En dash used in authored time windows (`12:00–13:00`).
pub const WINDOW_SEPARATOR: char = '–';

/// Calendar date without timezone
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CalendarDate {
    pub year: u16,
    pub month: u8,
    pub day: u8,
}

impl CalendarDate {
    pub const fn new(year: u16, month: u8, day: u8) -> Self {
        Self { year, month, day }
    }

    /// Parse from exactly "YYYY-MM-DD"
    pub fn parse(s: &str) -> Option<Self> {
        let bytes = s.as_bytes();
        if bytes.len() != 10 || bytes[4] != b'-' || bytes[7] != b'-' {
            return None;
        }

        let date = Self::new(
            parse_u16(&bytes[0..4])?,
            parse_u8(&bytes[5..7])?,
            parse_u8(&bytes[8..10])?,
        );
        date.validate().ok()?;
        Some(date)
    }

    pub fn validate(&self) -> Result<()> {
        let Self { year, month, day } = *self;

        if !(1..=12).contains(&month) {
            bail!("month is invalid: {month}");
        }

        let max_days = Self::days_in_month(year, month);
        if day == 0 || day > max_days {
            bail!("day is invalid: {day}");
        }

        Ok(())
    }

    #[inline]
    fn is_leap_year(year: u16) -> bool {
        year.is_multiple_of(4) && (!year.is_multiple_of(100) || year.is_multiple_of(400))
    }

    #[inline]
    fn days_in_month(year: u16, month: u8) -> u8 {
        match month {
            1 | 3 | 5 | 7 | 8 | 10 | 12 => 31,
            4 | 6 | 9 | 11 => 30,
            2 if Self::is_leap_year(year) => 29,
            2 => 28,
            _ => 0,
        }
    }
}

/// Wall-clock start of a session
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ClockTime {
    pub hour: u8,
    pub minute: u8,
}

impl ClockTime {
    /// Parse the start of a time window.
    ///
    /// `"14:00–15:00"`, `"14:00-15:00"`, `"14:00"` and `"14"` all start at
    /// 14:00. Anything after a second `:` (seconds) is ignored.
    pub fn parse_start(s: &str) -> Option<Self> {
        let s = s.trim();
        let start = if s.contains(WINDOW_SEPARATOR) {
            s.split(WINDOW_SEPARATOR).next()?
        } else if s.contains('-') {
            s.split('-').next()?
        } else {
            s
        };

        let mut parts = start.trim().split(':');
        let hour: u8 = parts.next()?.trim().parse().ok()?;
        let minute: u8 = match parts.next() {
            Some(minute) => minute.trim().parse().ok()?,
            None => 0,
        };

        if hour > 23 || minute > 59 {
            return None;
        }
        Some(Self { hour, minute })
    }
}

/// Parse 2-digit ASCII number
#[inline]
fn parse_u8(bytes: &[u8]) -> Option<u8> {
    if bytes.len() != 2 {
        return None;
    }
    let d1 = bytes[0].wrapping_sub(b'0');
    let d2 = bytes[1].wrapping_sub(b'0');
    if d1 > 9 || d2 > 9 {
        return None;
    }
    Some(d1 * 10 + d2)
}

/// Parse 4-digit ASCII number
#[inline]
fn parse_u16(bytes: &[u8]) -> Option<u16> {
    if bytes.len() != 4 {
        return None;
    }
    let mut result = 0u16;
    for &b in bytes {
        let d = b.wrapping_sub(b'0');
        if d > 9 {
            return None;
        }
        result = result * 10 + d as u16;
    }
    Some(result)
}
