//! Derived fields: start instant and display strings.
//!
//! Parsing never fails the build. Each input resolves to a [`Resolution`]
//! that says whether the value was parsed or defaulted, and an unusable date
//! or time simply leaves the talk without a start instant.

use crate::{
    debug,
    talk::{TBA, Talk},
    utils::date::{CalendarDate, ClockTime},
};
use chrono::{DateTime, NaiveDate, NaiveDateTime, NaiveTime, TimeDelta, TimeZone};
use chrono_tz::Tz;

/// Longest DST gap we step over when a local time does not exist.
const MAX_GAP_MINUTES: i64 = 180;

/// Outcome of resolving an optional authored value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Resolution<T> {
    /// Authored and understood.
    Parsed(T),
    /// Absent or unusable; a fallback was substituted.
    Defaulted(T),
}

impl<T> Resolution<T> {
    pub fn value(self) -> T {
        match self {
            Self::Parsed(value) | Self::Defaulted(value) => value,
        }
    }

    pub const fn is_defaulted(&self) -> bool {
        matches!(self, Self::Defaulted(_))
    }
}

/// Strict `YYYY-MM-DD`; any other shape yields `None`.
pub fn resolve_date(date: Option<&str>) -> Option<NaiveDate> {
    let date = CalendarDate::parse(date?.trim())?;
    NaiveDate::from_ymd_opt(
        i32::from(date.year),
        u32::from(date.month),
        u32::from(date.day),
    )
}

/// Start of the time window. Absent ⇒ midnight (defaulted); present but
/// unparseable ⇒ `None`.
pub fn resolve_time(time: Option<&str>) -> Option<Resolution<NaiveTime>> {
    let Some(time) = time.filter(|time| !time.trim().is_empty()) else {
        return Some(Resolution::Defaulted(NaiveTime::default()));
    };
    let ClockTime { hour, minute } = ClockTime::parse_start(time)?;
    NaiveTime::from_hms_opt(u32::from(hour), u32::from(minute), 0).map(Resolution::Parsed)
}

/// IANA zone; absent, blank or unknown names fall back to UTC.
pub fn resolve_timezone(timezone: Option<&str>) -> Resolution<Tz> {
    timezone
        .map(str::trim)
        .filter(|name| !name.is_empty())
        .and_then(|name| name.parse::<Tz>().ok())
        .map_or(Resolution::Defaulted(Tz::UTC), Resolution::Parsed)
}

/// Combine date, time and zone into an instant.
pub fn start_instant(
    date: Option<&str>,
    time: Option<&str>,
    timezone: Option<&str>,
) -> Option<DateTime<Tz>> {
    let date = resolve_date(date)?;
    let time = resolve_time(time)?.value();
    let tz = resolve_timezone(timezone).value();
    localize(&tz, date.and_time(time))
}

/// Map a local wall-clock time to an instant. Ambiguous times take the
/// earliest instant; times inside a DST gap move to the first valid minute.
fn localize(tz: &Tz, local: NaiveDateTime) -> Option<DateTime<Tz>> {
    (0..=MAX_GAP_MINUTES).find_map(|minutes| {
        let shifted = local.checked_add_signed(TimeDelta::minutes(minutes))?;
        tz.from_local_datetime(&shifted).earliest()
    })
}

/// Fill the derived fields of one talk.
pub fn decorate(talk: &mut Talk) {
    if let Some(name) = talk.timezone.as_deref().filter(|name| !name.trim().is_empty())
        && resolve_timezone(Some(name)).is_defaulted()
    {
        debug!("decorate"; "`{}`: unknown timezone `{name}`, using UTC", talk.title);
    }
    talk.start = start_instant(
        talk.date.as_deref(),
        talk.time.as_deref(),
        talk.timezone.as_deref(),
    );
    talk.iso_start = talk.start.as_ref().map(DateTime::to_rfc3339);

    talk.date_display = talk
        .date
        .clone()
        .or_else(|| talk.start.as_ref().map(|start| start.format("%Y-%m-%d").to_string()))
        .unwrap_or_else(|| TBA.to_owned());
    talk.time_display = talk
        .time
        .clone()
        .or_else(|| talk.start.as_ref().map(|start| start.format("%H:%M").to_string()))
        .unwrap_or_else(|| TBA.to_owned());
}

/// Decorate every talk in place and hand the list back.
pub fn decorate_all(mut talks: Vec<Talk>) -> Vec<Talk> {
    talks.iter_mut().for_each(decorate);
    talks
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Timelike, Utc};

    #[test]
    fn test_resolve_timezone() {
        assert_eq!(
            resolve_timezone(Some("America/New_York")),
            Resolution::Parsed(chrono_tz::America::New_York)
        );
        assert_eq!(resolve_timezone(None), Resolution::Defaulted(Tz::UTC));
        assert_eq!(resolve_timezone(Some("")), Resolution::Defaulted(Tz::UTC));
        assert_eq!(resolve_timezone(Some("Mars/Olympus")), Resolution::Defaulted(Tz::UTC));
        assert!(resolve_timezone(Some("Nowhere")).is_defaulted());
    }

    #[test]
    fn test_resolve_time() {
        assert_eq!(resolve_time(None), Some(Resolution::Defaulted(NaiveTime::default())));
        assert_eq!(
            resolve_time(Some("14:00–15:00")),
            Some(Resolution::Parsed(NaiveTime::from_hms_opt(14, 0, 0).unwrap()))
        );
        assert_eq!(resolve_time(Some("later")), None);
    }

    #[test]
    fn test_start_instant_uses_timezone() {
        let start = start_instant(Some("2099-01-01"), Some("14:00-15:00"), Some("Europe/Berlin")).unwrap();
        let utc = start.with_timezone(&Utc);
        assert_eq!(utc.hour(), 13);
        assert_eq!(start.format("%Y-%m-%d %H:%M").to_string(), "2099-01-01 14:00");
    }

    #[test]
    fn test_start_instant_without_date() {
        assert!(start_instant(None, None, None).is_none());
        assert!(start_instant(None, Some("14:00"), Some("UTC")).is_none());
        assert!(start_instant(Some("Jan 1st"), Some("14:00"), None).is_none());
        assert!(start_instant(Some("2099-01-01"), Some("2pm"), None).is_none());
    }

    #[test]
    fn test_start_instant_dst_gap_moves_forward() {
        // 02:30 does not exist in New York on 2024-03-10
        let start = start_instant(Some("2024-03-10"), Some("02:30"), Some("America/New_York")).unwrap();
        assert_eq!(start.hour(), 3);
        assert_eq!(start.minute(), 0);
    }

    #[test]
    fn test_decorate_fills_displays() {
        let mut talk = Talk::new("T");
        talk.date = Some("2099-01-01".into());
        talk.time = Some("14:00-15:00".into());
        decorate(&mut talk);

        assert!(talk.start.is_some());
        assert_eq!(talk.iso_start.as_deref(), Some("2099-01-01T14:00:00+00:00"));
        assert_eq!(talk.date_display, "2099-01-01");
        assert_eq!(talk.time_display, "14:00-15:00");
    }

    #[test]
    fn test_decorate_derives_time_from_instant() {
        let mut talk = Talk::new("T");
        talk.date = Some("2099-01-01".into());
        decorate(&mut talk);
        assert_eq!(talk.time_display, "00:00");
    }

    #[test]
    fn test_decorate_degrades_to_tba() {
        let mut talk = Talk::new("T");
        decorate(&mut talk);
        assert!(talk.start.is_none());
        assert!(talk.iso_start.is_none());
        assert_eq!(talk.date_display, "TBA");
        assert_eq!(talk.time_display, "TBA");

        let mut talk = Talk::new("T");
        talk.date = Some("sometime".into());
        decorate(&mut talk);
        assert!(talk.start.is_none());
        assert_eq!(talk.date_display, "sometime");
    }
}
