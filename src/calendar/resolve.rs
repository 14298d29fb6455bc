use chrono::{DateTime, Utc};

use crate::{calendar::date::CalendarDate, foundation::error::YearGridResult};

/// Resolve the calendar date a request refers to.
///
/// A literal `YYYY-MM-DD` override wins unconditionally and is taken as-is, with no timezone
/// conversion. Otherwise `now` is projected into the IANA zone `tz`, matched without regard to
/// case; an unknown zone degrades to UTC with a warning rather than failing the request. No
/// zone means UTC.
pub fn resolve_date(
    date_override: Option<&str>,
    tz: Option<&str>,
    now: DateTime<Utc>,
) -> YearGridResult<CalendarDate> {
    if let Some(lit) = date_override.filter(|s| !s.trim().is_empty()) {
        return CalendarDate::parse(lit);
    }

    let Some(name) = tz.map(str::trim).filter(|s| !s.is_empty()) else {
        return Ok(now.date_naive().into());
    };

    match parse_zone(name) {
        Some(zone) => Ok(now.with_timezone(&zone).date_naive().into()),
        None => {
            tracing::warn!(tz = name, "unknown timezone, falling back to UTC");
            Ok(now.date_naive().into())
        }
    }
}

/// IANA lookup, exact first, then ignoring ASCII case (`asia/tokyo` is `Asia/Tokyo`).
fn parse_zone(name: &str) -> Option<chrono_tz::Tz> {
    name.parse::<chrono_tz::Tz>().ok().or_else(|| {
        chrono_tz::TZ_VARIANTS
            .iter()
            .copied()
            .find(|tz| tz.name().eq_ignore_ascii_case(name))
    })
}

/// [`resolve_date`] against the wall clock.
pub fn today(date_override: Option<&str>, tz: Option<&str>) -> YearGridResult<CalendarDate> {
    resolve_date(date_override, tz, Utc::now())
}

#[cfg(test)]
#[path = "../../tests/unit/calendar/resolve.rs"]
mod tests;
