//! Epoch strings and Julian Dates.
//!
//! UTC is used as a stand-in for TDB; the difference (about 69 s) is far below what a rendered
//! orbit can show.

use chrono::{DateTime, NaiveDate, NaiveDateTime, SecondsFormat, Utc};
use orrery_core::constants::J2000_JD;
use orrery_core::time::{jd_from_unix_seconds, unix_seconds_from_jd};

use crate::EphemerisError;

const DATE_TIME_FORMATS: &[&str] = &["%Y-%m-%d %H:%M:%S", "%Y-%m-%dT%H:%M:%S", "%Y-%m-%d %H:%M"];

/// Julian Date of a UTC timestamp.
pub fn julian_date(datetime: DateTime<Utc>) -> f64 {
    let seconds =
        datetime.timestamp() as f64 + f64::from(datetime.timestamp_subsec_nanos()) * 1e-9;
    jd_from_unix_seconds(seconds)
}

/// Parse an epoch into a Julian Date.
///
/// Accepted forms: `J2000`, `now`, `JD2451545.0` (or `JD 2451545.0`), RFC 3339 timestamps, and
/// naive UTC `YYYY-MM-DD[ HH:MM[:SS]]`.
pub fn parse_epoch(epoch: &str) -> Result<f64, EphemerisError> {
    let trimmed = epoch.trim();
    let invalid = || EphemerisError::InvalidEpoch {
        epoch: epoch.to_string(),
    };

    if trimmed.eq_ignore_ascii_case("j2000") {
        return Ok(J2000_JD);
    }
    if trimmed.eq_ignore_ascii_case("now") {
        return Ok(julian_date(Utc::now()));
    }
    if let Some(rest) = trimmed
        .strip_prefix("JD")
        .or_else(|| trimmed.strip_prefix("jd"))
    {
        let jd: f64 = rest.trim().parse().map_err(|_| invalid())?;
        return if jd.is_finite() { Ok(jd) } else { Err(invalid()) };
    }
    if let Ok(datetime) = DateTime::parse_from_rfc3339(trimmed) {
        return Ok(julian_date(datetime.with_timezone(&Utc)));
    }
    for format in DATE_TIME_FORMATS {
        if let Ok(naive) = NaiveDateTime::parse_from_str(trimmed, format) {
            return Ok(julian_date(naive.and_utc()));
        }
    }
    if let Ok(date) = NaiveDate::parse_from_str(trimmed, "%Y-%m-%d") {
        let midnight = date.and_hms_opt(0, 0, 0).ok_or_else(invalid)?;
        return Ok(julian_date(midnight.and_utc()));
    }
    Err(invalid())
}

/// RFC 3339 UTC rendering of a Julian Date, to whole seconds.
pub fn format_epoch(jd: f64) -> Result<String, EphemerisError> {
    let invalid = || EphemerisError::InvalidEpoch {
        epoch: format!("JD{jd}"),
    };
    if !jd.is_finite() {
        return Err(invalid());
    }
    let seconds = unix_seconds_from_jd(jd).round();
    let datetime = DateTime::<Utc>::from_timestamp(seconds as i64, 0).ok_or_else(invalid)?;
    Ok(datetime.to_rfc3339_opts(SecondsFormat::Secs, true))
}
