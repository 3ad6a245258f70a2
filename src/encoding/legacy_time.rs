// SPDX-FileCopyrightText: 2026 ArcheBase
//
// SPDX-License-Identifier: MulanPSL-2.0

//! Legacy day-count date/time values.
//!
//! A legacy date/time is an `f64` counting days since 1899-12-30 00:00:00 in
//! some time zone. The integer part is the day, the fractional part the time
//! of day. Conversion goes through whole milliseconds, rounded half up:
//! `floor(days * 86_400_000 + 0.5)`.

use chrono::{DateTime, Duration, NaiveDate, NaiveDateTime, TimeZone};

use crate::{CodecError, FieldKind, Result};

/// Milliseconds in one day.
pub const MILLIS_PER_DAY: f64 = 86_400_000.0;

/// The naive epoch, 1899-12-30 00:00:00.
pub fn legacy_epoch() -> NaiveDateTime {
    NaiveDate::from_ymd_opt(1899, 12, 30)
        .and_then(|date| date.and_hms_opt(0, 0, 0))
        .expect("1899-12-30 00:00:00 is a valid date")
}

/// The epoch as an instant in `tz`.
///
/// If midnight does not exist in `tz` on that day, the naive epoch is read as
/// UTC instead.
pub fn epoch_in<Tz: TimeZone>(tz: &Tz) -> DateTime<Tz> {
    let naive = legacy_epoch();
    tz.from_local_datetime(&naive)
        .earliest()
        .unwrap_or_else(|| tz.from_utc_datetime(&naive))
}

/// Convert a day count to whole milliseconds, rounding half up.
pub fn days_to_millis(days: f64) -> Result<i64> {
    let millis = (days * MILLIS_PER_DAY + 0.5).floor();
    // i64::MIN itself is excluded: Duration cannot hold it.
    if !millis.is_finite() || millis <= i64::MIN as f64 || millis >= i64::MAX as f64 {
        return Err(CodecError::out_of_range(
            FieldKind::LegacyDateTime,
            format!("day count {days} is not representable in milliseconds"),
        ));
    }
    Ok(millis as i64)
}

/// Convert whole milliseconds to a day count.
pub fn millis_to_days(millis: i64) -> f64 {
    millis as f64 / MILLIS_PER_DAY
}

/// Convert a day count to an instant, taking the epoch in `tz`.
pub fn to_datetime<Tz: TimeZone>(days: f64, tz: &Tz) -> Result<DateTime<Tz>> {
    let millis = days_to_millis(days)?;
    epoch_in(tz)
        .checked_add_signed(Duration::milliseconds(millis))
        .ok_or_else(|| {
            CodecError::out_of_range(
                FieldKind::LegacyDateTime,
                format!("{days} days from the epoch is outside the supported date range"),
            )
        })
}

/// Convert an instant to a day count relative to the epoch in its own zone.
///
/// Sub-millisecond precision is floored, matching the rounding of
/// [`days_to_millis`] on the way back.
pub fn from_datetime<Tz: TimeZone>(datetime: &DateTime<Tz>) -> f64 {
    let epoch = epoch_in(&datetime.timezone());
    let elapsed = datetime.clone().signed_duration_since(epoch);
    // num_milliseconds truncates toward zero.
    let mut millis = elapsed.num_milliseconds();
    if Duration::milliseconds(millis) > elapsed {
        millis -= 1;
    }
    millis_to_days(millis)
}
