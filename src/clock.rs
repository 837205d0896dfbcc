//! Wall-clock helpers: timestamp formatting and calendar-field entry.
//!
//! The device keeps UTC epoch seconds (no time zones, no DST).  These
//! helpers turn epoch seconds into fixed-width text without allocating
//! and turn the console's date/time fields back into epoch seconds.

use core::fmt::Write;

use chrono::{DateTime, NaiveDate};

/// `"YYYY-MM-DD HH:MM:SS"`
pub type TimestampText = heapless::String<24>;
/// `"Thu Jan  1 00:00:00 1970"`
pub type CtimeText = heapless::String<32>;

const UNREPRESENTABLE: &str = "????-??-?? ??:??:??";

/// Format epoch seconds as `YYYY-MM-DD HH:MM:SS`.
pub fn format_timestamp(epoch_secs: i64) -> TimestampText {
    render(epoch_secs, "%Y-%m-%d %H:%M:%S")
}

/// Format epoch seconds in C `ctime` layout, without the trailing newline.
pub fn format_ctime(epoch_secs: i64) -> CtimeText {
    render(epoch_secs, "%a %b %e %H:%M:%S %Y")
}

fn render<const N: usize>(epoch_secs: i64, layout: &str) -> heapless::String<N> {
    let mut out = heapless::String::new();
    let ok = match DateTime::from_timestamp(epoch_secs, 0) {
        Some(dt) => write!(out, "{}", dt.format(layout)).is_ok(),
        None => false,
    };
    if !ok {
        out.clear();
        let _ = out.push_str(UNREPRESENTABLE);
    }
    out
}

/// Calendar fields as typed on the console.  Values are not range-checked;
/// out-of-range fields roll over into the next larger unit.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CivilTime {
    pub year: i32,
    /// 1-based.
    pub month: i32,
    /// 1-based.
    pub day: i32,
    pub hour: i32,
    pub minute: i32,
    pub second: i32,
}

impl CivilTime {
    /// Normalise and convert to epoch seconds.  `None` only if the result
    /// falls outside the representable calendar.
    ///
    /// Month overflow is folded into the year first; day, hour, minute and
    /// second are then added as plain offsets from the first of the month,
    /// so `2024-02-30` lands on `2024-03-01`.
    pub fn to_epoch(&self) -> Option<i64> {
        let months = i64::from(self.year) * 12 + i64::from(self.month) - 1;
        let year = i32::try_from(months.div_euclid(12)).ok()?;
        let month = u32::try_from(months.rem_euclid(12) + 1).ok()?;

        let first = NaiveDate::from_ymd_opt(year, month, 1)?;
        let epoch = NaiveDate::from_ymd_opt(1970, 1, 1)?;
        let base = first.signed_duration_since(epoch).num_days().checked_mul(86_400)?;

        let offset = (i64::from(self.day) - 1) * 86_400
            + i64::from(self.hour) * 3_600
            + i64::from(self.minute) * 60
            + i64::from(self.second);
        base.checked_add(offset)
    }
}

/// `atoi`-style parse: leading whitespace, an optional sign, then digits up
/// to the first non-digit.  No digits → 0.
pub fn parse_leading_digits(field: &[u8]) -> i32 {
    let mut rest = field.trim_ascii_start();
    let negative = rest.first() == Some(&b'-');
    if let [b'+' | b'-', tail @ ..] = rest {
        rest = tail;
    }
    let mut value: i32 = 0;
    for b in rest.iter().take_while(|b| b.is_ascii_digit()) {
        value = value.saturating_mul(10).saturating_add(i32::from(b - b'0'));
    }
    if negative { -value } else { value }
}
