//! Time axis decoding.
//!
//! NetCDF stores time as numeric offsets with a `units` attribute of the form
//! `<unit> since <reference timestamp>` and an optional `calendar` attribute.
//! This module turns those offsets into ISO 8601 timestamps.
//!
//! See <https://www.unidata.ucar.edu/software/netcdf/time/recs.html> and the
//! CF conventions section on calendars.

use crate::data::{Value, VariableInfo};
use crate::error::{NcTableError, Result};
use chrono::{Datelike, NaiveDate};
use regex::Regex;
use std::fmt;
use std::str::FromStr;
use std::sync::OnceLock;

const MILLIS_PER_DAY: i64 = 86_400_000;

/// Days from 0001-01-01 (day 1) to 1582-10-15, the Gregorian cutover.
const GREGORIAN_CUTOVER: i64 = 577_736;

/// Offset between a Julian Day Number and a chrono day-from-CE count.
const JDN_CE_OFFSET: i64 = 1_721_425;

fn units_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"(?i)^\s*(\w+)\s+since\s+(.+?)\s*$").expect("valid regex"))
}

fn timestamp_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(
            r"(?ix)^
            (-?\d{1,4})-(\d{1,2})-(\d{1,2})
            (?:[T\s]+(\d{1,2}):(\d{1,2})(?::(\d{1,2})(?:\.(\d+))?)?)?
            \s*
            (?:(Z|UTC|GMT)|([+-])(\d{1,2})(?::?(\d{2}))?)?
            $",
        )
        .expect("valid regex")
    })
}

/// Calendars defined by the CF conventions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Calendar {
    /// Mixed Julian/Gregorian calendar with the 1582-10-15 cutover.
    #[default]
    Standard,
    /// Gregorian calendar extended backwards in time.
    ProlepticGregorian,
    /// Every year has 365 days.
    NoLeap,
    /// Every year has 366 days.
    AllLeap,
    /// Twelve months of 30 days.
    Day360,
}

impl Calendar {
    /// Look up a calendar by its CF name (case-insensitive).
    pub fn from_name(name: &str) -> Option<Self> {
        match name.trim().to_lowercase().as_str() {
            "standard" | "gregorian" => Some(Self::Standard),
            "proleptic_gregorian" => Some(Self::ProlepticGregorian),
            "noleap" | "no_leap" | "365_day" => Some(Self::NoLeap),
            "all_leap" | "366_day" => Some(Self::AllLeap),
            "360_day" => Some(Self::Day360),
            _ => None,
        }
    }

    /// CF name.
    pub fn name(self) -> &'static str {
        match self {
            Self::Standard => "standard",
            Self::ProlepticGregorian => "proleptic_gregorian",
            Self::NoLeap => "noleap",
            Self::AllLeap => "all_leap",
            Self::Day360 => "360_day",
        }
    }

    fn month_lengths(self) -> [i64; 12] {
        match self {
            Self::AllLeap => [31, 29, 31, 30, 31, 30, 31, 31, 30, 31, 30, 31],
            Self::Day360 => [30; 12],
            _ => [31, 28, 31, 30, 31, 30, 31, 31, 30, 31, 30, 31],
        }
    }

    /// Day count for a date, in this calendar's own numbering.
    fn days_from_date(self, year: i64, month: u32, day: u32) -> Option<i64> {
        if !(1..=12).contains(&month) || day == 0 {
            return None;
        }
        match self {
            Self::Standard | Self::ProlepticGregorian => {
                let year = i32::try_from(year).ok()?;
                let gregorian = NaiveDate::from_ymd_opt(year, month, day)
                    .map(|d| i64::from(d.num_days_from_ce()));
                match (self, gregorian) {
                    (Self::Standard, Some(days)) if days >= GREGORIAN_CUTOVER => Some(days),
                    (Self::Standard, _) => {
                        let days = julian_to_jdn(i64::from(year), month, day) - JDN_CE_OFFSET;
                        (days < GREGORIAN_CUTOVER).then_some(days)
                    },
                    (_, days) => days,
                }
            },
            _ => {
                let lengths = self.month_lengths();
                if i64::from(day) > lengths[month as usize - 1] {
                    return None;
                }
                let year_len: i64 = lengths.iter().sum();
                let before: i64 = lengths[..month as usize - 1].iter().sum();
                Some(year * year_len + before + i64::from(day) - 1)
            },
        }
    }

    /// Inverse of [`Calendar::days_from_date`].
    fn date_from_days(self, days: i64) -> Option<(i64, u32, u32)> {
        match self {
            Self::Standard if days < GREGORIAN_CUTOVER => Some(jdn_to_julian(days + JDN_CE_OFFSET)),
            Self::Standard | Self::ProlepticGregorian => {
                let date = NaiveDate::from_num_days_from_ce_opt(i32::try_from(days).ok()?)?;
                Some((i64::from(date.year()), date.month(), date.day()))
            },
            _ => {
                let lengths = self.month_lengths();
                let year_len: i64 = lengths.iter().sum();
                let year = days.div_euclid(year_len);
                let mut rem = days.rem_euclid(year_len);
                let mut month = 0;
                while rem >= lengths[month] {
                    rem -= lengths[month];
                    month += 1;
                }
                Some((year, month as u32 + 1, rem as u32 + 1))
            },
        }
    }
}

impl fmt::Display for Calendar {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Calendar {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        Self::from_name(s).ok_or_else(|| format!("unknown calendar: {}", s))
    }
}

fn julian_to_jdn(year: i64, month: u32, day: u32) -> i64 {
    let a = (14 - i64::from(month)) / 12;
    let y = year + 4800 - a;
    let m = i64::from(month) + 12 * a - 3;
    i64::from(day) + (153 * m + 2) / 5 + 365 * y + y.div_euclid(4) - 32083
}

fn jdn_to_julian(jdn: i64) -> (i64, u32, u32) {
    let c = jdn + 32082;
    let d = (4 * c + 3).div_euclid(1461);
    let e = c - (1461 * d).div_euclid(4);
    let m = (5 * e + 2) / 153;
    let day = e - (153 * m + 2) / 5 + 1;
    let month = m + 3 - 12 * (m / 10);
    let year = d - 4800 + m / 10;
    (year, month as u32, day as u32)
}

/// Length of one unit of a time offset.
#[derive(Debug, Clone, Copy, PartialEq)]
enum TimeUnit {
    /// Exact number of milliseconds.
    Millis(i64),
    /// udunits month and year, which are not whole days.
    Days(f64),
}

impl TimeUnit {
    fn parse(name: &str) -> Option<Self> {
        let unit = match name.to_lowercase().as_str() {
            "ms" | "msec" | "msecs" | "millisecond" | "milliseconds" => Self::Millis(1),
            "s" | "sec" | "secs" | "second" | "seconds" => Self::Millis(1_000),
            "min" | "mins" | "minute" | "minutes" => Self::Millis(60_000),
            "h" | "hr" | "hrs" | "hour" | "hours" => Self::Millis(3_600_000),
            "d" | "day" | "days" => Self::Millis(MILLIS_PER_DAY),
            "week" | "weeks" => Self::Millis(7 * MILLIS_PER_DAY),
            "month" | "months" => Self::Days(365.242_198_781 / 12.0),
            "year" | "years" | "yr" => Self::Days(365.242_198_781),
            _ => return None,
        };
        Some(unit)
    }

    fn millis_f64(self) -> f64 {
        match self {
            Self::Millis(ms) => ms as f64,
            Self::Days(days) => days * MILLIS_PER_DAY as f64,
        }
    }
}

/// Parsed `<unit> since <reference>` units with their calendar.
#[derive(Debug, Clone, PartialEq)]
pub struct TimeUnits {
    unit: TimeUnit,
    /// Reference instant as milliseconds in the calendar's day numbering.
    reference: i64,
    calendar: Calendar,
}

impl TimeUnits {
    /// Parse a units string.
    pub fn parse(units: &str, calendar: Calendar) -> Result<Self> {
        let invalid = || NcTableError::invalid_time_units(units);
        let caps = units_regex().captures(units).ok_or_else(invalid)?;
        let unit = TimeUnit::parse(&caps[1]).ok_or_else(invalid)?;
        let reference = Self::parse_reference(&caps[2], calendar).ok_or_else(invalid)?;
        Ok(Self {
            unit,
            reference,
            calendar,
        })
    }

    /// Time units for a variable that looks like a time axis, i.e. a numeric
    /// variable whose short name starts with `time` and whose `units` read
    /// `<unit> since <timestamp>`. The `calendar` attribute selects the
    /// calendar; `default_calendar` applies when it is absent or unknown.
    pub fn for_variable_with(variable: &VariableInfo, default_calendar: Calendar) -> Option<Self> {
        if !variable.short_name().starts_with("time") || !variable.dtype.is_numeric() {
            return None;
        }
        let calendar = variable
            .calendar()
            .and_then(Calendar::from_name)
            .unwrap_or(default_calendar);
        Self::parse(variable.units()?, calendar).ok()
    }

    /// [`TimeUnits::for_variable_with`] using the standard calendar default.
    pub fn for_variable(variable: &VariableInfo) -> Option<Self> {
        Self::for_variable_with(variable, Calendar::default())
    }

    /// Calendar used for decoding.
    pub fn calendar(&self) -> Calendar {
        self.calendar
    }

    fn parse_reference(text: &str, calendar: Calendar) -> Option<i64> {
        let caps = timestamp_regex().captures(text.trim())?;
        let num = |i: usize| caps.get(i).map(|m| m.as_str().parse::<i64>()).transpose();
        let year = num(1).ok()??;
        let month = u32::try_from(num(2).ok()??).ok()?;
        let day = u32::try_from(num(3).ok()??).ok()?;
        let hour = num(4).ok()?.unwrap_or(0);
        let minute = num(5).ok()?.unwrap_or(0);
        let second = num(6).ok()?.unwrap_or(0);
        if hour > 24 || minute > 59 || second > 60 {
            return None;
        }
        let millis = caps
            .get(7)
            .map(|m| {
                let digits: String = m.as_str().chars().chain("000".chars()).take(3).collect();
                digits.parse::<i64>()
            })
            .transpose()
            .ok()?
            .unwrap_or(0);
        let zone = match caps.get(9) {
            Some(sign) => {
                let hours = num(10).ok()?.unwrap_or(0);
                let minutes = num(11).ok()?.unwrap_or(0);
                let offset = (hours * 60 + minutes) * 60_000;
                if sign.as_str() == "-" {
                    -offset
                } else {
                    offset
                }
            },
            None => 0,
        };

        let days = calendar.days_from_date(year, month, day)?;
        Some(days * MILLIS_PER_DAY + ((hour * 60 + minute) * 60 + second) * 1_000 + millis - zone)
    }

    /// Decode an integral offset.
    pub fn decode_int(&self, offset: i64) -> Result<String> {
        let millis = match self.unit {
            TimeUnit::Millis(ms) => offset.checked_mul(ms),
            TimeUnit::Days(_) => Some((offset as f64 * self.unit.millis_f64()).round() as i64),
        };
        self.format(millis.and_then(|m| m.checked_add(self.reference)))
    }

    /// Decode a floating point offset, rounded to the millisecond.
    pub fn decode_f64(&self, offset: f64) -> Result<String> {
        let millis = offset * self.unit.millis_f64();
        if !millis.is_finite() || millis.abs() > i64::MAX as f64 / 2.0 {
            return self.format(None);
        }
        self.format(self.reference.checked_add(millis.round() as i64))
    }

    /// Decode a raw value read from a time variable. Integral element types go
    /// through integer arithmetic, everything else through floating point.
    pub fn decode(&self, value: &Value) -> Result<String> {
        if value.element_type().is_integral() {
            if let Some(v) = value.as_i64() {
                return self.decode_int(v);
            }
        }
        match value.as_f64() {
            Some(v) => self.decode_f64(v),
            None => Err(NcTableError::NetCDF(format!("Not a numeric time value: {:?}", value))),
        }
    }

    fn format(&self, millis: Option<i64>) -> Result<String> {
        let overflow = || NcTableError::NetCDF("Time value out of range".to_string());
        let millis = millis.ok_or_else(overflow)?;
        let days = millis.div_euclid(MILLIS_PER_DAY);
        let of_day = millis.rem_euclid(MILLIS_PER_DAY);
        let (year, month, day) = self.calendar.date_from_days(days).ok_or_else(overflow)?;
        let secs = of_day / 1_000;
        let frac = of_day % 1_000;
        let mut text = format!(
            "{:04}-{:02}-{:02}T{:02}:{:02}:{:02}",
            year,
            month,
            day,
            secs / 3_600,
            secs / 60 % 60,
            secs % 60
        );
        if frac != 0 {
            text.push_str(&format!(".{:03}", frac));
        }
        Ok(text)
    }
}
