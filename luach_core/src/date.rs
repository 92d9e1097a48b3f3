//! Dates carrying both civil and luni-solar coordinates.
//!
//! A [`JewishDate`] is an immutable value: its civil date, absolute day
//! number and (year, month, day) are always consistent. Every "setter" and
//! every step returns a new value.

use chrono::{Datelike, Local, NaiveDate};
use serde::Serialize;
use std::cmp::Ordering;
use std::fmt;
use std::hash::{Hash, Hasher};

use crate::calendar::{self, PARTS_PER_DAY, PARTS_PER_HOUR, PARTS_PER_MINUTE};
use crate::types::{Kviah, Month, YearKviah};
use crate::{Error, Result};

/// Steps larger than this go through the absolute day count instead of
/// rolling months one at a time.
const INCREMENTAL_STEP_LIMIT: i64 = 500;

/// Time of a molad: hours since midnight, minutes and parts (1/18 minute)
#[derive(Clone, Copy, Debug, Serialize, PartialEq, Eq, Hash)]
pub struct MoladTime {
    hours: u8,
    minutes: u8,
    parts: u8,
}

impl MoladTime {
    pub fn new(hours: u8, minutes: u8, parts: u8) -> Result<Self> {
        if hours > 23 || minutes > 59 || i64::from(parts) >= PARTS_PER_MINUTE {
            return Err(Error::InvalidDate(format!(
                "invalid molad time {}:{}:{}",
                hours, minutes, parts
            )));
        }
        Ok(Self {
            hours,
            minutes,
            parts,
        })
    }

    pub fn hours(self) -> u8 {
        self.hours
    }

    pub fn minutes(self) -> u8 {
        self.minutes
    }

    pub fn parts(self) -> u8 {
        self.parts
    }
}

impl fmt::Display for MoladTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{:02}:{:02} and {} parts",
            self.hours, self.minutes, self.parts
        )
    }
}

/// A calendar day in both the civil and the luni-solar calendars.
///
/// Equality, ordering and hashing consider only the day; the molad time is
/// informational.
#[derive(Clone, Copy, Debug, Serialize)]
pub struct JewishDate {
    civil: NaiveDate,
    absolute: i64,
    year: i32,
    month: u8,
    day: u8,
    day_of_week: u8,
    molad: Option<MoladTime>,
}

impl JewishDate {
    // ------------------------------------------------------------------------
    // Construction
    // ------------------------------------------------------------------------

    /// Build a date from an absolute day number (1 = 0001-01-01)
    pub fn from_absolute(absolute: i64) -> Result<Self> {
        if absolute < calendar::FIRST_SUPPORTED_DAY {
            return Err(Error::UnsupportedDate(absolute));
        }
        let days = i32::try_from(absolute).map_err(|_| Error::UnsupportedDate(absolute))?;
        let civil = NaiveDate::from_num_days_from_ce_opt(days)
            .ok_or(Error::UnsupportedDate(absolute))?;
        let (year, month, day) = calendar::from_absolute(absolute);

        Ok(Self {
            civil,
            absolute,
            year,
            month,
            day,
            day_of_week: calendar::day_of_week(absolute),
            molad: None,
        })
    }

    pub fn from_civil(civil: NaiveDate) -> Result<Self> {
        Self::from_absolute(i64::from(civil.num_days_from_ce()))
    }

    /// Today's date in the local timezone
    pub fn today() -> Result<Self> {
        Self::from_civil(Local::now().date_naive())
    }

    /// Strict constructor: every field must name a day that exists.
    pub fn new(year: i32, month: u8, day: u8) -> Result<Self> {
        check_ranges(year, month, day)?;
        let months = calendar::months_in_year(year);
        if month > months {
            return Err(Error::InvalidDate(format!(
                "year {} has only {} months",
                year, months
            )));
        }
        let length = calendar::days_in_month(year, month);
        if day > length {
            return Err(Error::InvalidDate(format!(
                "month {} of year {} has only {} days",
                month, year, length
            )));
        }
        Self::from_absolute(calendar::to_absolute(year, month, day))
    }

    /// Lenient constructor: fields must be in their nominal ranges
    /// (month 1..=13, day 1..=30); a month missing from the year becomes the
    /// year's last month number and a day past the month's end becomes its
    /// last day.
    pub fn clamped(year: i32, month: u8, day: u8) -> Result<Self> {
        check_ranges(year, month, day)?;
        let month = month.min(calendar::months_in_year(year));
        let day = day.min(calendar::days_in_month(year, month));
        Self::from_absolute(calendar::to_absolute(year, month, day))
    }

    /// The molad of (year, month) as a date carrying the molad time
    pub fn from_molad(parts: i64) -> Result<Self> {
        let mut absolute = calendar::molad_day(parts);
        let remainder = parts.rem_euclid(PARTS_PER_DAY);
        let hours = remainder / PARTS_PER_HOUR;
        let remainder = remainder % PARTS_PER_HOUR;

        // molad hours count from 18:00 of the previous civil day
        if hours >= 6 {
            absolute += 1;
        }

        let time = MoladTime::new(
            ((hours + 18) % 24) as u8,
            (remainder / PARTS_PER_MINUTE) as u8,
            (remainder % PARTS_PER_MINUTE) as u8,
        )?;
        Ok(Self::from_absolute(absolute)?.with_molad_time(time))
    }

    /// Same day, tagged with a molad time
    pub fn with_molad_time(self, time: MoladTime) -> Self {
        Self {
            molad: Some(time),
            ..self
        }
    }

    // ------------------------------------------------------------------------
    // Clamping setters
    // ------------------------------------------------------------------------

    pub fn with_year(&self, year: i32) -> Result<Self> {
        Self::clamped(year, self.month, self.day)
    }

    pub fn with_month(&self, month: u8) -> Result<Self> {
        Self::clamped(self.year, month, self.day)
    }

    pub fn with_day(&self, day: u8) -> Result<Self> {
        Self::clamped(self.year, self.month, day)
    }

    /// Set the civil date, clamping the day to the civil month's length
    pub fn with_civil(&self, year: i32, month: u32, day: u32) -> Result<Self> {
        if year < 1 || !(1..=12).contains(&month) || !(1..=31).contains(&day) {
            return Err(Error::InvalidDate(format!(
                "invalid civil date {}-{}-{}",
                year, month, day
            )));
        }
        let civil = (1..=day)
            .rev()
            .find_map(|d| NaiveDate::from_ymd_opt(year, month, d))
            .ok_or_else(|| Error::InvalidDate(format!("invalid civil month {}-{}", year, month)))?;
        Self::from_civil(civil)
    }

    // ------------------------------------------------------------------------
    // Arithmetic
    // ------------------------------------------------------------------------

    /// Move by `days` through the absolute day count
    pub fn shift_absolute(&self, days: i64) -> Result<Self> {
        let absolute = self
            .absolute
            .checked_add(days)
            .ok_or(Error::UnsupportedDate(self.absolute))?;
        Self::from_absolute(absolute)
    }

    /// Move forward `days` days (backward when negative)
    pub fn forward(&self, days: i64) -> Result<Self> {
        if days < 0 {
            return self.back(negate(days, self.absolute)?);
        }
        if days > INCREMENTAL_STEP_LIMIT {
            return self.shift_absolute(days);
        }

        let mut lengths = calendar::chronological_month_lengths(self.year);
        let (mut year, mut month) = (self.year, self.month);
        let mut day = i64::from(self.day) + days;

        let mut length = month_length(&lengths, month);
        while day > length {
            day -= length;
            month += 1;
            if usize::from(month) > lengths.len() {
                month = Month::Nissan.number();
            }
            if month == Month::Tishrei.number() {
                year += 1;
                lengths = calendar::chronological_month_lengths(year);
            }
            length = month_length(&lengths, month);
        }

        self.stepped(days, year, month, day)
    }

    /// Move back `days` days (forward when negative)
    pub fn back(&self, days: i64) -> Result<Self> {
        if days < 0 {
            return self.forward(negate(days, self.absolute)?);
        }
        if days > INCREMENTAL_STEP_LIMIT {
            return self.shift_absolute(-days);
        }

        let mut lengths = calendar::chronological_month_lengths(self.year);
        let (mut year, mut month) = (self.year, self.month);
        let mut day = i64::from(self.day) - days;

        while day <= 0 {
            month -= 1;
            if month == 0 {
                month = lengths.len() as u8;
            }
            if month == Month::Elul.number() {
                year -= 1;
                lengths = calendar::chronological_month_lengths(year);
            }
            day += month_length(&lengths, month);
        }

        self.stepped(-days, year, month, day)
    }

    fn stepped(&self, delta: i64, year: i32, month: u8, day: i64) -> Result<Self> {
        let absolute = self.absolute + delta;
        if absolute < calendar::FIRST_SUPPORTED_DAY {
            return Err(Error::UnsupportedDate(absolute));
        }
        let days = i32::try_from(absolute).map_err(|_| Error::UnsupportedDate(absolute))?;
        let civil = NaiveDate::from_num_days_from_ce_opt(days)
            .ok_or(Error::UnsupportedDate(absolute))?;

        Ok(Self {
            civil,
            absolute,
            year,
            month,
            day: day as u8,
            day_of_week: calendar::day_of_week(absolute),
            molad: None,
        })
    }

    /// Signed number of days from `self` to `other`
    pub fn days_until(&self, other: &JewishDate) -> i64 {
        other.absolute - self.absolute
    }

    // ------------------------------------------------------------------------
    // Accessors
    // ------------------------------------------------------------------------

    pub fn civil(&self) -> NaiveDate {
        self.civil
    }

    pub fn civil_year(&self) -> i32 {
        self.civil.year()
    }

    pub fn civil_month(&self) -> u32 {
        self.civil.month()
    }

    pub fn civil_day(&self) -> u32 {
        self.civil.day()
    }

    pub fn absolute(&self) -> i64 {
        self.absolute
    }

    pub fn year(&self) -> i32 {
        self.year
    }

    pub fn month(&self) -> u8 {
        self.month
    }

    pub fn day(&self) -> u8 {
        self.day
    }

    /// (year, month, day)
    pub fn ymd(&self) -> (i32, u8, u8) {
        (self.year, self.month, self.day)
    }

    /// 1 = Sunday .. 7 = Shabbos
    pub fn day_of_week(&self) -> u8 {
        self.day_of_week
    }

    pub fn molad_time(&self) -> Option<MoladTime> {
        self.molad
    }

    pub fn month_name(&self) -> &'static str {
        // month always holds a valid number
        Month::ALL[usize::from(self.month) - 1].name()
    }

    // ------------------------------------------------------------------------
    // Year and month facts
    // ------------------------------------------------------------------------

    pub fn is_leap_year(&self) -> bool {
        calendar::is_leap_year(self.year)
    }

    pub fn months_in_year(&self) -> u8 {
        calendar::months_in_year(self.year)
    }

    pub fn days_in_year(&self) -> i64 {
        calendar::days_in_year(self.year)
    }

    pub fn days_in_month(&self) -> u8 {
        calendar::days_in_month(self.year, self.month)
    }

    pub fn day_number_of_year(&self) -> i64 {
        calendar::day_number_of_year(self.year, self.month, self.day)
    }

    pub fn cheshvan_kislev_kviah(&self) -> Kviah {
        calendar::cheshvan_kislev_kviah(self.year)
    }

    pub fn kviah(&self) -> YearKviah {
        calendar::year_kviah(self.year)
    }

    /// The molad of this date's month
    pub fn molad(&self) -> Result<Self> {
        molad(self.year, self.month)
    }
}

/// The molad of (year, month)
pub fn molad(year: i32, month: u8) -> Result<JewishDate> {
    JewishDate::from_molad(calendar::parts_since_molad_tohu(year, month))
}

fn check_ranges(year: i32, month: u8, day: u8) -> Result<()> {
    if year < 1 || !(1..=13).contains(&month) || !(1..=30).contains(&day) {
        return Err(Error::InvalidDate(format!(
            "invalid date parts {}-{}-{}",
            year, month, day
        )));
    }
    if year > calendar::LAST_SUPPORTED_YEAR {
        return Err(Error::UnsupportedDate(calendar::year_start(year)));
    }
    Ok(())
}

fn negate(days: i64, absolute: i64) -> Result<i64> {
    days.checked_neg().ok_or(Error::UnsupportedDate(absolute))
}

fn month_length(lengths: &[(u8, u8)], month: u8) -> i64 {
    lengths
        .iter()
        .find(|(m, _)| *m == month)
        .map(|(_, length)| i64::from(*length))
        .unwrap_or(30)
}

impl PartialEq for JewishDate {
    fn eq(&self, other: &Self) -> bool {
        self.absolute == other.absolute
    }
}

impl Eq for JewishDate {}

impl PartialOrd for JewishDate {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for JewishDate {
    fn cmp(&self, other: &Self) -> Ordering {
        self.absolute.cmp(&other.absolute)
    }
}

impl Hash for JewishDate {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.absolute.hash(state);
    }
}

impl fmt::Display for JewishDate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} {} {} ({})",
            self.day,
            self.month_name(),
            self.year,
            self.civil
        )
    }
}
