//! Luni-solar calendar arithmetic.
//!
//! Pure functions over (year, month, day) triples and absolute day numbers:
//! - Molad (new moon) computation in parts since the molad of creation
//! - Year start with the four postponement rules
//! - Leap years, year lengths and month lengths
//! - Conversion between (year, month, day) and absolute days
//!
//! Absolute day 1 is 0001-01-01 in the proleptic Gregorian calendar, the
//! same count chrono exposes as `num_days_from_ce`.

use crate::types::{Kviah, Month, YearKviah};

pub const PARTS_PER_MINUTE: i64 = 18;
pub const PARTS_PER_HOUR: i64 = PARTS_PER_MINUTE * 60;
pub const PARTS_PER_DAY: i64 = PARTS_PER_HOUR * 24;

/// Mean lunation: 29 days, 12 hours, 793 parts
pub const PARTS_PER_MONTH: i64 = PARTS_PER_DAY * 29 + PARTS_PER_HOUR * 12 + 793;

/// Molad of creation (BaHaRaD): day 2, 5 hours, 204 parts
pub const MOLAD_TOHU: i64 = PARTS_PER_DAY + PARTS_PER_HOUR * 5 + 204;

/// Absolute day preceding the first day of the luni-solar count
pub const EPOCH: i64 = -1_373_429;

/// First absolute day that can be represented
pub const FIRST_SUPPORTED_DAY: i64 = 1;

/// Last year lying wholly inside chrono's civil range
pub const LAST_SUPPORTED_YEAR: i32 = 265_901;

/// Year-start postponement thresholds, in parts past the start of the day
const GATRAD_THRESHOLD: i64 = 9924;
const BETUTAKPAT_THRESHOLD: i64 = 16789;
const MOLAD_ZAKEN_THRESHOLD: i64 = 19440;

pub fn is_leap_year(year: i32) -> bool {
    (7 * i64::from(year) + 1).rem_euclid(19) < 7
}

pub fn months_in_year(year: i32) -> u8 {
    if is_leap_year(year) {
        13
    } else {
        12
    }
}

/// Months of a year in chronological order, starting at Tishrei.
///
/// `chronological_months(5779)` is `[7, 8, 9, 10, 11, 12, 13, 1, 2, 3, 4, 5, 6]`.
pub fn chronological_months(year: i32) -> Vec<u8> {
    let last = months_in_year(year);
    (7..=last).chain(1..7).collect()
}

/// `(month, length)` pairs in chronological order
pub fn chronological_month_lengths(year: i32) -> Vec<(u8, u8)> {
    chronological_months(year)
        .into_iter()
        .map(|m| (m, days_in_month(year, m)))
        .collect()
}

/// 1-based position of `month` counted from Tishrei
pub fn month_number_from_tishrei(year: i32, month: u8) -> u8 {
    let (shift, count) = if is_leap_year(year) { (6, 13) } else { (5, 12) };
    1 + (month + shift) % count
}

/// Parts elapsed from the molad of creation to the molad of (year, month)
pub fn parts_since_molad_tohu(year: i32, month: u8) -> i64 {
    let previous = i64::from(year) - 1;
    let cycles = previous.div_euclid(19);
    let remainder = previous.rem_euclid(19);
    let months = i64::from(month_number_from_tishrei(year, month)) - 1
        + 235 * cycles
        + 12 * remainder
        + (7 * remainder + 1) / 19;

    MOLAD_TOHU + PARTS_PER_MONTH * months
}

/// Days from the calendar epoch to Tishrei 1 of `year`, postponements included
pub fn elapsed_days(year: i32) -> i64 {
    let parts = parts_since_molad_tohu(year, Month::Tishrei.number());
    let days = parts.div_euclid(PARTS_PER_DAY);
    let remainder = parts.rem_euclid(PARTS_PER_DAY);
    days + postponements(year, days, remainder)
}

/// Number of days (0..=2) Rosh Hashana is pushed past the Tishrei molad
fn postponements(year: i32, days: i64, remainder: i64) -> i64 {
    // `days` counts from a Monday; shift so that 0 is Shabbos, 1 is Sunday
    let weekday = (days + 1).rem_euclid(7);
    let mut count = 0;

    if remainder >= MOLAD_ZAKEN_THRESHOLD
        || (weekday == 3 && remainder >= GATRAD_THRESHOLD && !is_leap_year(year))
        || (weekday == 2 && remainder >= BETUTAKPAT_THRESHOLD && is_leap_year(year - 1))
    {
        count = 1;
    }

    // lo AD"U rosh: never Sunday, Wednesday or Friday
    if matches!((weekday + count) % 7, 1 | 4 | 6) {
        count += 1;
    }

    count
}

/// Absolute day of Tishrei 1 of `year`
pub fn year_start(year: i32) -> i64 {
    elapsed_days(year) + EPOCH + 1
}

pub fn days_in_year(year: i32) -> i64 {
    elapsed_days(year + 1) - elapsed_days(year)
}

pub fn is_cheshvan_long(year: i32) -> bool {
    days_in_year(year) % 10 == 5
}

pub fn is_cheshvan_short(year: i32) -> bool {
    !is_cheshvan_long(year)
}

pub fn is_kislev_short(year: i32) -> bool {
    days_in_year(year) % 10 == 3
}

pub fn is_kislev_long(year: i32) -> bool {
    !is_kislev_short(year)
}

pub fn cheshvan_kislev_kviah(year: i32) -> Kviah {
    match days_in_year(year) % 10 {
        3 => Kviah::Chaseirim,
        5 => Kviah::Shelaimim,
        _ => Kviah::Kesidran,
    }
}

/// Weekdays of Rosh Hashana and Pesach together with the Cheshvan/Kislev pattern
pub fn year_kviah(year: i32) -> YearKviah {
    let rosh_hashana = year_start(year);
    let pesach = to_absolute(year, Month::Nissan.number(), 15);
    YearKviah {
        rosh_hashana: day_of_week(rosh_hashana),
        cheshvan_kislev: cheshvan_kislev_kviah(year),
        pesach: day_of_week(pesach),
    }
}

/// Length of `month` in `year`. The month must exist in that year.
pub fn days_in_month(year: i32, month: u8) -> u8 {
    let short = match month {
        2 | 4 | 6 | 10 | 13 => true,
        8 => is_cheshvan_short(year),
        9 => is_kislev_short(year),
        12 => !is_leap_year(year),
        _ => false,
    };
    if short {
        29
    } else {
        30
    }
}

/// 1-based day of the year counted from Tishrei 1
pub fn day_number_of_year(year: i32, month: u8, day: u8) -> i64 {
    let index = usize::from(month_number_from_tishrei(year, month)) - 1;
    let prior: i64 = chronological_months(year)[..index]
        .iter()
        .map(|&m| i64::from(days_in_month(year, m)))
        .sum();
    prior + i64::from(day)
}

pub fn to_absolute(year: i32, month: u8, day: u8) -> i64 {
    day_number_of_year(year, month, day) + year_start(year) - 1
}

/// Convert an absolute day to (year, month, day)
pub fn from_absolute(absolute: i64) -> (i32, u8, u8) {
    // truncating estimate; it can land on either side of the real year
    let mut year = ((absolute - EPOCH) / 366) as i32;
    while absolute >= year_start(year + 1) {
        year += 1;
    }
    while absolute < year_start(year) {
        year -= 1;
    }

    let mut month = Month::Tishrei.number();
    let mut month_start = year_start(year);
    for (m, length) in chronological_month_lengths(year) {
        month = m;
        if absolute < month_start + i64::from(length) {
            break;
        }
        month_start += i64::from(length);
    }

    (year, month, (absolute - month_start + 1) as u8)
}

/// Day of week (1 = Sunday .. 7 = Shabbos) of an absolute day
pub fn day_of_week(absolute: i64) -> u8 {
    (absolute.rem_euclid(7) + 1) as u8
}

/// Absolute day of a molad expressed in parts since the molad of creation
pub fn molad_day(parts: i64) -> i64 {
    parts.div_euclid(PARTS_PER_DAY) + EPOCH
}

#[cfg(test)]
mod tests {
    use super::*;

    // Years covering each year type
    const STANDARD_MONDAY_CHASEIRIM: i32 = 5777;
    const STANDARD_THURSDAY_KESIDRAN: i32 = 5778;
    const STANDARD_SHABBOS_SHELAIMIM: i32 = 5770;
    const LEAP_THURSDAY_CHASEIRIM: i32 = 5765;
    const LEAP_TUESDAY_KESIDRAN: i32 = 5755;
    const LEAP_MONDAY_SHELAIMIM: i32 = 5776;

    #[test]
    fn test_constants() {
        assert_eq!(PARTS_PER_HOUR, 1080);
        assert_eq!(PARTS_PER_DAY, 25920);
        assert_eq!(PARTS_PER_MONTH, 765_433);
        assert_eq!(MOLAD_TOHU, 31_524);
    }

    #[test]
    fn test_days_in_year() {
        let years = [
            (STANDARD_MONDAY_CHASEIRIM, 353),
            (STANDARD_THURSDAY_KESIDRAN, 354),
            (STANDARD_SHABBOS_SHELAIMIM, 355),
            (LEAP_THURSDAY_CHASEIRIM, 383),
            (LEAP_TUESDAY_KESIDRAN, 384),
            (LEAP_MONDAY_SHELAIMIM, 385),
        ];
        for (year, expected) in years {
            assert_eq!(days_in_year(year), expected, "year {}", year);
        }
    }

    #[test]
    fn test_kviah_of_year_types() {
        assert_eq!(cheshvan_kislev_kviah(STANDARD_MONDAY_CHASEIRIM), Kviah::Chaseirim);
        assert_eq!(cheshvan_kislev_kviah(STANDARD_THURSDAY_KESIDRAN), Kviah::Kesidran);
        assert_eq!(cheshvan_kislev_kviah(STANDARD_SHABBOS_SHELAIMIM), Kviah::Shelaimim);
        assert_eq!(cheshvan_kislev_kviah(LEAP_THURSDAY_CHASEIRIM), Kviah::Chaseirim);
        assert_eq!(cheshvan_kislev_kviah(LEAP_TUESDAY_KESIDRAN), Kviah::Kesidran);
        assert_eq!(cheshvan_kislev_kviah(LEAP_MONDAY_SHELAIMIM), Kviah::Shelaimim);
    }

    #[test]
    fn test_year_kviah() {
        let kviah = year_kviah(STANDARD_MONDAY_CHASEIRIM);
        assert_eq!(
            (kviah.rosh_hashana, kviah.cheshvan_kislev, kviah.pesach),
            (2, Kviah::Chaseirim, 3)
        );
        let kviah = year_kviah(STANDARD_SHABBOS_SHELAIMIM);
        assert_eq!(
            (kviah.rosh_hashana, kviah.cheshvan_kislev, kviah.pesach),
            (7, Kviah::Shelaimim, 3)
        );
        let kviah = year_kviah(LEAP_MONDAY_SHELAIMIM);
        assert_eq!(
            (kviah.rosh_hashana, kviah.cheshvan_kislev, kviah.pesach),
            (2, Kviah::Shelaimim, 7)
        );
    }

    #[test]
    fn test_cheshvan_and_kislev_lengths() {
        assert!(!is_cheshvan_long(STANDARD_THURSDAY_KESIDRAN));
        assert!(is_kislev_long(STANDARD_THURSDAY_KESIDRAN));
        assert!(is_cheshvan_long(STANDARD_SHABBOS_SHELAIMIM));
        assert!(is_kislev_short(LEAP_THURSDAY_CHASEIRIM));
        assert!(is_cheshvan_short(LEAP_THURSDAY_CHASEIRIM));
    }

    #[test]
    fn test_days_in_month() {
        let standard = [30, 29, 30, 29, 30, 29, 30, 29, 29, 29, 30, 29];
        let months: Vec<u8> = (1..=12)
            .map(|m| days_in_month(STANDARD_MONDAY_CHASEIRIM, m))
            .collect();
        assert_eq!(months, standard);

        let leap = [30, 29, 30, 29, 30, 29, 30, 30, 30, 29, 30, 30, 29];
        let months: Vec<u8> = (1..=13)
            .map(|m| days_in_month(LEAP_MONDAY_SHELAIMIM, m))
            .collect();
        assert_eq!(months, leap);
    }

    #[test]
    fn test_chronological_months() {
        assert_eq!(
            chronological_months(STANDARD_SHABBOS_SHELAIMIM),
            vec![7, 8, 9, 10, 11, 12, 1, 2, 3, 4, 5, 6]
        );
        assert_eq!(
            chronological_months(LEAP_THURSDAY_CHASEIRIM),
            vec![7, 8, 9, 10, 11, 12, 13, 1, 2, 3, 4, 5, 6]
        );
        assert_eq!(
            chronological_month_lengths(LEAP_THURSDAY_CHASEIRIM),
            vec![
                (7, 30), (8, 29), (9, 29), (10, 29), (11, 30), (12, 30), (13, 29),
                (1, 30), (2, 29), (3, 30), (4, 29), (5, 30), (6, 29)
            ]
        );
    }

    #[test]
    fn test_day_number_of_year() {
        assert_eq!(day_number_of_year(5778, 7, 1), 1);
        assert_eq!(day_number_of_year(5778, 1, 1), 178);
        assert_eq!(day_number_of_year(5778, 6, 29), 354);
        assert_eq!(day_number_of_year(5779, 13, 29), 208);
        assert_eq!(day_number_of_year(5777, 10, 1), 89);
        assert_eq!(day_number_of_year(5770, 9, 1), 61);
    }

    #[test]
    fn test_leap_years_in_cycle() {
        for start in [1, 3761, 5700, 5778] {
            let leaps = (start..start + 19).filter(|&y| is_leap_year(y)).count();
            assert_eq!(leaps, 7);
        }
        assert!(!is_leap_year(STANDARD_SHABBOS_SHELAIMIM));
        assert!(is_leap_year(LEAP_THURSDAY_CHASEIRIM));
    }

    #[test]
    fn test_absolute_conversion_fixtures() {
        // 2017-10-26 is absolute day 736628
        assert_eq!(to_absolute(5778, 8, 6), 736_628);
        assert_eq!(from_absolute(736_628), (5778, 8, 6));
        assert_eq!(day_of_week(736_628), 5);
    }

    #[test]
    fn test_first_supported_day() {
        let (year, month, day) = from_absolute(FIRST_SUPPORTED_DAY);
        assert_eq!(to_absolute(year, month, day), FIRST_SUPPORTED_DAY);
    }
}
