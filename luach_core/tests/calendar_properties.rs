//! Property tests for the calendar engine.
//!
//! These check the invariants that every date conversion relies on:
//! - Absolute days survive a round trip through (year, month, day)
//! - Incremental and absolute-day arithmetic agree
//! - The 19-year leap cycle and year-type closure

use chrono::NaiveDate;
use luach_core::calendar;
use luach_core::{molad, JewishDate, Kviah};
use proptest::prelude::*;

/// 1900-01-01 through 2200-12-31
fn modern_absolute() -> impl Strategy<Value = i64> {
    693_596i64..803_533
}

proptest! {
    #[test]
    fn absolute_roundtrip(absolute in 1i64..1_000_000) {
        let (year, month, day) = calendar::from_absolute(absolute);
        prop_assert_eq!(calendar::to_absolute(year, month, day), absolute);
        prop_assert!(day >= 1 && day <= calendar::days_in_month(year, month));
    }

    #[test]
    fn civil_roundtrip(absolute in modern_absolute()) {
        let date = JewishDate::from_absolute(absolute).unwrap();
        let again = JewishDate::from_civil(date.civil()).unwrap();
        prop_assert_eq!(again.ymd(), date.ymd());
        let strict = JewishDate::new(date.year(), date.month(), date.day()).unwrap();
        prop_assert_eq!(strict.absolute(), absolute);
    }

    #[test]
    fn forward_matches_absolute_shift(absolute in modern_absolute(), days in 0i64..=2000) {
        let date = JewishDate::from_absolute(absolute).unwrap();
        let forward = date.forward(days).unwrap();
        let shifted = date.shift_absolute(days).unwrap();
        prop_assert_eq!(forward.ymd(), shifted.ymd());
        prop_assert_eq!(forward.civil(), shifted.civil());
        prop_assert_eq!(forward.back(days).unwrap().ymd(), date.ymd());
    }

    #[test]
    fn back_matches_absolute_shift(absolute in modern_absolute(), days in 0i64..=2000) {
        let date = JewishDate::from_absolute(absolute).unwrap();
        let back = date.back(days).unwrap();
        prop_assert_eq!(back.ymd(), date.shift_absolute(-days).unwrap().ymd());
        prop_assert_eq!(back.day_of_week(), date.shift_absolute(-days).unwrap().day_of_week());
    }

    #[test]
    fn nineteen_year_leap_cycle(start in 1i32..10_000) {
        let leaps = (start..start + 19).filter(|&y| calendar::is_leap_year(y)).count();
        prop_assert_eq!(leaps, 7);
    }

    #[test]
    fn year_lengths_are_consistent(year in 3800i32..7000) {
        let length = calendar::days_in_year(year);
        let valid: &[i64] = if calendar::is_leap_year(year) { &[383, 384, 385] } else { &[353, 354, 355] };
        prop_assert!(valid.contains(&length));

        let months: i64 = calendar::chronological_month_lengths(year)
            .iter()
            .map(|(_, days)| i64::from(*days))
            .sum();
        prop_assert_eq!(months, length);
        prop_assert_eq!(calendar::year_start(year + 1) - calendar::year_start(year), length);
    }

    #[test]
    fn rosh_hashana_never_on_forbidden_days(year in 3800i32..7000) {
        let weekday = calendar::day_of_week(calendar::year_start(year));
        prop_assert!(![1u8, 4, 6].contains(&weekday));
    }

    #[test]
    fn molad_lands_near_month_start(year in 5000i32..6000, month in 1u8..=12) {
        let molad = molad(year, month).unwrap();
        let first = JewishDate::new(year, month, 1).unwrap();
        prop_assert!(molad.days_until(&first).abs() <= 3);
        prop_assert!(molad.molad_time().is_some());
    }
}

#[test]
fn kviah_closure() {
    use std::collections::HashSet;

    let kviot: HashSet<(u8, Kviah, u8)> = (5000..6000)
        .map(|year| {
            let k = calendar::year_kviah(year);
            (k.rosh_hashana, k.cheshvan_kislev, k.pesach)
        })
        .collect();
    assert_eq!(kviot.len(), 14);
}

#[test]
fn civil_fixtures() {
    let date = JewishDate::from_civil(NaiveDate::from_ymd_opt(2017, 10, 26).unwrap()).unwrap();
    assert_eq!(date.ymd(), (5778, 8, 6));
    let date = JewishDate::from_civil(NaiveDate::from_ymd_opt(1550, 10, 1).unwrap()).unwrap();
    assert_eq!(date.ymd(), (5311, 7, 11));
}
