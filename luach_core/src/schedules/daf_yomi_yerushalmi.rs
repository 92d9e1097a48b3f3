//! Daf yomi of the Jerusalem Talmud (Vilna pagination).
//!
//! No page is studied on Tisha b'Av or Yom Kippur; cycles are lengthened
//! by the number of such days they contain.

use chrono::NaiveDate;
use once_cell::sync::Lazy;

use crate::date::JewishDate;
use crate::interval::Interval;
use crate::scheduler::Schedule;
use crate::table::UnitTable;
use crate::unit::Unit;
use crate::Result;

const PAGES: i64 = 1554;

/// (month, day) on which no page is assigned
const SKIP_DAYS: [(u8, u8); 2] = [(5, 9), (7, 10)];

const TRACTATE_PAGES: [(&str, u32); 39] = [
    ("berachos", 68),
    ("peah", 37),
    ("demai", 34),
    ("kilayim", 44),
    ("shviis", 31),
    ("terumos", 59),
    ("maasros", 26),
    ("maaser_sheni", 33),
    ("chalah", 28),
    ("orlah", 20),
    ("bikurim", 13),
    ("shabbos", 92),
    ("eruvin", 65),
    ("pesachim", 71),
    ("beitzah", 22),
    ("rosh_hashanah", 22),
    ("yoma", 42),
    ("sukkah", 26),
    ("taanis", 26),
    ("shekalim", 33),
    ("megilah", 34),
    ("chagigah", 22),
    ("moed_katan", 19),
    ("yevamos", 85),
    ("kesubos", 72),
    ("sotah", 47),
    ("nedarim", 40),
    ("nazir", 47),
    ("gitin", 54),
    ("kiddushin", 48),
    ("bava_kama", 44),
    ("bava_metzia", 37),
    ("bava_basra", 34),
    ("sanhedrin", 44),
    ("makos", 9),
    ("shevuos", 57),
    ("avodah_zarah", 37),
    ("horayos", 19),
    ("niddah", 13),
];

static UNITS: Lazy<UnitTable> = Lazy::new(|| UnitTable::leaves(TRACTATE_PAGES));

fn is_skip_day(date: &JewishDate) -> bool {
    SKIP_DAYS.contains(&(date.month(), date.day()))
}

/// Skip days falling within `from..=to`
fn skip_days_between(from: &JewishDate, to: &JewishDate) -> Result<i64> {
    let mut count = 0;
    for year in from.year()..=to.year() {
        for (month, day) in SKIP_DAYS {
            let skip = JewishDate::new(year, month, day)?;
            if *from <= skip && skip <= *to {
                count += 1;
            }
        }
    }
    Ok(count)
}

#[derive(Clone, Copy, Debug, Default)]
pub struct DafYomiYerushalmi;

impl Schedule for DafYomiYerushalmi {
    fn id(&self) -> &'static str {
        "daf_yomi_yerushalmi"
    }

    fn initial_cycle_date(&self) -> Option<NaiveDate> {
        NaiveDate::from_ymd_opt(1980, 2, 2)
    }

    fn cycle_end(&self, start: &JewishDate, _iteration: Option<u32>) -> Result<JewishDate> {
        let mut end = start.forward(PAGES - 1)?;
        let mut found = skip_days_between(start, &end)?;
        // each extension may itself cover more skip days
        while found > 0 {
            let from = end.forward(1)?;
            end = end.forward(found)?;
            found = skip_days_between(&from, &end)?;
        }
        Ok(end)
    }

    fn default_units(&self) -> UnitTable {
        UNITS.clone()
    }

    fn is_skip_interval(&self, interval: &Interval<'_>) -> bool {
        is_skip_day(&interval.start)
    }

    fn skip_unit(&self) -> Option<Unit> {
        Some(Unit::name("no_daf_today"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scheduler::limud;

    fn on(year: i32, month: u32, day: u32) -> Option<String> {
        let civil = NaiveDate::from_ymd_opt(year, month, day).unwrap();
        let date = JewishDate::from_civil(civil).unwrap();
        limud(&DafYomiYerushalmi, &date).unwrap().map(|l| l.description())
    }

    #[test]
    fn test_simple_date() {
        assert_eq!(on(2017, 12, 28).as_deref(), Some("bava_metzia 33"));
    }

    #[test]
    fn test_before_first_cycle() {
        assert_eq!(on(1980, 1, 1), None);
    }

    #[test]
    fn test_cycle_boundaries() {
        assert_eq!(on(2005, 10, 3).as_deref(), Some("berachos 1"));
        assert_eq!(on(2010, 1, 12).as_deref(), Some("niddah 13"));
    }

    #[test]
    fn test_skip_day() {
        let date = JewishDate::new(5778, 7, 10).unwrap();
        let limud = limud(&DafYomiYerushalmi, &date).unwrap().unwrap();
        assert_eq!(limud.description(), "no_daf_today");
        assert_eq!(limud.start, date);
        assert_eq!(limud.end, date);
    }

    #[test]
    fn test_skip_days_do_not_consume_pages() {
        let before = limud(&DafYomiYerushalmi, &JewishDate::new(5778, 7, 9).unwrap())
            .unwrap()
            .unwrap();
        let after = limud(&DafYomiYerushalmi, &JewishDate::new(5778, 7, 11).unwrap())
            .unwrap()
            .unwrap();
        assert_eq!(after.iteration, before.iteration + 1);
    }
}
