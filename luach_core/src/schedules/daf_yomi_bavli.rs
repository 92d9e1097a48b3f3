//! Daf yomi: one page of the Babylonian Talmud a day.

use chrono::NaiveDate;
use once_cell::sync::Lazy;

use crate::cycle::Cycle;
use crate::date::JewishDate;
use crate::scheduler::Schedule;
use crate::table::UnitTable;
use crate::unit::Segment;
use crate::Result;

/// Tractates with their last page
pub(crate) const TRACTATE_PAGES: [(&str, u32); 40] = [
    ("berachos", 64),
    ("shabbos", 157),
    ("eruvin", 105),
    ("pesachim", 121),
    ("shekalim", 22),
    ("yoma", 88),
    ("sukkah", 56),
    ("beitzah", 40),
    ("rosh_hashanah", 35),
    ("taanis", 31),
    ("megillah", 32),
    ("moed_katan", 29),
    ("chagigah", 27),
    ("yevamos", 122),
    ("kesubos", 112),
    ("nedarim", 91),
    ("nazir", 66),
    ("sotah", 49),
    ("gitin", 90),
    ("kiddushin", 82),
    ("bava_kamma", 119),
    ("bava_metzia", 119),
    ("bava_basra", 176),
    ("sanhedrin", 113),
    ("makkos", 24),
    ("shevuos", 49),
    ("avodah_zarah", 76),
    ("horiyos", 14),
    ("zevachim", 120),
    ("menachos", 110),
    ("chullin", 142),
    ("bechoros", 61),
    ("arachin", 34),
    ("temurah", 34),
    ("kerisos", 28),
    ("meilah", 22),
    ("kinnim", 25),
    ("tamid", 33),
    ("midos", 37),
    ("niddah", 73),
];

/// Cycles up to this one studied the shorter Yerushalmi shekalim
const LAST_SHORT_SHEKALIM_CYCLE: u32 = 7;

static UNITS: Lazy<UnitTable> = Lazy::new(|| UnitTable::leaves(TRACTATE_PAGES));

/// First page of a tractate; the Talmud starts at page 2 except for the
/// tractates printed as a continuation of another.
pub(crate) fn first_page(segment: &Segment) -> u32 {
    match segment {
        Segment::Name(name) => match name.as_str() {
            "kinnim" => 23,
            "tamid" => 26,
            "midos" => 34,
            _ => 2,
        },
        _ => 2,
    }
}

#[derive(Clone, Copy, Debug, Default)]
pub struct DafYomiBavli;

impl Schedule for DafYomiBavli {
    fn id(&self) -> &'static str {
        "daf_yomi_bavli"
    }

    fn initial_cycle_date(&self) -> Option<NaiveDate> {
        NaiveDate::from_ymd_opt(1923, 9, 11)
    }

    fn starting_position(&self, segment: &Segment) -> u32 {
        first_page(segment)
    }

    fn cycle_end(&self, start: &JewishDate, iteration: Option<u32>) -> Result<JewishDate> {
        let days = match iteration {
            Some(i) if i <= LAST_SHORT_SHEKALIM_CYCLE => 2702,
            _ => 2711,
        };
        start.forward(days - 1)
    }

    fn default_units(&self) -> UnitTable {
        UNITS.clone()
    }

    fn cycle_units(&self, cycle: &Cycle) -> UnitTable {
        match cycle.iteration {
            Some(i) if i <= LAST_SHORT_SHEKALIM_CYCLE => self.default_units().with_leaf("shekalim", 13),
            _ => self.default_units(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scheduler::limud;

    fn on(year: i32, month: u32, day: u32) -> Option<String> {
        let civil = NaiveDate::from_ymd_opt(year, month, day).unwrap();
        let date = JewishDate::from_civil(civil).unwrap();
        limud(&DafYomiBavli, &date).unwrap().map(|l| l.description())
    }

    #[test]
    fn test_simple_date() {
        assert_eq!(on(2017, 12, 28).as_deref(), Some("shevuos 30"));
    }

    #[test]
    fn test_before_first_cycle() {
        assert_eq!(on(1920, 1, 1), None);
    }

    #[test]
    fn test_cycle_boundaries() {
        assert_eq!(on(2012, 8, 3).as_deref(), Some("berachos 2"));
        assert_eq!(on(2020, 1, 4).as_deref(), Some("niddah 73"));
    }

    #[test]
    fn test_short_shekalim_in_early_cycles() {
        assert_eq!(on(1969, 4, 28).as_deref(), Some("shekalim 13"));
        assert_eq!(on(1969, 4, 29).as_deref(), Some("yoma 2"));
    }

    #[test]
    fn test_tractates_with_late_first_pages() {
        assert_eq!(on(2019, 10, 9).as_deref(), Some("meilah 22"));
        assert_eq!(on(2019, 10, 10).as_deref(), Some("kinnim 23"));
        assert_eq!(on(2019, 10, 13).as_deref(), Some("tamid 26"));
        assert_eq!(on(2019, 10, 22).as_deref(), Some("midos 35"));
        assert_eq!(on(2019, 10, 25).as_deref(), Some("niddah 2"));
    }

    #[test]
    fn test_cycle_metadata() {
        let date = JewishDate::from_civil(NaiveDate::from_ymd_opt(2017, 12, 28).unwrap()).unwrap();
        let limud = limud(&DafYomiBavli, &date).unwrap().unwrap();
        assert_eq!(limud.cycle_iteration(), Some(13));
        assert_eq!(limud.cycle_start().civil(), NaiveDate::from_ymd_opt(2012, 8, 3).unwrap());
        assert_eq!(limud.start, limud.end);
    }
}
