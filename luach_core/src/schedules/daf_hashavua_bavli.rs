//! Daf hashavua: one Talmud page a week, each week ending on Shabbos.

use chrono::NaiveDate;

use super::daf_yomi_bavli::first_page;
use crate::cycle::Cycle;
use crate::date::JewishDate;
use crate::scheduler::Schedule;
use crate::table::UnitTable;
use crate::unit::Segment;
use crate::Result;

const PAGES: i64 = 2711;

#[derive(Clone, Copy, Debug, Default)]
pub struct DafHashavuaBavli;

impl Schedule for DafHashavuaBavli {
    fn id(&self) -> &'static str {
        "daf_hashavua_bavli"
    }

    fn initial_cycle_date(&self) -> Option<NaiveDate> {
        NaiveDate::from_ymd_opt(2005, 3, 2)
    }

    fn starting_position(&self, segment: &Segment) -> u32 {
        first_page(segment)
    }

    /// The first week may be partial
    fn cycle_end(&self, start: &JewishDate, _iteration: Option<u32>) -> Result<JewishDate> {
        start.forward(PAGES * 7 - i64::from(start.day_of_week()))
    }

    fn interval_end(&self, _cycle: &Cycle, start: &JewishDate) -> Result<JewishDate> {
        start.forward(7 - i64::from(start.day_of_week()))
    }

    fn default_units(&self) -> UnitTable {
        super::daf_yomi_bavli::DafYomiBavli.default_units()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scheduler::limud;

    fn date(year: i32, month: u32, day: u32) -> JewishDate {
        JewishDate::from_civil(NaiveDate::from_ymd_opt(year, month, day).unwrap()).unwrap()
    }

    #[test]
    fn test_simple_date() {
        let target = date(2018, 10, 10);
        let limud = limud(&DafHashavuaBavli, &target).unwrap().unwrap();
        assert_eq!(limud.description(), "megillah 3");
        assert_eq!(limud.start, target.back(3).unwrap());
        assert_eq!(limud.end, target.forward(3).unwrap());
        assert_eq!(limud.end.day_of_week(), 7);
    }

    #[test]
    fn test_before_first_cycle() {
        assert!(limud(&DafHashavuaBavli, &date(2005, 3, 1)).unwrap().is_none());
    }

    #[test]
    fn test_cycle_boundaries() {
        let first = limud(&DafHashavuaBavli, &date(2057, 2, 11)).unwrap().unwrap();
        assert_eq!(first.description(), "berachos 2");
        let last = limud(&DafHashavuaBavli, &date(2057, 2, 10)).unwrap().unwrap();
        assert_eq!(last.description(), "niddah 73");
    }
}
