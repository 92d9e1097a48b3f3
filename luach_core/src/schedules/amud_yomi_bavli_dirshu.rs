//! Amud yomi (Dirshu): one side of a Talmud page a day.

use chrono::NaiveDate;
use once_cell::sync::Lazy;

use super::daf_yomi_bavli::TRACTATE_PAGES;
use crate::date::JewishDate;
use crate::scheduler::Schedule;
use crate::table::{UnitStep, UnitTable};
use crate::unit::Segment;
use crate::Result;

const SIDES: &[&str] = &["a", "b"];

const CYCLE_DAYS: i64 = 5406;

/// Tractates (by position) whose last page ends on side "a"
const ENDS_ON_FIRST_SIDE: [usize; 18] = [0, 2, 5, 8, 9, 10, 11, 12, 21, 27, 29, 30, 31, 32, 33, 35, 36, 39];

static UNITS: Lazy<UnitTable> = Lazy::new(|| {
    UnitTable::leaves(TRACTATE_PAGES.iter().enumerate().map(|(i, (name, last))| {
        let side = if ENDS_ON_FIRST_SIDE.contains(&i) { 0 } else { 1 };
        (*name, last * 2 + side)
    }))
});

#[derive(Clone, Copy, Debug, Default)]
pub struct AmudYomiBavliDirshu;

impl Schedule for AmudYomiBavliDirshu {
    fn id(&self) -> &'static str {
        "amud_yomi_bavli_dirshu"
    }

    fn initial_cycle_date(&self) -> Option<NaiveDate> {
        NaiveDate::from_ymd_opt(2023, 10, 16)
    }

    fn unit_step(&self) -> UnitStep {
        UnitStep::Fraction { labels: SIDES }
    }

    /// Positions count sides: page `p` side "a" is `2p`, side "b" `2p + 1`
    fn starting_position(&self, segment: &Segment) -> u32 {
        match segment {
            Segment::Name(name) => match name.as_str() {
                "kinnim" => 22 * 2 + 1,
                "tamid" => 25 * 2 + 1,
                "midos" => 34 * 2,
                _ => 2 * 2,
            },
            _ => 2 * 2,
        }
    }

    fn cycle_end(&self, start: &JewishDate, _iteration: Option<u32>) -> Result<JewishDate> {
        start.forward(CYCLE_DAYS - 1)
    }

    fn default_units(&self) -> UnitTable {
        UNITS.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scheduler::limud;

    fn on(year: i32, month: u32, day: u32) -> Option<String> {
        let civil = NaiveDate::from_ymd_opt(year, month, day).unwrap();
        let date = JewishDate::from_civil(civil).unwrap();
        limud(&AmudYomiBavliDirshu, &date).unwrap().map(|l| l.description())
    }

    #[test]
    fn test_table_covers_cycle() {
        let schedule = AmudYomiBavliDirshu;
        let total = schedule
            .default_units()
            .total_positions(|segment| schedule.starting_position(segment));
        assert_eq!(i64::from(total), CYCLE_DAYS);
    }

    #[test]
    fn test_simple_date() {
        assert_eq!(on(2024, 5, 30).as_deref(), Some("shabbos 53a"));
    }

    #[test]
    fn test_before_first_cycle() {
        assert_eq!(on(2023, 1, 1), None);
    }

    #[test]
    fn test_cycle_boundaries() {
        assert_eq!(on(2038, 8, 4).as_deref(), Some("berachos 2a"));
        assert_eq!(on(2038, 8, 3).as_deref(), Some("niddah 73a"));
    }

    #[test]
    fn test_tractates_starting_mid_page() {
        assert_eq!(on(2038, 2, 10).as_deref(), Some("meilah 22a"));
        assert_eq!(on(2038, 2, 11).as_deref(), Some("kinnim 22b"));
        assert_eq!(on(2038, 2, 16).as_deref(), Some("kinnim 25a"));
        assert_eq!(on(2038, 2, 17).as_deref(), Some("tamid 25b"));
        assert_eq!(on(2038, 3, 5).as_deref(), Some("tamid 33b"));
        assert_eq!(on(2038, 3, 6).as_deref(), Some("midos 34a"));
        assert_eq!(on(2038, 3, 13).as_deref(), Some("midos 37b"));
        assert_eq!(on(2038, 3, 14).as_deref(), Some("niddah 2a"));
    }
}
