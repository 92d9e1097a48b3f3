//! Pirkei Avos on summer Shabbos afternoons.
//!
//! Chapters 1-6 are read weekly from the Shabbos after Pesach until the
//! last Shabbos before Rosh Hashana, four times over. Summers too short for
//! four rounds read two chapters a week at the end.

use crate::anchor::Anchor;
use crate::cycle::Cycle;
use crate::date::JewishDate;
use crate::interval::Interval;
use crate::scheduler::Schedule;
use crate::table::UnitTable;
use crate::types::Month;
use crate::unit::{Segment, Unit};
use crate::Result;

const CHAPTERS: u32 = 6;
const ROUNDS: usize = 4;

fn chapters() -> Vec<u32> {
    (0..ROUNDS).flat_map(|_| 1..=CHAPTERS).collect()
}

#[derive(Clone, Copy, Debug, Default)]
pub struct PirkeiAvos {
    pub in_israel: bool,
}

impl PirkeiAvos {
    pub fn new(in_israel: bool) -> Self {
        Self { in_israel }
    }
}

impl Schedule for PirkeiAvos {
    fn id(&self) -> &'static str {
        "pirkei_avos"
    }

    /// The day after Pesach
    fn perpetual_anchor(&self) -> Option<Anchor> {
        let day = if self.in_israel { 22 } else { 23 };
        Some(Anchor::DayOfYear {
            month: Month::Nissan.number(),
            day,
        })
    }

    fn tiered(&self) -> bool {
        false
    }

    /// The last Shabbos before Rosh Hashana
    fn cycle_end(&self, start: &JewishDate, _iteration: Option<u32>) -> Result<JewishDate> {
        let rosh_hashana = JewishDate::new(start.year() + 1, Month::Tishrei.number(), 1)?;
        rosh_hashana.back(i64::from(rosh_hashana.day_of_week()))
    }

    fn interval_end(&self, _cycle: &Cycle, start: &JewishDate) -> Result<JewishDate> {
        start.forward(7 - i64::from(start.day_of_week()))
    }

    /// Outside Israel the second day of Shavuos can fall on Shabbos
    fn is_skip_interval(&self, interval: &Interval<'_>) -> bool {
        !self.in_israel && (interval.end.month(), interval.end.day()) == (Month::Sivan.number(), 7)
    }

    fn default_units(&self) -> UnitTable {
        UnitTable::Flat(chapters().into_iter().map(Unit::number).collect())
    }

    fn cycle_units(&self, cycle: &Cycle) -> UnitTable {
        let chapters = chapters();
        let mut weeks = (cycle.len_days() + 6) / 7;
        // a Friday start outside Israel puts the second day of Shavuos on Shabbos
        if !self.in_israel && cycle.start.day_of_week() == 6 {
            weeks -= 1;
        }

        let count = chapters.len();
        let compressed = ((count as i64 - weeks) * 2).clamp(0, count as i64) as usize;
        let (single, paired) = chapters.split_at(count - compressed);

        let mut units: Vec<Unit> = single.iter().copied().map(Unit::number).collect();
        units.extend(paired.chunks(2).map(|pair| match pair {
            [first, second] => Unit::span(vec![Segment::Number(*first)], vec![Segment::Number(*second)]),
            _ => Unit::number(pair[0]),
        }));
        UnitTable::Flat(units)
    }
}
