//! The book of Tehillim once a month.

use crate::anchor::Anchor;
use crate::date::JewishDate;
use crate::interval::Interval;
use crate::scheduler::Schedule;
use crate::table::UnitTable;
use crate::unit::{Segment, Unit};
use crate::Result;

/// Last psalm read on each day of the month
const LAST_PSALM: [u32; 30] = [
    9, 17, 22, 28, 34, 38, 43, 48, 54, 59, 65, 68, 71, 76, 78, 82, 87, 89, 96, 103, 105, 107, 112,
    118, 119, 119, 134, 139, 144, 150,
];

/// Psalm 119 is split between days 25 and 26 by verse
const LONG_PSALM: u32 = 119;

#[derive(Clone, Copy, Debug, Default)]
pub struct TehillimMonthly;

impl Schedule for TehillimMonthly {
    fn id(&self) -> &'static str {
        "tehillim_monthly"
    }

    fn perpetual_anchor(&self) -> Option<Anchor> {
        Some(Anchor::DayOfMonth(1))
    }

    fn tiered(&self) -> bool {
        false
    }

    fn cycle_end(&self, start: &JewishDate, _iteration: Option<u32>) -> Result<JewishDate> {
        Anchor::DayOfMonth(1).next_occurrence(start)?.back(1)
    }

    fn default_units(&self) -> UnitTable {
        UnitTable::Flat(LAST_PSALM.iter().copied().map(Unit::number).collect())
    }

    fn unit_for_interval(&self, _units: &UnitTable, interval: &Interval<'_>) -> Option<Unit> {
        let day = interval.iteration as usize;
        let (first, mut last) = match day {
            1 => (vec![Segment::Number(1)], LAST_PSALM[0]),
            25 => {
                return Some(Unit::span(
                    vec![Segment::Number(LONG_PSALM), Segment::Number(1)],
                    vec![Segment::Number(LONG_PSALM), Segment::Number(30)],
                ))
            }
            26 => {
                return Some(Unit::span(
                    vec![Segment::Number(LONG_PSALM), Segment::Number(40)],
                    vec![Segment::Number(LONG_PSALM), Segment::Number(400)],
                ))
            }
            2..=30 => (vec![Segment::Number(LAST_PSALM[day - 2] + 1)], LAST_PSALM[day - 1]),
            _ => return None,
        };

        // a 29-day month finishes the book on its last day
        if interval.end.day() == 29 && interval.end.days_in_month() == 29 {
            last = *LAST_PSALM.last()?;
        }
        Some(Unit::span(first, vec![Segment::Number(last)]))
    }
}
