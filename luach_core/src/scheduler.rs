//! The schedule contract and the lookup that drives it.
//!
//! A [`Schedule`] describes a study program: where its cycles start, how
//! long cycles and intervals run, and which units fill them. [`limud`]
//! finds the cycle containing a date, walks its intervals to the one
//! holding the date and resolves that interval's unit.

use chrono::NaiveDate;

use crate::anchor::Anchor;
use crate::cycle::Cycle;
use crate::date::JewishDate;
use crate::interval::Interval;
use crate::limud::Limud;
use crate::table::{resolve_tiered, UnitStep, UnitTable};
use crate::unit::{Segment, Unit};
use crate::{Error, Result};

/// A study program. Implement either `initial_cycle_date` (cycles run
/// back-to-back from an origin) or `perpetual_anchor` (a cycle opens at
/// each anchor occurrence); everything else has a default.
pub trait Schedule {
    /// Stable identifier, used in logs and on the command line
    fn id(&self) -> &'static str;

    /// Civil date on which the first cycle started
    fn initial_cycle_date(&self) -> Option<NaiveDate> {
        None
    }

    fn perpetual_anchor(&self) -> Option<Anchor> {
        None
    }

    fn unit_step(&self) -> UnitStep {
        UnitStep::Whole(1)
    }

    /// Whether units are addressed by offset through a tiered table
    fn tiered(&self) -> bool {
        true
    }

    /// First position (in sub-units) of a leaf; one whole unit by default
    fn starting_position(&self, _segment: &Segment) -> u32 {
        self.unit_step().scale()
    }

    /// Last day of the cycle starting on `start`
    fn cycle_end(&self, start: &JewishDate, _iteration: Option<u32>) -> Result<JewishDate> {
        Ok(*start)
    }

    /// Last day of the interval starting on `start`; daily by default
    fn interval_end(&self, _cycle: &Cycle, start: &JewishDate) -> Result<JewishDate> {
        Ok(*start)
    }

    fn default_units(&self) -> UnitTable;

    /// Units for a particular cycle, when they vary between cycles
    fn cycle_units(&self, _cycle: &Cycle) -> UnitTable {
        self.default_units()
    }

    /// Skipped intervals do not advance through the units
    fn is_skip_interval(&self, _interval: &Interval<'_>) -> bool {
        false
    }

    fn skip_unit(&self) -> Option<Unit> {
        None
    }

    fn unit_for_interval(&self, units: &UnitTable, interval: &Interval<'_>) -> Option<Unit> {
        if self.is_skip_interval(interval) {
            return self.skip_unit();
        }
        match (self.tiered(), units) {
            (true, UnitTable::Tiered(entries)) => {
                resolve_tiered(entries, self.unit_step(), interval.iteration, |segment| {
                    self.starting_position(segment)
                })
            }
            (false, UnitTable::Flat(list)) => (interval.iteration as usize)
                .checked_sub(1)
                .and_then(|i| list.get(i))
                .cloned(),
            _ => {
                tracing::warn!(
                    schedule = self.id(),
                    tiered = self.tiered(),
                    "Unit table shape does not match the schedule"
                );
                None
            }
        }
    }
}

/// Find what `schedule` assigns to `date`.
///
/// Returns `Ok(None)` when the date precedes the schedule's origin, or falls
/// outside every perpetual cycle (e.g. between seasonal cycles).
pub fn limud<S: Schedule + ?Sized>(schedule: &S, date: &JewishDate) -> Result<Option<Limud>> {
    let cycle_end =
        |start: &JewishDate, iteration: Option<u32>| schedule.cycle_end(start, iteration);
    let interval_end = |cycle: &Cycle, start: &JewishDate| schedule.interval_end(cycle, start);

    let cycle = if let Some(origin) = schedule.initial_cycle_date() {
        let origin = JewishDate::from_civil(origin)?;
        match Cycle::from_initiation(&origin, cycle_end, date)? {
            Some(cycle) => cycle,
            None => {
                tracing::debug!(schedule = schedule.id(), %date, "Date precedes the first cycle");
                return Ok(None);
            }
        }
    } else if let Some(anchor) = schedule.perpetual_anchor() {
        Cycle::from_perpetual_anchor(&anchor, cycle_end, date)?
    } else {
        return Err(Error::Configuration(format!(
            "schedule {} has neither an initial cycle date nor an anchor",
            schedule.id()
        )));
    };

    if cycle.end < *date {
        if cycle.iteration.is_none() {
            tracing::debug!(schedule = schedule.id(), %date, cycle_end = %cycle.end, "Date falls between seasonal cycles");
            return Ok(None);
        }
        return Err(Error::Configuration(format!(
            "schedule {} resolved a cycle ending {} for {}",
            schedule.id(),
            cycle.end,
            date
        )));
    }
    tracing::debug!(
        schedule = schedule.id(),
        iteration = ?cycle.iteration,
        start = %cycle.start,
        end = %cycle.end,
        "Found cycle"
    );

    let units = schedule.cycle_units(&cycle);
    let mut interval = Interval::first(&cycle, interval_end)?;
    while !interval.contains(date) {
        let following = if schedule.is_skip_interval(&interval) {
            interval.skip(interval_end)?
        } else {
            interval.next(interval_end)?
        };
        interval = following.ok_or_else(|| {
            Error::Configuration(format!(
                "schedule {} ran out of intervals before {}",
                schedule.id(),
                date
            ))
        })?;
    }
    tracing::trace!(
        schedule = schedule.id(),
        iteration = interval.iteration,
        start = %interval.start,
        end = %interval.end,
        "Found interval"
    );

    let unit = schedule.unit_for_interval(&units, &interval);
    Ok(Some(Limud::new(&interval, unit)))
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Ten daily units in a ten-day cycle starting 1 Tishrei 5778
    struct Countdown;

    impl Schedule for Countdown {
        fn id(&self) -> &'static str {
            "countdown"
        }

        fn initial_cycle_date(&self) -> Option<NaiveDate> {
            JewishDate::new(5778, 7, 1).ok().map(|d| d.civil())
        }

        fn cycle_end(&self, start: &JewishDate, _: Option<u32>) -> Result<JewishDate> {
            start.forward(9)
        }

        fn default_units(&self) -> UnitTable {
            UnitTable::leaves([("countdown", 10)])
        }
    }

    /// Schedule with no origin and no anchor
    struct Unanchored;

    impl Schedule for Unanchored {
        fn id(&self) -> &'static str {
            "unanchored"
        }

        fn default_units(&self) -> UnitTable {
            UnitTable::names(&["only"])
        }
    }

    /// Tiered flag disagrees with the table
    struct Mismatched;

    impl Schedule for Mismatched {
        fn id(&self) -> &'static str {
            "mismatched"
        }

        fn perpetual_anchor(&self) -> Option<Anchor> {
            Some(Anchor::DayOfMonth(1))
        }

        fn default_units(&self) -> UnitTable {
            UnitTable::names(&["only"])
        }
    }

    fn date(year: i32, month: u8, day: u8) -> JewishDate {
        JewishDate::new(year, month, day).unwrap()
    }

    #[test]
    fn test_walks_cycles_and_intervals() {
        let limud = limud(&Countdown, &date(5778, 7, 14)).unwrap().unwrap();
        assert_eq!(limud.cycle_iteration(), Some(2));
        assert_eq!(limud.iteration, 4);
        assert_eq!(limud.description(), "countdown 4");
        assert_eq!(limud.start, limud.end);
    }

    #[test]
    fn test_before_origin_is_none() {
        assert!(limud(&Countdown, &date(5777, 6, 29)).unwrap().is_none());
    }

    #[test]
    fn test_missing_origin_and_anchor_is_configuration_error() {
        let result = limud(&Unanchored, &date(5778, 7, 1));
        assert!(matches!(result, Err(Error::Configuration(_))));
    }

    #[test]
    fn test_mismatched_table_yields_no_unit() {
        let limud = limud(&Mismatched, &date(5778, 7, 1)).unwrap().unwrap();
        assert!(limud.unit.is_none());
        assert_eq!(limud.description(), "");
    }

    #[test]
    fn test_works_through_trait_objects() {
        let schedule: Box<dyn Schedule> = Box::new(Countdown);
        let limud = limud(schedule.as_ref(), &date(5778, 7, 1)).unwrap().unwrap();
        assert_eq!(limud.description(), "countdown 1");
    }
}
