//! Study cycles: a contiguous run of dates over which a unit table is
//! completed once.

use serde::Serialize;

use crate::anchor::Anchor;
use crate::date::JewishDate;
use crate::{Error, Result};

/// One pass over a schedule's unit table.
///
/// `iteration` counts cycles from the schedule's origin; it is `None` for
/// perpetual cycles opened by an anchor.
#[derive(Clone, Debug, Serialize, PartialEq, Eq)]
pub struct Cycle {
    pub start: JewishDate,
    pub end: JewishDate,
    pub iteration: Option<u32>,
}

impl Cycle {
    pub fn new(start: JewishDate, end: JewishDate, iteration: Option<u32>) -> Result<Self> {
        if end < start {
            return Err(Error::Configuration(format!(
                "cycle ends ({}) before it starts ({})",
                end, start
            )));
        }
        Ok(Self {
            start,
            end,
            iteration,
        })
    }

    /// The perpetual cycle containing the anchor occurrence at or before `date`
    pub fn from_perpetual_anchor<F>(anchor: &Anchor, cycle_end: F, date: &JewishDate) -> Result<Self>
    where
        F: Fn(&JewishDate, Option<u32>) -> Result<JewishDate>,
    {
        let start = anchor.current_or_previous_occurrence(date)?;
        let end = cycle_end(&start, None)?;
        Self::new(start, end, None)
    }

    /// Walk cycles forward from `origin` until one ends on or after `date`.
    ///
    /// Returns `None` when `date` precedes the origin.
    pub fn from_initiation<F>(origin: &JewishDate, cycle_end: F, date: &JewishDate) -> Result<Option<Self>>
    where
        F: Fn(&JewishDate, Option<u32>) -> Result<JewishDate>,
    {
        if origin > date {
            return Ok(None);
        }

        let mut cycle = Self::new(*origin, cycle_end(origin, Some(1))?, Some(1))?;
        while cycle.end < *date {
            match cycle.next(&cycle_end)? {
                Some(next) => cycle = next,
                None => break,
            }
        }
        tracing::trace!(iteration = ?cycle.iteration, start = %cycle.start, "Resolved cycle");
        Ok(Some(cycle))
    }

    /// The cycle following this one; perpetual cycles have no successor
    pub fn next<F>(&self, cycle_end: F) -> Result<Option<Self>>
    where
        F: Fn(&JewishDate, Option<u32>) -> Result<JewishDate>,
    {
        let Some(iteration) = self.iteration else {
            return Ok(None);
        };
        let iteration = iteration + 1;
        let start = self.end.forward(1)?;
        let end = cycle_end(&start, Some(iteration))?;
        Self::new(start, end, Some(iteration)).map(Some)
    }

    /// Number of days in the cycle, both ends included
    pub fn len_days(&self) -> i64 {
        self.start.days_until(&self.end) + 1
    }

    pub fn contains(&self, date: &JewishDate) -> bool {
        self.start <= *date && *date <= self.end
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(year: i32, month: u8, day: u8) -> JewishDate {
        JewishDate::new(year, month, day).unwrap()
    }

    fn ten_days(start: &JewishDate, _iteration: Option<u32>) -> Result<JewishDate> {
        start.forward(9)
    }

    #[test]
    fn test_from_initiation_before_origin() {
        let origin = date(5778, 7, 1);
        let cycle = Cycle::from_initiation(&origin, ten_days, &date(5777, 6, 29)).unwrap();
        assert!(cycle.is_none());
    }

    #[test]
    fn test_from_initiation_first_cycle() {
        let origin = date(5778, 7, 1);
        let cycle = Cycle::from_initiation(&origin, ten_days, &origin).unwrap().unwrap();
        assert_eq!(cycle.start, origin);
        assert_eq!(cycle.end.ymd(), (5778, 7, 10));
        assert_eq!(cycle.iteration, Some(1));
        assert_eq!(cycle.len_days(), 10);
    }

    #[test]
    fn test_from_initiation_walks_forward() {
        let origin = date(5778, 7, 1);
        let cycle = Cycle::from_initiation(&origin, ten_days, &date(5778, 7, 25)).unwrap().unwrap();
        assert_eq!(cycle.iteration, Some(3));
        assert_eq!(cycle.start.ymd(), (5778, 7, 21));
        assert!(cycle.contains(&date(5778, 7, 25)));
    }

    #[test]
    fn test_end_before_start_is_configuration_error() {
        let origin = date(5778, 7, 10);
        let backwards = |start: &JewishDate, _: Option<u32>| start.back(1);
        let result = Cycle::from_initiation(&origin, backwards, &date(5778, 8, 1));
        assert!(matches!(result, Err(Error::Configuration(_))));
    }

    #[test]
    fn test_perpetual_cycle_has_no_successor() {
        let anchor = Anchor::DayOfMonth(1);
        let cycle = Cycle::from_perpetual_anchor(&anchor, ten_days, &date(5778, 10, 8)).unwrap();
        assert_eq!(cycle.start.ymd(), (5778, 10, 1));
        assert_eq!(cycle.iteration, None);
        assert!(cycle.next(ten_days).unwrap().is_none());
    }
}
