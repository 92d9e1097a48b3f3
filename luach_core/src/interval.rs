//! Intervals: the dated slices of a cycle, each assigned one unit.

use crate::cycle::Cycle;
use crate::date::JewishDate;
use crate::{Error, Result};

/// A run of days inside a cycle. `iteration` is the 1-based index of the
/// unit it studies; skipped intervals share the iteration of their successor.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Interval<'c> {
    pub start: JewishDate,
    pub end: JewishDate,
    pub iteration: u32,
    pub cycle: &'c Cycle,
}

impl<'c> Interval<'c> {
    /// The interval opening `cycle`
    pub fn first<F>(cycle: &'c Cycle, interval_end: F) -> Result<Self>
    where
        F: Fn(&Cycle, &JewishDate) -> Result<JewishDate>,
    {
        Self::build(cycle, cycle.start, 1, &interval_end)
    }

    /// The following interval, studying the next unit
    pub fn next<F>(&self, interval_end: F) -> Result<Option<Self>>
    where
        F: Fn(&Cycle, &JewishDate) -> Result<JewishDate>,
    {
        self.following(self.iteration + 1, &interval_end)
    }

    /// The following interval, keeping the current unit index
    pub fn skip<F>(&self, interval_end: F) -> Result<Option<Self>>
    where
        F: Fn(&Cycle, &JewishDate) -> Result<JewishDate>,
    {
        self.following(self.iteration, &interval_end)
    }

    pub fn contains(&self, date: &JewishDate) -> bool {
        self.start <= *date && *date <= self.end
    }

    fn following<F>(&self, iteration: u32, interval_end: &F) -> Result<Option<Self>>
    where
        F: Fn(&Cycle, &JewishDate) -> Result<JewishDate>,
    {
        if self.end >= self.cycle.end {
            return Ok(None);
        }
        let start = self.end.forward(1)?;
        Self::build(self.cycle, start, iteration, interval_end).map(Some)
    }

    fn build<F>(cycle: &'c Cycle, start: JewishDate, iteration: u32, interval_end: &F) -> Result<Self>
    where
        F: Fn(&Cycle, &JewishDate) -> Result<JewishDate>,
    {
        // an interval never runs past its cycle
        let end = interval_end(cycle, &start)?.min(cycle.end);
        if end < start {
            return Err(Error::Configuration(format!(
                "interval {} ends ({}) before it starts ({})",
                iteration, end, start
            )));
        }
        Ok(Self {
            start,
            end,
            iteration,
            cycle,
        })
    }
}
