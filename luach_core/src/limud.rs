//! The result of a schedule lookup.

use serde::Serialize;

use crate::cycle::Cycle;
use crate::date::JewishDate;
use crate::interval::Interval;
use crate::unit::{Segment, Unit};

/// What is studied on a date: the interval containing it and its unit.
///
/// `unit` is `None` on intervals with nothing assigned (a skipped week, or
/// an interval past the end of the unit table).
#[derive(Clone, Debug, Serialize, PartialEq, Eq)]
pub struct Limud {
    pub start: JewishDate,
    pub end: JewishDate,
    pub iteration: u32,
    pub cycle: Cycle,
    pub unit: Option<Unit>,
}

impl Limud {
    pub fn new(interval: &Interval<'_>, unit: Option<Unit>) -> Self {
        Self {
            start: interval.start,
            end: interval.end,
            iteration: interval.iteration,
            cycle: interval.cycle.clone(),
            unit,
        }
    }

    /// The unit rendered with its segments as-is, or "" when there is none
    pub fn description(&self) -> String {
        self.unit
            .as_ref()
            .map(|unit| unit.to_string())
            .unwrap_or_default()
    }

    /// The unit rendered with a custom segment formatter
    pub fn render<F>(&self, label: F) -> String
    where
        F: Fn(&Segment) -> String,
    {
        self.unit
            .as_ref()
            .map(|unit| unit.render(label))
            .unwrap_or_default()
    }

    /// Drop the unit, keeping the dates
    pub fn clear(&mut self) {
        self.unit = None;
    }

    pub fn cycle_start(&self) -> JewishDate {
        self.cycle.start
    }

    pub fn cycle_end(&self) -> JewishDate {
        self.cycle.end
    }

    pub fn cycle_iteration(&self) -> Option<u32> {
        self.cycle.iteration
    }
}
