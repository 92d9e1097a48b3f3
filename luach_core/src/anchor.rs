//! Recurring dates that open perpetual cycles.

use serde::{Deserialize, Serialize};

use crate::date::JewishDate;
use crate::types::Month;
use crate::Result;

/// A date pattern that recurs every month or every year
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum Anchor {
    /// The given day of every month
    DayOfMonth(u8),
    /// The given (month, day) of every year
    DayOfYear { month: u8, day: u8 },
}

impl Anchor {
    /// First occurrence strictly after `date`
    pub fn next_occurrence(&self, date: &JewishDate) -> Result<JewishDate> {
        let occurrence = self.candidate(date)?;
        if occurrence <= *date {
            self.advance(&occurrence)
        } else {
            Ok(occurrence)
        }
    }

    /// Last occurrence strictly before `date`
    pub fn previous_occurrence(&self, date: &JewishDate) -> Result<JewishDate> {
        let occurrence = self.candidate(date)?;
        if occurrence >= *date {
            self.retreat(&occurrence)
        } else {
            Ok(occurrence)
        }
    }

    /// `date` itself if it is an occurrence, else the last one before it
    pub fn current_or_previous_occurrence(&self, date: &JewishDate) -> Result<JewishDate> {
        let occurrence = self.candidate(date)?;
        if occurrence > *date {
            self.retreat(&occurrence)
        } else {
            Ok(occurrence)
        }
    }

    /// The occurrence in the same month (or year) as `date`
    fn candidate(&self, date: &JewishDate) -> Result<JewishDate> {
        match *self {
            Anchor::DayOfMonth(day) => JewishDate::clamped(date.year(), date.month(), day),
            Anchor::DayOfYear { month, day } => JewishDate::clamped(date.year(), month, day),
        }
    }

    fn advance(&self, occurrence: &JewishDate) -> Result<JewishDate> {
        match self {
            Anchor::DayOfMonth(_) => {
                let month = occurrence.month();
                if month == occurrence.months_in_year() {
                    occurrence.with_month(Month::Nissan.number())
                } else if month == Month::Elul.number() {
                    // Elul always has 29 days; this lands in next year's Tishrei
                    occurrence.forward(29)
                } else {
                    occurrence.with_month(month + 1)
                }
            }
            Anchor::DayOfYear { .. } => occurrence.with_year(occurrence.year() + 1),
        }
    }

    fn retreat(&self, occurrence: &JewishDate) -> Result<JewishDate> {
        match self {
            Anchor::DayOfMonth(_) => {
                let month = occurrence.month();
                if month == Month::Nissan.number() {
                    occurrence.with_month(occurrence.months_in_year())
                } else if month == Month::Tishrei.number() {
                    let days = if occurrence.day() == 30 { 30 } else { 29 };
                    occurrence.back(days)
                } else {
                    occurrence.with_month(month - 1)
                }
            }
            Anchor::DayOfYear { .. } => occurrence.with_year(occurrence.year() - 1),
        }
    }
}
