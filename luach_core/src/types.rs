//! Core calendar vocabulary.
//!
//! This module defines the named values shared by the calendar engine and
//! the schedules built on it:
//! - Months, numbered from Nissan as the calendar counts them
//! - The Cheshvan/Kislev length pattern of a year
//! - The year "kviah" triple used to pick weekly readings

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::{Error, Result};

// ============================================================================
// Months
// ============================================================================

/// A month of the luni-solar year. Discriminants match the month numbers.
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum Month {
    Nissan = 1,
    Iyar = 2,
    Sivan = 3,
    Tammuz = 4,
    Av = 5,
    Elul = 6,
    Tishrei = 7,
    Cheshvan = 8,
    Kislev = 9,
    Teves = 10,
    Shevat = 11,
    Adar = 12,
    AdarIi = 13,
}

impl Month {
    /// All months in numeric (Nissan-first) order
    pub const ALL: [Month; 13] = [
        Month::Nissan,
        Month::Iyar,
        Month::Sivan,
        Month::Tammuz,
        Month::Av,
        Month::Elul,
        Month::Tishrei,
        Month::Cheshvan,
        Month::Kislev,
        Month::Teves,
        Month::Shevat,
        Month::Adar,
        Month::AdarIi,
    ];

    /// Look up a month by number (1 = Nissan .. 13 = Adar II)
    pub fn from_number(number: u8) -> Result<Self> {
        Self::ALL
            .get(usize::from(number).wrapping_sub(1))
            .copied()
            .ok_or_else(|| Error::InvalidDate(format!("invalid month number {}", number)))
    }

    /// Look up a month by its transliterated name (e.g. "cheshvan")
    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.iter().copied().find(|m| m.name() == name)
    }

    pub fn number(self) -> u8 {
        self as u8
    }

    pub fn name(self) -> &'static str {
        match self {
            Month::Nissan => "nissan",
            Month::Iyar => "iyar",
            Month::Sivan => "sivan",
            Month::Tammuz => "tammuz",
            Month::Av => "av",
            Month::Elul => "elul",
            Month::Tishrei => "tishrei",
            Month::Cheshvan => "cheshvan",
            Month::Kislev => "kislev",
            Month::Teves => "teves",
            Month::Shevat => "shevat",
            Month::Adar => "adar",
            Month::AdarIi => "adar_ii",
        }
    }
}

impl fmt::Display for Month {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

// ============================================================================
// Year types
// ============================================================================

/// Length pattern of the Cheshvan/Kislev pair
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum Kviah {
    /// Both months have 29 days
    Chaseirim,
    /// Cheshvan 29, Kislev 30
    Kesidran,
    /// Both months have 30 days
    Shelaimim,
}

impl fmt::Display for Kviah {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Kviah::Chaseirim => "chaseirim",
            Kviah::Kesidran => "kesidran",
            Kviah::Shelaimim => "shelaimim",
        };
        f.write_str(name)
    }
}

/// Weekday of Rosh Hashana, the Cheshvan/Kislev pattern and the weekday of
/// Pesach; together they determine the shape of a year.
#[derive(Clone, Copy, Debug, Serialize, PartialEq, Eq, Hash)]
pub struct YearKviah {
    pub rosh_hashana: u8,
    pub cheshvan_kislev: Kviah,
    pub pesach: u8,
}
