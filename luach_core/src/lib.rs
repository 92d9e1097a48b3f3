#![forbid(unsafe_code)]

//! Luni-solar calendar engine and study-cycle scheduler.
//!
//! This crate provides:
//! - Calendar arithmetic (molad, postponements, year types)
//! - Dates carrying both civil and luni-solar coordinates
//! - Anchors, cycles and intervals for recurring study programs
//! - Unit tables and their rendering
//! - A catalog of built-in schedules
//! - Configuration and logging for the command-line front end

pub mod types;
pub mod error;
pub mod calendar;
pub mod date;
pub mod anchor;
pub mod cycle;
pub mod interval;
pub mod unit;
pub mod table;
pub mod limud;
pub mod scheduler;
pub mod schedules;
pub mod config;
pub mod logging;

// Re-export commonly used types
pub use error::{Error, Result};
pub use types::*;
pub use date::{molad, JewishDate, MoladTime};
pub use anchor::Anchor;
pub use cycle::Cycle;
pub use interval::Interval;
pub use unit::{Segment, Unit};
pub use table::{UnitEntry, UnitNode, UnitStep, UnitTable};
pub use limud::Limud;
pub use scheduler::{limud, Schedule};
pub use schedules::ScheduleKind;
pub use config::Config;
