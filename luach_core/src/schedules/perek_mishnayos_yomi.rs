//! One chapter of Mishna a day.

use chrono::NaiveDate;
use once_cell::sync::Lazy;

use super::mishna_yomis::TRACTATE_CHAPTERS;
use crate::date::JewishDate;
use crate::scheduler::Schedule;
use crate::table::UnitTable;
use crate::Result;

const CHAPTERS: i64 = 525;

static UNITS: Lazy<UnitTable> = Lazy::new(|| {
    UnitTable::leaves(
        TRACTATE_CHAPTERS
            .iter()
            .map(|(name, chapters)| (*name, chapters.len() as u32)),
    )
});

#[derive(Clone, Copy, Debug, Default)]
pub struct PerekMishnayosYomi;

impl Schedule for PerekMishnayosYomi {
    fn id(&self) -> &'static str {
        "perek_mishnayos_yomi"
    }

    fn initial_cycle_date(&self) -> Option<NaiveDate> {
        NaiveDate::from_ymd_opt(1947, 5, 20)
    }

    fn cycle_end(&self, start: &JewishDate, _iteration: Option<u32>) -> Result<JewishDate> {
        start.forward(CHAPTERS - 1)
    }

    fn default_units(&self) -> UnitTable {
        UNITS.clone()
    }
}
