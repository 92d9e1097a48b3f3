//! Weekly Torah reading.
//!
//! The cycle runs from the Shabbos after Simchas Torah through Simchas
//! Torah. Weeks end on Shabbos unless that Shabbos is a festival with its
//! own reading, and the year's shape decides which portions are read
//! together.

use once_cell::sync::Lazy;

use crate::anchor::Anchor;
use crate::cycle::Cycle;
use crate::date::JewishDate;
use crate::scheduler::Schedule;
use crate::table::UnitTable;
use crate::types::{Kviah, YearKviah};
use crate::unit::{Segment, Unit};
use crate::Result;

const PARSHIYOS: [&str; 54] = [
    "bereishis", "noach", "lech_lecha", "vayeira", "chayei_sarah", "toldos", "vayeitzei",
    "vayishlach", "vayeishev", "mikeitz", "vayigash", "vayechi", "shemos", "vaeirah", "bo",
    "beshalach", "yisro", "mishpatim", "terumah", "tetzaveh", "ki_sisa", "vayakheil", "pekudei",
    "vayikra", "tzav", "shemini", "tazria", "metzora", "acharei", "kedoshim", "emor", "behar",
    "bechukosai", "bamidbar", "naso", "behaalosecha", "shelach", "korach", "chukas", "balak",
    "pinchas", "matos", "masei", "devarim", "vaeschanan", "eikev", "reei", "shoftim",
    "ki_seitzei", "ki_savo", "nitzavim", "vayeilech", "haazinu", "vezos_haberacha",
];

type Pairs = &'static [(&'static str, &'static str)];

const VP: (&str, &str) = ("vayakheil", "pekudei");
const TM: (&str, &str) = ("tazria", "metzora");
const AK: (&str, &str) = ("acharei", "kedoshim");
const BB: (&str, &str) = ("behar", "bechukosai");
const CB: (&str, &str) = ("chukas", "balak");
const MM: (&str, &str) = ("matos", "masei");
const NV: (&str, &str) = ("nitzavim", "vayeilech");

/// Combined readings by (Rosh Hashana weekday, Cheshvan/Kislev, Pesach weekday)
const ISRAEL_PAIRINGS: [((u8, Kviah, u8), Pairs); 14] = [
    ((2, Kviah::Chaseirim, 5), &[MM, NV]),
    ((2, Kviah::Shelaimim, 7), &[]),
    ((3, Kviah::Kesidran, 7), &[]),
    ((5, Kviah::Chaseirim, 1), &[]),
    ((5, Kviah::Shelaimim, 3), &[NV]),
    ((7, Kviah::Chaseirim, 3), &[MM, NV]),
    ((7, Kviah::Shelaimim, 5), &[MM, NV]),
    ((2, Kviah::Chaseirim, 3), &[VP, TM, AK, BB, MM, NV]),
    ((2, Kviah::Shelaimim, 5), &[VP, TM, AK, BB, MM, NV]),
    ((3, Kviah::Kesidran, 5), &[VP, TM, AK, BB, MM, NV]),
    ((5, Kviah::Kesidran, 7), &[VP, TM, AK, MM]),
    ((5, Kviah::Shelaimim, 1), &[TM, AK, BB, MM]),
    ((7, Kviah::Chaseirim, 1), &[VP, TM, AK, BB, MM]),
    ((7, Kviah::Shelaimim, 3), &[VP, TM, AK, BB, MM]),
];

const DIASPORA_PAIRINGS: [((u8, Kviah, u8), Pairs); 14] = [
    ((2, Kviah::Chaseirim, 5), &[CB, MM, NV]),
    ((2, Kviah::Shelaimim, 7), &[MM]),
    ((3, Kviah::Kesidran, 7), &[MM]),
    ((5, Kviah::Chaseirim, 1), &[]),
    ((5, Kviah::Shelaimim, 3), &[NV]),
    ((7, Kviah::Chaseirim, 3), &[MM, NV]),
    ((7, Kviah::Shelaimim, 5), &[CB, MM, NV]),
    ((2, Kviah::Chaseirim, 3), &[VP, TM, AK, BB, MM, NV]),
    ((2, Kviah::Shelaimim, 5), &[VP, TM, AK, BB, CB, MM, NV]),
    ((3, Kviah::Kesidran, 5), &[VP, TM, AK, BB, CB, MM, NV]),
    ((5, Kviah::Kesidran, 7), &[VP, TM, AK, BB, MM]),
    ((5, Kviah::Shelaimim, 1), &[TM, AK, BB, MM]),
    ((7, Kviah::Chaseirim, 1), &[VP, TM, AK, BB, MM]),
    ((7, Kviah::Shelaimim, 3), &[VP, TM, AK, BB, MM, NV]),
];

static UNITS: Lazy<UnitTable> = Lazy::new(|| UnitTable::names(&PARSHIYOS));

/// Shabbosim with a festival reading, by month
const ISRAEL_FESTIVALS: [(u8, &[u8]); 3] = [
    (1, &[15, 16, 17, 18, 19, 20, 21]),
    (3, &[6]),
    (7, &[1, 2, 10, 15, 16, 17, 18, 19, 20, 21]),
];

const DIASPORA_FESTIVALS: [(u8, &[u8]); 3] = [
    (1, &[15, 16, 17, 18, 19, 20, 21, 22]),
    (3, &[6, 7]),
    (7, &[1, 2, 10, 15, 16, 17, 18, 19, 20, 21, 22]),
];

fn pairings(kviah: &YearKviah, in_israel: bool) -> Option<Pairs> {
    let table = if in_israel {
        &ISRAEL_PAIRINGS
    } else {
        &DIASPORA_PAIRINGS
    };
    table
        .iter()
        .find(|((rosh_hashana, cheshvan_kislev, pesach), _)| {
            *rosh_hashana == kviah.rosh_hashana
                && *cheshvan_kislev == kviah.cheshvan_kislev
                && *pesach == kviah.pesach
        })
        .map(|(_, pairs)| *pairs)
}

#[derive(Clone, Copy, Debug, Default)]
pub struct Parsha {
    pub in_israel: bool,
}

impl Parsha {
    pub fn new(in_israel: bool) -> Self {
        Self { in_israel }
    }

    /// 23 Tishrei in Israel, 24 elsewhere: the day after Simchas Torah
    fn anchor(&self) -> Anchor {
        let day = if self.in_israel { 23 } else { 24 };
        Anchor::DayOfYear { month: 7, day }
    }

    fn is_festival(&self, date: &JewishDate) -> bool {
        let festivals = if self.in_israel {
            &ISRAEL_FESTIVALS
        } else {
            &DIASPORA_FESTIVALS
        };
        festivals
            .iter()
            .any(|(month, days)| *month == date.month() && days.contains(&date.day()))
    }
}

impl Schedule for Parsha {
    fn id(&self) -> &'static str {
        "parsha"
    }

    fn perpetual_anchor(&self) -> Option<Anchor> {
        Some(self.anchor())
    }

    fn tiered(&self) -> bool {
        false
    }

    fn cycle_end(&self, start: &JewishDate, _iteration: Option<u32>) -> Result<JewishDate> {
        self.anchor().next_occurrence(start)?.back(1)
    }

    fn interval_end(&self, cycle: &Cycle, start: &JewishDate) -> Result<JewishDate> {
        let mut end = start.forward(7 - i64::from(start.day_of_week()))?;
        while self.is_festival(&end) {
            end = end.forward(7)?;
        }
        Ok(end.min(cycle.end))
    }

    fn default_units(&self) -> UnitTable {
        UNITS.clone()
    }

    fn cycle_units(&self, cycle: &Cycle) -> UnitTable {
        let kviah = cycle.start.kviah();
        let Some(pairs) = pairings(&kviah, self.in_israel) else {
            tracing::warn!(?kviah, "No parsha pairings for year type");
            return self.default_units();
        };

        let mut units: Vec<Unit> = PARSHIYOS.iter().map(|name| Unit::name(*name)).collect();
        for (first, second) in pairs {
            let first_unit = Unit::name(*first);
            if let Some(i) = units.iter().position(|unit| *unit == first_unit) {
                if i + 1 < units.len() {
                    units.remove(i + 1);
                }
                units[i] = Unit::span(vec![Segment::from(*first)], vec![Segment::from(*second)]);
            }
        }
        UnitTable::Flat(units)
    }
}
