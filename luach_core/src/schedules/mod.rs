//! Built-in study schedules.

mod amud_yomi_bavli_dirshu;
mod daf_hashavua_bavli;
mod daf_yomi_bavli;
mod daf_yomi_yerushalmi;
mod mishna_yomis;
mod parsha;
mod perek_mishnayos_yomi;
mod pirkei_avos;
mod tehillim_monthly;

pub use amud_yomi_bavli_dirshu::AmudYomiBavliDirshu;
pub use daf_hashavua_bavli::DafHashavuaBavli;
pub use daf_yomi_bavli::DafYomiBavli;
pub use daf_yomi_yerushalmi::DafYomiYerushalmi;
pub use mishna_yomis::MishnaYomis;
pub use parsha::Parsha;
pub use perek_mishnayos_yomi::PerekMishnayosYomi;
pub use pirkei_avos::PirkeiAvos;
pub use tehillim_monthly::TehillimMonthly;

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::scheduler::Schedule;
use crate::{Error, Result};

/// The schedules this crate ships, addressable by a stable id
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum ScheduleKind {
    DafYomiBavli,
    AmudYomiBavliDirshu,
    DafHashavuaBavli,
    DafYomiYerushalmi,
    MishnaYomis,
    PerekMishnayosYomi,
    Parsha,
    PirkeiAvos,
    TehillimMonthly,
}

impl ScheduleKind {
    pub const ALL: [ScheduleKind; 9] = [
        ScheduleKind::DafYomiBavli,
        ScheduleKind::AmudYomiBavliDirshu,
        ScheduleKind::DafHashavuaBavli,
        ScheduleKind::DafYomiYerushalmi,
        ScheduleKind::MishnaYomis,
        ScheduleKind::PerekMishnayosYomi,
        ScheduleKind::Parsha,
        ScheduleKind::PirkeiAvos,
        ScheduleKind::TehillimMonthly,
    ];

    pub fn id(self) -> &'static str {
        match self {
            ScheduleKind::DafYomiBavli => "daf_yomi_bavli",
            ScheduleKind::AmudYomiBavliDirshu => "amud_yomi_bavli_dirshu",
            ScheduleKind::DafHashavuaBavli => "daf_hashavua_bavli",
            ScheduleKind::DafYomiYerushalmi => "daf_yomi_yerushalmi",
            ScheduleKind::MishnaYomis => "mishna_yomis",
            ScheduleKind::PerekMishnayosYomi => "perek_mishnayos_yomi",
            ScheduleKind::Parsha => "parsha",
            ScheduleKind::PirkeiAvos => "pirkei_avos",
            ScheduleKind::TehillimMonthly => "tehillim_monthly",
        }
    }

    pub fn from_id(id: &str) -> Result<Self> {
        Self::ALL
            .iter()
            .copied()
            .find(|kind| kind.id() == id)
            .ok_or_else(|| Error::UnknownSchedule(id.to_string()))
    }

    /// One-line summary for listings
    pub fn summary(self) -> &'static str {
        match self {
            ScheduleKind::DafYomiBavli => "One page of Talmud Bavli a day",
            ScheduleKind::AmudYomiBavliDirshu => "One side of a Talmud Bavli page a day (Dirshu)",
            ScheduleKind::DafHashavuaBavli => "One page of Talmud Bavli a week",
            ScheduleKind::DafYomiYerushalmi => "One page of Talmud Yerushalmi a day",
            ScheduleKind::MishnaYomis => "Two mishnayos a day",
            ScheduleKind::PerekMishnayosYomi => "One chapter of Mishna a day",
            ScheduleKind::Parsha => "Weekly Torah portion",
            ScheduleKind::PirkeiAvos => "Pirkei Avos on summer Shabbosim",
            ScheduleKind::TehillimMonthly => "Tehillim once a month",
        }
    }

    /// Whether the schedule differs between Israel and the diaspora
    pub fn depends_on_location(self) -> bool {
        matches!(self, ScheduleKind::Parsha | ScheduleKind::PirkeiAvos)
    }

    pub fn build(self, in_israel: bool) -> Box<dyn Schedule> {
        match self {
            ScheduleKind::DafYomiBavli => Box::new(DafYomiBavli),
            ScheduleKind::AmudYomiBavliDirshu => Box::new(AmudYomiBavliDirshu),
            ScheduleKind::DafHashavuaBavli => Box::new(DafHashavuaBavli),
            ScheduleKind::DafYomiYerushalmi => Box::new(DafYomiYerushalmi),
            ScheduleKind::MishnaYomis => Box::new(MishnaYomis),
            ScheduleKind::PerekMishnayosYomi => Box::new(PerekMishnayosYomi),
            ScheduleKind::Parsha => Box::new(Parsha::new(in_israel)),
            ScheduleKind::PirkeiAvos => Box::new(PirkeiAvos::new(in_israel)),
            ScheduleKind::TehillimMonthly => Box::new(TehillimMonthly),
        }
    }
}

impl fmt::Display for ScheduleKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.id())
    }
}

impl FromStr for ScheduleKind {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Self::from_id(s)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ids_roundtrip() {
        for kind in ScheduleKind::ALL {
            assert_eq!(ScheduleKind::from_id(kind.id()).unwrap(), kind);
            assert_eq!(kind.build(false).id(), kind.id());
        }
    }

    #[test]
    fn test_unknown_id() {
        assert!(matches!(
            "daf_yomi_klingon".parse::<ScheduleKind>(),
            Err(Error::UnknownSchedule(_))
        ));
    }

    #[test]
    fn test_location_dependence() {
        assert!(ScheduleKind::Parsha.depends_on_location());
        assert!(!ScheduleKind::DafYomiBavli.depends_on_location());
    }
}
