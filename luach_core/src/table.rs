//! Unit tables and offset resolution.
//!
//! A tiered table is an ordered tree: branches group entries (a tractate
//! holding chapters), leaves carry the last position they contain (a page
//! count, a mishna count). Positions are integers counted in sub-units, so a
//! half-page step is one sub-unit and a whole page is two.

use crate::unit::{Segment, Unit};

/// How far one interval advances through a tiered table
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum UnitStep {
    /// `n` whole positions per interval
    Whole(u32),
    /// One labelled fraction per interval; a whole position splits into
    /// `labels.len()` sub-units (e.g. "a"/"b" sides of a page)
    Fraction { labels: &'static [&'static str] },
}

impl Default for UnitStep {
    fn default() -> Self {
        UnitStep::Whole(1)
    }
}

impl UnitStep {
    /// Sub-units per whole position
    pub fn scale(&self) -> u32 {
        match self {
            UnitStep::Whole(_) => 1,
            UnitStep::Fraction { labels } => labels.len().max(1) as u32,
        }
    }

    /// Sub-units covered by one interval
    pub fn span(&self) -> u32 {
        match self {
            UnitStep::Whole(n) => *n,
            UnitStep::Fraction { .. } => 1,
        }
    }

    /// Offsets (1-based, in sub-units) of the first and, for multi-position
    /// steps, last position studied in interval `iteration`
    pub fn offsets(&self, iteration: u32) -> Vec<u32> {
        let first = iteration.saturating_sub(1) * self.span() + 1;
        match self {
            UnitStep::Whole(n) if *n > 1 => vec![first, first + n - 1],
            _ => vec![first],
        }
    }

    /// Convert a sub-unit position into its rendered segment
    pub fn segment(&self, position: u32) -> Segment {
        match self {
            UnitStep::Whole(_) => Segment::Number(position),
            UnitStep::Fraction { labels } => {
                let scale = self.scale();
                let label = labels
                    .get((position % scale) as usize)
                    .copied()
                    .unwrap_or_default();
                Segment::Fraction {
                    whole: position / scale,
                    label,
                }
            }
        }
    }
}

/// A node of a tiered table
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum UnitNode {
    /// Last position (in sub-units) inside this entry
    Leaf(u32),
    Branch(Vec<UnitEntry>),
}

/// A named node of a tiered table
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct UnitEntry {
    pub segment: Segment,
    pub node: UnitNode,
}

impl UnitEntry {
    pub fn leaf(segment: impl Into<Segment>, last: u32) -> Self {
        Self {
            segment: segment.into(),
            node: UnitNode::Leaf(last),
        }
    }

    pub fn branch(segment: impl Into<Segment>, children: Vec<UnitEntry>) -> Self {
        Self {
            segment: segment.into(),
            node: UnitNode::Branch(children),
        }
    }
}

/// The units a schedule works through in one cycle
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum UnitTable {
    /// One unit per interval, in order
    Flat(Vec<Unit>),
    /// Positions addressed by offset through a tree
    Tiered(Vec<UnitEntry>),
}

impl UnitTable {
    /// Flat table of single-name units
    pub fn names(names: &[&str]) -> Self {
        UnitTable::Flat(names.iter().map(|name| Unit::name(*name)).collect())
    }

    /// Tiered table of named leaves
    pub fn leaves<I, S>(leaves: I) -> Self
    where
        I: IntoIterator<Item = (S, u32)>,
        S: Into<Segment>,
    {
        UnitTable::Tiered(
            leaves
                .into_iter()
                .map(|(name, last)| UnitEntry::leaf(name, last))
                .collect(),
        )
    }

    /// Replace the last position of a top-level leaf; no-op for unknown names
    pub fn with_leaf(mut self, name: &str, last: u32) -> Self {
        if let UnitTable::Tiered(entries) = &mut self {
            for entry in entries.iter_mut() {
                if matches!(&entry.segment, Segment::Name(n) if n == name) {
                    entry.node = UnitNode::Leaf(last);
                }
            }
        }
        self
    }

    /// Units in a flat table, or top-level entries in a tiered one
    pub fn len(&self) -> usize {
        match self {
            UnitTable::Flat(units) => units.len(),
            UnitTable::Tiered(entries) => entries.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Total positions (in sub-units) across all leaves
    pub fn total_positions<F>(&self, starting_position: F) -> u32
    where
        F: Fn(&Segment) -> u32,
    {
        fn count<F: Fn(&Segment) -> u32>(entries: &[UnitEntry], starting_position: &F) -> u32 {
            entries
                .iter()
                .map(|entry| match &entry.node {
                    UnitNode::Leaf(last) => leaf_length(*last, starting_position(&entry.segment)),
                    UnitNode::Branch(children) => count(children, starting_position),
                })
                .sum()
        }

        match self {
            UnitTable::Flat(units) => units.len() as u32,
            UnitTable::Tiered(entries) => count(entries, &starting_position),
        }
    }
}

fn leaf_length(last: u32, start: u32) -> u32 {
    (last + 1).saturating_sub(start)
}

/// Resolve the unit studied in interval `iteration` of a tiered table.
///
/// Returns `None` when any target offset runs past the end of the table.
pub fn resolve_tiered<F>(
    entries: &[UnitEntry],
    step: UnitStep,
    iteration: u32,
    starting_position: F,
) -> Option<Unit>
where
    F: Fn(&Segment) -> u32,
{
    let mut paths = Vec::new();
    for offset in step.offsets(iteration) {
        let mut remaining = offset;
        let mut path = Vec::new();
        if !locate(entries, &mut remaining, &mut path, &step, &starting_position) {
            return None;
        }
        paths.push(path);
    }

    let mut paths = paths.into_iter();
    let first = paths.next()?;
    Some(match paths.next() {
        Some(last) => Unit::span(first, last),
        None => Unit::point(first),
    })
}

/// Depth-first walk consuming `remaining` positions; on success `path`
/// holds the names down to the leaf plus the resolved position.
fn locate<F>(
    entries: &[UnitEntry],
    remaining: &mut u32,
    path: &mut Vec<Segment>,
    step: &UnitStep,
    starting_position: &F,
) -> bool
where
    F: Fn(&Segment) -> u32,
{
    for entry in entries {
        match &entry.node {
            UnitNode::Leaf(last) => {
                let start = starting_position(&entry.segment);
                let length = leaf_length(*last, start);
                if *remaining <= length {
                    path.push(entry.segment.clone());
                    path.push(step.segment(start + *remaining - 1));
                    return true;
                }
                *remaining -= length;
            }
            UnitNode::Branch(children) => {
                path.push(entry.segment.clone());
                if locate(children, remaining, path, step, starting_position) {
                    return true;
                }
                path.pop();
            }
        }
    }
    false
}

#[cfg(test)]
mod tests {
    use super::*;

    fn chapters(name: &str, counts: &[u32]) -> UnitEntry {
        UnitEntry::branch(
            name,
            counts
                .iter()
                .enumerate()
                .map(|(i, count)| UnitEntry::leaf(i as u32 + 1, *count))
                .collect(),
        )
    }

    fn mishna_table() -> Vec<UnitEntry> {
        vec![chapters("berachos", &[5, 8, 6]), chapters("peah", &[6, 8])]
    }

    fn from_one(_: &Segment) -> u32 {
        1
    }

    #[test]
    fn test_offsets() {
        assert_eq!(UnitStep::Whole(1).offsets(5), vec![5]);
        assert_eq!(UnitStep::Whole(2).offsets(1), vec![1, 2]);
        assert_eq!(UnitStep::Whole(2).offsets(3), vec![5, 6]);
        assert_eq!(UnitStep::Fraction { labels: &["a", "b"] }.offsets(3), vec![3]);
    }

    #[test]
    fn test_fraction_segments() {
        let step = UnitStep::Fraction { labels: &["a", "b"] };
        assert_eq!(step.segment(106).to_string(), "53a");
        assert_eq!(step.segment(107).to_string(), "53b");
    }

    #[test]
    fn test_flat_leaves() {
        let table = vec![UnitEntry::leaf("berachos", 64), UnitEntry::leaf("shabbos", 157)];
        let start = |_: &Segment| 2;
        let unit = resolve_tiered(&table, UnitStep::Whole(1), 1, start).unwrap();
        assert_eq!(unit.to_string(), "berachos 2");
        let unit = resolve_tiered(&table, UnitStep::Whole(1), 63, start).unwrap();
        assert_eq!(unit.to_string(), "berachos 64");
        let unit = resolve_tiered(&table, UnitStep::Whole(1), 64, start).unwrap();
        assert_eq!(unit.to_string(), "shabbos 2");
    }

    #[test]
    fn test_nested_span_within_chapter() {
        let unit = resolve_tiered(&mishna_table(), UnitStep::Whole(2), 1, from_one).unwrap();
        assert_eq!(unit.to_string(), "berachos 1:1-2");
    }

    #[test]
    fn test_nested_span_across_chapters() {
        // offsets 5 and 6: last of chapter 1, first of chapter 2
        let unit = resolve_tiered(&mishna_table(), UnitStep::Whole(2), 3, from_one).unwrap();
        assert_eq!(unit.to_string(), "berachos 1:5-2:1");
    }

    #[test]
    fn test_nested_span_across_roots() {
        // berachos holds 19 mishnayos; offsets 19 and 20
        let unit = resolve_tiered(&mishna_table(), UnitStep::Whole(2), 10, from_one).unwrap();
        assert_eq!(unit.to_string(), "berachos 3:6 - peah 1:1");
    }

    #[test]
    fn test_exhausted_table_yields_none() {
        assert!(resolve_tiered(&mishna_table(), UnitStep::Whole(2), 17, from_one).is_none());
        // one offset resolves, the other runs off the end
        let odd = vec![UnitEntry::leaf("only", 3)];
        assert!(resolve_tiered(&odd, UnitStep::Whole(2), 2, from_one).is_none());
    }

    #[test]
    fn test_with_leaf_and_totals() {
        let table = UnitTable::leaves([("berachos", 64), ("shekalim", 22)]);
        assert_eq!(table.total_positions(|_| 2), 63 + 21);
        let table = table.with_leaf("shekalim", 13);
        assert_eq!(table.total_positions(|_| 2), 63 + 12);
        assert_eq!(table.len(), 2);
    }

    #[test]
    fn test_names_table() {
        let table = UnitTable::names(&["bereishis", "noach"]);
        assert_eq!(table, UnitTable::Flat(vec![Unit::name("bereishis"), Unit::name("noach")]));
    }
}
