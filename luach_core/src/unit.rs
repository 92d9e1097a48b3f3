//! Units of study and how they render.
//!
//! A unit is one path (`berachos 3:5`) or a span of two paths
//! (`berachos 3:5-4:1`) through a unit table. Each path is a list of
//! segments, the first of which is the root (usually a tractate or parsha
//! name).

use serde::Serialize;
use std::fmt;

/// One step of a unit path
#[derive(Clone, Debug, Serialize, PartialEq, Eq, Hash)]
#[serde(untagged)]
pub enum Segment {
    Name(String),
    Number(u32),
    /// A whole number with a sub-unit label, such as a page side ("53a")
    Fraction { whole: u32, label: &'static str },
}

impl Segment {
    pub fn name(name: impl Into<String>) -> Self {
        Segment::Name(name.into())
    }
}

impl fmt::Display for Segment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Segment::Name(name) => f.write_str(name),
            Segment::Number(n) => write!(f, "{}", n),
            Segment::Fraction { whole, label } => write!(f, "{}{}", whole, label),
        }
    }
}

impl From<&str> for Segment {
    fn from(name: &str) -> Self {
        Segment::Name(name.to_string())
    }
}

impl From<u32> for Segment {
    fn from(n: u32) -> Self {
        Segment::Number(n)
    }
}

/// A unit of study: one path, or a span between two paths
#[derive(Clone, Debug, Serialize, PartialEq, Eq)]
pub struct Unit {
    paths: Vec<Vec<Segment>>,
}

impl Unit {
    /// A unit addressed by a single path
    pub fn point(path: Vec<Segment>) -> Self {
        Self { paths: vec![path] }
    }

    /// A unit spanning from `first` through `last`
    pub fn span(first: Vec<Segment>, last: Vec<Segment>) -> Self {
        Self {
            paths: vec![first, last],
        }
    }

    /// A unit consisting of a single name
    pub fn name(name: impl Into<String>) -> Self {
        Self::point(vec![Segment::Name(name.into())])
    }

    /// A unit consisting of a single number
    pub fn number(n: u32) -> Self {
        Self::point(vec![Segment::Number(n)])
    }

    pub fn paths(&self) -> &[Vec<Segment>] {
        &self.paths
    }

    /// Render with a custom segment formatter (e.g. for localized names).
    ///
    /// Spans sharing a root print only the part that differs
    /// (`berachos 3:5-7`); spans across roots print both paths in full.
    pub fn render<F>(&self, label: F) -> String
    where
        F: Fn(&Segment) -> String,
    {
        let mut rendered = self
            .paths
            .iter()
            .map(|path| path.iter().map(&label).collect::<Vec<_>>());

        let Some(primary) = rendered.next() else {
            return String::new();
        };
        let mut out = render_with_root(&primary);

        if let Some(secondary) = rendered.next() {
            if secondary.first() != primary.first() {
                out.push_str(" - ");
                out.push_str(&render_with_root(&secondary));
            } else if let Some(i) = secondary
                .iter()
                .zip(primary.iter().chain(std::iter::repeat(&String::new())))
                .position(|(a, b)| a != b)
            {
                out.push('-');
                out.push_str(&secondary[i..].join(":"));
            }
        }
        out
    }
}

fn render_with_root(path: &[String]) -> String {
    match path.split_first() {
        None => String::new(),
        Some((root, [])) => root.clone(),
        Some((root, rest)) => format!("{} {}", root, rest.join(":")),
    }
}

impl fmt::Display for Unit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.render(|segment| segment.to_string()))
    }
}
