//! Path addressing for document structures and input trees.
//!
//! A [`NodePath`] is an immutable sequence of [`Segment`]s. Its textual form
//! joins segments with `.` (`"lineItems.0.description"`), and the root path is
//! the empty string. Two structures with the same shape produce identical
//! paths, so a path doubles as a stable element key for rendering.
//!
//! Keys containing a literal `.` are not escaped in the textual form. Such a
//! key round-trips through the typed API but not through [`NodePath::parse`].

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;

/// Separator used by the textual path form.
pub const SEPARATOR: char = '.';

/// Joins a textual parent path and a segment.
///
/// An empty parent yields the segment itself.
pub fn join(parent: &str, segment: &str) -> String {
    if parent.is_empty() {
        segment.to_string()
    } else {
        format!("{parent}{SEPARATOR}{segment}")
    }
}

/// Splits a textual path into its segments. The empty path has no segments.
pub fn split(path: &str) -> Vec<&str> {
    if path.is_empty() {
        Vec::new()
    } else {
        path.split(SEPARATOR).collect()
    }
}

/// One step in a path: an object key or an array index.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Segment {
    Key(String),
    Index(usize),
}

impl Segment {
    /// Reads the segment as an array index.
    ///
    /// Keys made only of digits are accepted so that textual paths address
    /// array items.
    pub fn as_index(&self) -> Option<usize> {
        match self {
            Segment::Index(i) => Some(*i),
            Segment::Key(k) => k.parse().ok(),
        }
    }

    /// Reads the segment as an object key.
    pub fn as_key(&self) -> String {
        match self {
            Segment::Key(k) => k.clone(),
            Segment::Index(i) => i.to_string(),
        }
    }
}

impl fmt::Display for Segment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Segment::Key(k) => f.write_str(k),
            Segment::Index(i) => write!(f, "{i}"),
        }
    }
}

impl From<&str> for Segment {
    fn from(raw: &str) -> Self {
        if !raw.is_empty() && raw.bytes().all(|b| b.is_ascii_digit()) {
            if let Ok(index) = raw.parse() {
                return Segment::Index(index);
            }
        }
        Segment::Key(raw.to_string())
    }
}

impl From<usize> for Segment {
    fn from(index: usize) -> Self {
        Segment::Index(index)
    }
}

/// Address of a node in a document structure or its parallel input tree.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct NodePath {
    segments: Vec<Segment>,
}

impl NodePath {
    /// The empty path, addressing the root node.
    pub fn root() -> Self {
        Self::default()
    }

    /// Parses a dotted path. Digit-only segments become array indices.
    pub fn parse(path: &str) -> Self {
        Self {
            segments: split(path).into_iter().map(Segment::from).collect(),
        }
    }

    /// Returns a new path with `segment` appended; `self` is left unchanged.
    pub fn join(&self, segment: impl Into<Segment>) -> Self {
        let mut segments = self.segments.clone();
        segments.push(segment.into());
        Self { segments }
    }

    pub fn child_key(&self, key: &str) -> Self {
        self.join(Segment::Key(key.to_string()))
    }

    pub fn child_index(&self, index: usize) -> Self {
        self.join(Segment::Index(index))
    }

    pub fn segments(&self) -> &[Segment] {
        &self.segments
    }

    pub fn is_root(&self) -> bool {
        self.segments.is_empty()
    }

    pub fn len(&self) -> usize {
        self.segments.len()
    }

    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }

    /// The path one level up, or `None` at the root.
    pub fn parent(&self) -> Option<Self> {
        let (_, init) = self.segments.split_last()?;
        Some(Self {
            segments: init.to_vec(),
        })
    }

    pub fn last(&self) -> Option<&Segment> {
        self.segments.last()
    }
}

impl fmt::Display for NodePath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let text = self
            .segments
            .iter()
            .fold(String::new(), |acc, segment| join(&acc, &segment.to_string()));
        f.write_str(&text)
    }
}

impl FromStr for NodePath {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self::parse(s))
    }
}

impl From<&str> for NodePath {
    fn from(s: &str) -> Self {
        Self::parse(s)
    }
}

impl FromIterator<Segment> for NodePath {
    fn from_iter<I: IntoIterator<Item = Segment>>(iter: I) -> Self {
        Self {
            segments: iter.into_iter().collect(),
        }
    }
}

impl Serialize for NodePath {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for NodePath {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        Ok(Self::parse(&raw))
    }
}
