// SPDX-License-Identifier: MIT OR Apache-2.0
//! Traversal paths
//!
//! A [`Path`] is the sequence of object keys and array indices leading from
//! the root of a comparison to the node being examined. It renders as the
//! concatenation of `.key` and `[index]` segments, e.g. `.user.tags[0]`.

use serde::{Serialize, Serializer};
use smallvec::SmallVec;
use std::fmt;

/// Inline capacity before a path spills to the heap.
const INLINE_SEGMENTS: usize = 8;

/// A single step in a traversal path
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Segment {
    /// Object key, rendered as `.key`
    Key(String),
    /// Array position, rendered as `[index]`
    Index(usize),
}

impl fmt::Display for Segment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Key(key) => write!(f, ".{key}"),
            Self::Index(index) => write!(f, "[{index}]"),
        }
    }
}

impl From<&str> for Segment {
    fn from(key: &str) -> Self {
        Self::Key(key.to_string())
    }
}

impl From<String> for Segment {
    fn from(key: String) -> Self {
        Self::Key(key)
    }
}

impl From<usize> for Segment {
    fn from(index: usize) -> Self {
        Self::Index(index)
    }
}

/// Ordered list of segments from the comparison root
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct Path {
    segments: SmallVec<[Segment; INLINE_SEGMENTS]>,
}

impl Path {
    /// The empty (root) path
    #[must_use]
    pub fn root() -> Self {
        Self::default()
    }

    /// Number of segments
    #[must_use]
    pub fn len(&self) -> usize {
        self.segments.len()
    }

    /// Whether this is the root path
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }

    /// Segments in root-to-leaf order
    #[must_use]
    pub fn segments(&self) -> &[Segment] {
        &self.segments
    }

    /// Append a segment
    pub fn push(&mut self, segment: impl Into<Segment>) {
        self.segments.push(segment.into());
    }

    /// Remove the most recently pushed segment
    pub fn pop(&mut self) -> Option<Segment> {
        self.segments.pop()
    }

    /// A new path with `suffix` appended to `self`
    #[must_use]
    pub fn join(&self, suffix: &Self) -> Self {
        let mut segments = SmallVec::with_capacity(self.len() + suffix.len());
        segments.extend(self.segments.iter().cloned());
        segments.extend(suffix.segments.iter().cloned());
        Self { segments }
    }
}

impl fmt::Display for Path {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for segment in &self.segments {
            write!(f, "{segment}")?;
        }
        Ok(())
    }
}

impl<S: Into<Segment>> FromIterator<S> for Path {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        Self {
            segments: iter.into_iter().map(Into::into).collect(),
        }
    }
}

impl Serialize for Path {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_render_mixed_segments() {
        let path: Path = [
            Segment::from("user"),
            Segment::from("tags"),
            Segment::from(0usize),
        ]
        .into_iter()
        .collect();
        assert_eq!(path.to_string(), ".user.tags[0]");
    }

    #[test]
    fn test_root_renders_empty() {
        assert_eq!(Path::root().to_string(), "");
        assert!(Path::root().is_empty());
    }

    #[test]
    fn test_push_pop() {
        let mut path = Path::root();
        path.push("a");
        path.push(3usize);
        assert_eq!(path.to_string(), ".a[3]");
        assert_eq!(path.pop(), Some(Segment::Index(3)));
        assert_eq!(path.to_string(), ".a");
    }

    #[test]
    fn test_join_prefixes() {
        let prefix: Path = ["outer"].into_iter().collect();
        let suffix: Path = [Segment::Index(1), Segment::from("inner")]
            .into_iter()
            .collect();
        assert_eq!(prefix.join(&suffix).to_string(), ".outer[1].inner");
        assert_eq!(Path::root().join(&suffix), suffix);
    }

    #[test]
    fn test_serializes_as_string() {
        let path: Path = ["a", "b"].into_iter().collect();
        assert_eq!(serde_json::to_string(&path).unwrap(), "\".a.b\"");
    }
}
