//! Core types for smartstyle

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Kind of text-bearing unit a host pipeline hands to a step.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum ContentKind {
    /// A scene: the smallest unit of manuscript text
    #[default]
    Scene,
    /// A chapter heading unit
    Chapter,
    /// A part (group of chapters)
    Part,
    /// Free-standing notes attached to the manuscript
    Note,
}

impl std::fmt::Display for ContentKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ContentKind::Scene => write!(f, "Scene"),
            ContentKind::Chapter => write!(f, "Chapter"),
            ContentKind::Part => write!(f, "Part"),
            ContentKind::Note => write!(f, "Note"),
        }
    }
}

/// A record that may carry a mutable `contents` text blob.
///
/// Steps only ever touch `contents`; everything else about the record
/// belongs to the host.
pub trait SceneLike {
    /// Kind of the record. Defaults to [`ContentKind::Scene`].
    fn kind(&self) -> ContentKind {
        ContentKind::Scene
    }

    /// Current contents, if the record has any.
    fn contents(&self) -> Option<&str>;

    /// Mutable access to the contents, if the record has any.
    fn contents_mut(&mut self) -> Option<&mut String>;
}

impl<T: SceneLike + ?Sized> SceneLike for &mut T {
    fn kind(&self) -> ContentKind {
        (**self).kind()
    }

    fn contents(&self) -> Option<&str> {
        (**self).contents()
    }

    fn contents_mut(&mut self) -> Option<&mut String> {
        (**self).contents_mut()
    }
}

/// Concrete scene record used by the pipeline and the CLI.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Scene {
    /// Kind of unit
    #[serde(default)]
    pub kind: ContentKind,
    /// Optional title (file name when read from disk)
    #[serde(default)]
    pub title: Option<String>,
    /// Text contents, absent for structural units
    #[serde(default)]
    pub contents: Option<String>,
}

impl Scene {
    /// Create a scene holding the given text.
    pub fn new(contents: impl Into<String>) -> Self {
        Self {
            kind: ContentKind::Scene,
            title: None,
            contents: Some(contents.into()),
        }
    }

    /// Create a record with no contents.
    pub fn empty(kind: ContentKind) -> Self {
        Self {
            kind,
            title: None,
            contents: None,
        }
    }

    /// Set the title.
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    /// Set the kind.
    pub fn with_kind(mut self, kind: ContentKind) -> Self {
        self.kind = kind;
        self
    }
}

impl SceneLike for Scene {
    fn kind(&self) -> ContentKind {
        self.kind
    }

    fn contents(&self) -> Option<&str> {
        self.contents.as_deref()
    }

    fn contents_mut(&mut self) -> Option<&mut String> {
        self.contents.as_mut()
    }
}

/// A bare string is a scene whose contents are always present.
impl SceneLike for String {
    fn contents(&self) -> Option<&str> {
        Some(self.as_str())
    }

    fn contents_mut(&mut self) -> Option<&mut String> {
        Some(self)
    }
}

/// Option values resolved by the host, keyed by option id.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct OptionValues(BTreeMap<String, String>);

impl OptionValues {
    /// Create an empty set of values.
    pub const fn new() -> Self {
        Self(BTreeMap::new())
    }

    /// Builder-style insert.
    pub fn with(mut self, id: impl Into<String>, value: impl Into<String>) -> Self {
        self.insert(id, value);
        self
    }

    /// Insert or replace a value.
    pub fn insert(&mut self, id: impl Into<String>, value: impl Into<String>) {
        self.0.insert(id.into(), value.into());
    }

    /// Look up a value by option id.
    pub fn get(&self, id: &str) -> Option<&str> {
        self.0.get(id).map(String::as_str)
    }

    /// Number of values present.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Whether no values are present.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Iterate over `(id, value)` pairs in id order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for OptionValues {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self(iter.into_iter().map(|(k, v)| (k.into(), v.into())).collect())
    }
}
