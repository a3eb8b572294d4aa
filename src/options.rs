//! Caller-supplied style and save options.
//!
//! Options arrive as a loose key/value map. Each provider owns a closed enum
//! of the keys it understands and reads the map through
//! [`Options::recognized`]; keys that map to nothing are skipped silently.

use std::collections::BTreeMap;
use std::path::PathBuf;

use crate::error::ImageError;

/// A single option value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OptionValue {
    /// Explicitly unset; treated like an absent key.
    Null,
    /// A boolean flag.
    Bool(bool),
    /// A single string.
    Text(String),
    /// An ordered list of strings.
    List(Vec<String>),
}

impl OptionValue {
    /// Read the value as a string. `Null` and `false` read as absent.
    ///
    /// # Errors
    ///
    /// Returns an error for `true` or a list.
    pub fn as_text(&self, key: &str) -> Result<Option<&str>, ImageError> {
        match self {
            Self::Null | Self::Bool(false) => Ok(None),
            Self::Text(s) => Ok(Some(s.as_str())),
            other => Err(shape_error(key, "a string", other)),
        }
    }

    /// Read the value as a boolean. `Null` reads as absent.
    ///
    /// # Errors
    ///
    /// Returns an error for anything other than a bool or `Null`.
    pub fn as_flag(&self, key: &str) -> Result<Option<bool>, ImageError> {
        match self {
            Self::Null => Ok(None),
            Self::Bool(b) => Ok(Some(*b)),
            other => Err(shape_error(key, "a bool", other)),
        }
    }

    /// Read the value as a list; a single string becomes a one-element list.
    /// `Null`, `false`, an empty string and an empty list read as absent.
    ///
    /// # Errors
    ///
    /// Returns an error for `true`.
    pub fn as_list(&self, key: &str) -> Result<Option<Vec<String>>, ImageError> {
        match self {
            Self::Null | Self::Bool(false) => Ok(None),
            Self::Text(s) if s.is_empty() => Ok(None),
            Self::Text(s) => Ok(Some(vec![s.clone()])),
            Self::List(items) if items.is_empty() => Ok(None),
            Self::List(items) => Ok(Some(items.clone())),
            other @ Self::Bool(true) => Err(shape_error(key, "a string or list", other)),
        }
    }
}

fn shape_error(key: &str, expected: &str, got: &OptionValue) -> ImageError {
    ImageError::InvalidArgument(format!("Option '{key}' must be {expected}, got {got:?}"))
}

impl From<&str> for OptionValue {
    fn from(value: &str) -> Self {
        Self::Text(value.to_string())
    }
}

impl From<String> for OptionValue {
    fn from(value: String) -> Self {
        Self::Text(value)
    }
}

impl From<bool> for OptionValue {
    fn from(value: bool) -> Self {
        Self::Bool(value)
    }
}

impl From<Vec<String>> for OptionValue {
    fn from(value: Vec<String>) -> Self {
        Self::List(value)
    }
}

impl From<Vec<&str>> for OptionValue {
    fn from(value: Vec<&str>) -> Self {
        Self::List(value.into_iter().map(str::to_string).collect())
    }
}

impl<const N: usize> From<[&str; N]> for OptionValue {
    fn from(value: [&str; N]) -> Self {
        Self::List(value.iter().map(|s| (*s).to_string()).collect())
    }
}

impl<T: Into<OptionValue>> From<Option<T>> for OptionValue {
    fn from(value: Option<T>) -> Self {
        value.map_or(Self::Null, Into::into)
    }
}

/// A closed set of option keys understood by one consumer.
pub trait OptionKey: Copy + Sized + 'static {
    /// Every key in the set.
    const ALL: &'static [Self];

    /// The string form used in an [`Options`] map.
    fn key(self) -> &'static str;

    /// Look up a raw key; `None` for keys outside the set.
    #[must_use]
    fn from_key(raw: &str) -> Option<Self> {
        Self::ALL.iter().copied().find(|k| k.key() == raw)
    }
}

/// Loose key/value options passed to a provider.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Options {
    entries: BTreeMap<String, OptionValue>,
}

impl Options {
    /// Empty options.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style insert.
    #[must_use]
    pub fn with(mut self, key: impl Into<String>, value: impl Into<OptionValue>) -> Self {
        self.insert(key, value);
        self
    }

    /// Insert or replace a value.
    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<OptionValue>) {
        self.entries.insert(key.into(), value.into());
    }

    /// Raw lookup by key.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&OptionValue> {
        self.entries.get(key)
    }

    /// Iterate over the entries whose key belongs to `K`, skipping the rest.
    pub fn recognized<K: OptionKey>(&self) -> impl Iterator<Item = (K, &OptionValue)> + '_ {
        self.entries.iter().filter_map(|(raw, value)| K::from_key(raw).map(|key| (key, value)))
    }
}

impl<K: Into<String>, V: Into<OptionValue>> FromIterator<(K, V)> for Options {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut options = Self::new();
        for (key, value) in iter {
            options.insert(key, value);
        }
        options
    }
}

/// Keys shared by every provider's save operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SaveOption {
    /// Target directory; `Null` or absent means the system temp dir.
    Dir,
    /// Return the full path (`true`, default) or the bare filename.
    FullPath,
    /// Extension of the saved file.
    Extension,
}

impl OptionKey for SaveOption {
    const ALL: &'static [Self] = &[Self::Dir, Self::FullPath, Self::Extension];

    fn key(self) -> &'static str {
        match self {
            Self::Dir => "dir",
            Self::FullPath => "full_path",
            Self::Extension => "extension",
        }
    }
}

/// Resolved save options.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SaveOptions {
    /// Target directory, `None` for the system temp dir.
    pub dir: Option<PathBuf>,
    /// Whether to return the full path instead of the filename.
    pub full_path: bool,
    /// Extension of the saved file.
    pub extension: String,
}

impl SaveOptions {
    /// Read the save keys from `options`, falling back to the temp dir,
    /// full paths, and `default_extension`.
    ///
    /// # Errors
    ///
    /// Returns an error if a recognized key holds a value of the wrong shape.
    pub fn from_options(options: &Options, default_extension: &str) -> Result<Self, ImageError> {
        let mut resolved =
            Self { dir: None, full_path: true, extension: default_extension.to_string() };

        for (key, value) in options.recognized::<SaveOption>() {
            match key {
                SaveOption::Dir => resolved.dir = value.as_text(key.key())?.map(PathBuf::from),
                SaveOption::FullPath => {
                    if let Some(flag) = value.as_flag(key.key())? {
                        resolved.full_path = flag;
                    }
                }
                SaveOption::Extension => {
                    if let Some(ext) = value.as_text(key.key())?.filter(|e| !e.is_empty()) {
                        resolved.extension = ext.to_string();
                    }
                }
            }
        }

        Ok(resolved)
    }
}
