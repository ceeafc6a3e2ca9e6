//! Naming conventions that turn a declared field name into a relationship
//! property.

use once_cell::sync::Lazy;

/// Decides whether a field refers to other resources, and under which
/// property name.
pub trait NamingStrategy: Send + Sync {
    /// Returns the relationship property for `field`, or `None` if the field
    /// does not hold references.
    fn reference_property<'a>(&self, field: &'a str) -> Option<&'a str>;
}

/// Matches fields by suffix; the first matching suffix wins and is stripped.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SuffixNaming {
    suffixes: Vec<String>,
}

pub const DEFAULT_SUFFIXES: [&str; 2] = ["_id", "_ids"];

static DEFAULT_NAMING: Lazy<SuffixNaming> = Lazy::new(SuffixNaming::default);

impl SuffixNaming {
    pub fn new<I, S>(suffixes: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            suffixes: suffixes.into_iter().map(Into::into).collect(),
        }
    }

    pub fn suffixes(&self) -> &[String] {
        &self.suffixes
    }
}

impl Default for SuffixNaming {
    fn default() -> Self {
        Self::new(DEFAULT_SUFFIXES)
    }
}

impl NamingStrategy for SuffixNaming {
    fn reference_property<'a>(&self, field: &'a str) -> Option<&'a str> {
        self.suffixes
            .iter()
            .find_map(|suffix| field.strip_suffix(suffix.as_str()))
    }
}

/// The process-wide default convention (`_id`, then `_ids`).
pub fn default_naming() -> &'static SuffixNaming {
    &DEFAULT_NAMING
}
