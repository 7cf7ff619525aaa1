//! Tag sets and tag placeholder substitution.

use crate::TsdbError;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

/// Mapping from tag key to tag value identifying a series' dimensions.
///
/// Keys are unique and kept sorted, so two sets with the same pairs are
/// equal regardless of insertion order. The empty set is unconstrained: it
/// applies to every group.
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TagSet(BTreeMap<String, String>);

impl TagSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style insert.
    #[must_use]
    pub fn with(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.insert(key, value);
        self
    }

    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<String>) -> Option<String> {
        self.0.insert(key.into(), value.into())
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.0.get(key).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    /// Same key/value pairs.
    pub fn equal(&self, other: &TagSet) -> bool {
        self == other
    }

    /// Every pair of `self` is also present in `other`.
    pub fn subset(&self, other: &TagSet) -> bool {
        self.0
            .iter()
            .all(|(k, v)| other.0.get(k).is_some_and(|ov| ov == v))
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for TagSet {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        TagSet(
            iter.into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        )
    }
}

impl fmt::Display for TagSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("{")?;
        for (i, (k, v)) in self.0.iter().enumerate() {
            if i > 0 {
                f.write_str(",")?;
            }
            write!(f, "{k}={v}")?;
        }
        f.write_str("}")
    }
}

impl FromStr for TagSet {
    type Err = TsdbError;

    /// Parses `{k=v,...}`. Surrounding braces are optional; values may be
    /// wildcards such as `*` or `a|b`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || TsdbError::InvalidTagSet(s.to_string());
        let inner = s.trim();
        let inner = match (inner.strip_prefix('{'), inner.ends_with('}')) {
            (Some(rest), true) => &rest[..rest.len() - 1],
            (None, false) => inner,
            _ => return Err(invalid()),
        };
        let mut tags = TagSet::new();
        if inner.trim().is_empty() {
            return Ok(tags);
        }
        for pair in inner.split(',') {
            let (key, value) = pair.split_once('=').ok_or_else(invalid)?;
            let (key, value) = (key.trim(), value.trim());
            if key.is_empty() || value.is_empty() || tags.insert(key, value).is_some() {
                return Err(invalid());
            }
        }
        Ok(tags)
    }
}

/// Substitute group values into every `{k=v,...}` block of `text`.
///
/// Keys present in `group` take the group's value; other keys keep theirs.
/// Blocks that do not parse as tag sets, and blocks mentioning none of the
/// group's keys, are copied through unchanged.
pub fn replace_tags(text: &str, group: &TagSet) -> String {
    if group.is_empty() {
        return text.to_string();
    }
    let mut out = String::with_capacity(text.len());
    let mut rest = text;
    while let Some(open) = rest.find('{') {
        let Some(close) = rest[open..].find('}').map(|i| open + i) else {
            break;
        };
        out.push_str(&rest[..open]);
        let block = &rest[open..=close];
        match block.parse::<TagSet>() {
            Ok(mut tags) if tags.0.keys().any(|k| group.0.contains_key(k)) => {
                for (k, v) in &mut tags.0 {
                    if let Some(gv) = group.0.get(k) {
                        v.clone_from(gv);
                    }
                }
                out.push_str(&tags.to_string());
            }
            _ => out.push_str(block),
        }
        rest = &rest[close + 1..];
    }
    out.push_str(rest);
    out
}
