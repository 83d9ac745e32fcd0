//! Structured value container produced by log and scope definitions.

use crate::template::{MessageTemplate, ORIGINAL_FORMAT_KEY, TemplateError};
use crate::value::LogValue;
use std::fmt;
use std::iter::FusedIterator;
use std::sync::{Arc, OnceLock};

/// One `(key, value)` pair of a [`LogValues`] container.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LogPair<'a> {
    /// Placeholder name, or [`ORIGINAL_FORMAT_KEY`] for the trailing pair.
    pub key: &'a str,
    /// Bound value.
    pub value: &'a LogValue,
}

impl LogPair<'_> {
    /// Returns true for the synthetic `{OriginalFormat}` pair.
    #[must_use]
    pub fn is_original_format(&self) -> bool {
        self.key == ORIGINAL_FORMAT_KEY
    }
}

/// Immutable, ordered key/value payload of one log entry or scope.
///
/// Pairs follow placeholder declaration order and always end with the
/// `{OriginalFormat}` pair. The formatted text is rendered on first read and
/// cached; containers are `Send + Sync` and can be shared freely.
///
/// Equality is order-independent: two containers are equal when they hold the
/// same multiset of pairs.
pub struct LogValues {
    template: Arc<MessageTemplate>,
    values: Vec<LogValue>,
    formatted: OnceLock<String>,
}

impl LogValues {
    /// Bind positional `values`, rejecting a count that differs from the arity.
    ///
    /// This is the only way to build a container, so every container holds
    /// exactly one value per placeholder.
    pub fn try_new(
        template: Arc<MessageTemplate>,
        values: Vec<LogValue>,
    ) -> Result<Self, TemplateError> {
        template.ensure_arity(values.len())?;
        Ok(Self::bound_to(template, values))
    }

    fn bound_to(template: Arc<MessageTemplate>, values: Vec<LogValue>) -> Self {
        Self {
            template,
            values,
            formatted: OnceLock::new(),
        }
    }

    /// Compiled template that produced this container.
    #[must_use]
    pub fn template(&self) -> &MessageTemplate {
        &self.template
    }

    /// Template text as authored.
    #[must_use]
    pub fn original_format(&self) -> &str {
        self.template.text()
    }

    /// Positional argument values (without the format pair).
    #[must_use]
    pub fn values(&self) -> &[LogValue] {
        &self.values
    }

    /// Number of pairs, including `{OriginalFormat}`.
    #[must_use]
    pub fn len(&self) -> usize {
        self.bound() + 1
    }

    /// Always false: the `{OriginalFormat}` pair is always present.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        false
    }

    /// Pair at `index`; the last index is the `{OriginalFormat}` pair.
    #[must_use]
    pub fn get(&self, index: usize) -> Option<LogPair<'_>> {
        let bound = self.bound();
        if index < bound {
            let key = self.template.name(index)?;
            let value = self.values.get(index)?;
            Some(LogPair { key, value })
        } else if index == bound {
            Some(LogPair {
                key: ORIGINAL_FORMAT_KEY,
                value: self.template.original_value(),
            })
        } else {
            None
        }
    }

    /// First value bound to `key`.
    #[must_use]
    pub fn value_of(&self, key: &str) -> Option<&LogValue> {
        self.iter().find(|pair| pair.key == key).map(|pair| pair.value)
    }

    /// Iterate pairs in declaration order, `{OriginalFormat}` last.
    #[must_use]
    pub fn iter(&self) -> Pairs<'_> {
        Pairs {
            values: self,
            front: 0,
            back: self.len(),
        }
    }

    /// Human-readable text with every placeholder substituted.
    #[must_use]
    pub fn formatted(&self) -> &str {
        self.formatted
            .get_or_init(|| self.template.render(&self.values))
    }

    /// Copy of this container with every positional value replaced by `map`.
    ///
    /// The template is shared; the copy renders its own formatted text.
    #[must_use]
    pub fn map_values(&self, mut map: impl FnMut(&str, &LogValue) -> LogValue) -> Self {
        let values = self
            .iter()
            .filter(|pair| !pair.is_original_format())
            .map(|pair| map(pair.key, pair.value))
            .collect();
        Self::bound_to(Arc::clone(&self.template), values)
    }

    fn bound(&self) -> usize {
        self.values.len()
    }
}

impl Clone for LogValues {
    fn clone(&self) -> Self {
        Self {
            template: Arc::clone(&self.template),
            values: self.values.clone(),
            formatted: self.formatted.clone(),
        }
    }
}

impl PartialEq for LogValues {
    fn eq(&self, other: &Self) -> bool {
        if self.len() != other.len() {
            return false;
        }

        let mut unmatched: Vec<LogPair<'_>> = other.iter().collect();
        for pair in self {
            match unmatched.iter().position(|candidate| *candidate == pair) {
                Some(found) => {
                    unmatched.swap_remove(found);
                },
                None => return false,
            }
        }
        unmatched.is_empty()
    }
}

impl fmt::Display for LogValues {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter.write_str(self.formatted())
    }
}

impl fmt::Debug for LogValues {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter
            .debug_map()
            .entries(self.iter().map(|pair| (pair.key, pair.value)))
            .finish()
    }
}

impl<'a> IntoIterator for &'a LogValues {
    type Item = LogPair<'a>;
    type IntoIter = Pairs<'a>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// Iterator over the pairs of a [`LogValues`] container.
#[derive(Debug, Clone)]
pub struct Pairs<'a> {
    values: &'a LogValues,
    front: usize,
    back: usize,
}

impl<'a> Iterator for Pairs<'a> {
    type Item = LogPair<'a>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.front >= self.back {
            return None;
        }
        let pair = self.values.get(self.front)?;
        self.front += 1;
        Some(pair)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = self.back.saturating_sub(self.front);
        (remaining, Some(remaining))
    }
}

impl DoubleEndedIterator for Pairs<'_> {
    fn next_back(&mut self) -> Option<Self::Item> {
        if self.front >= self.back {
            return None;
        }
        self.back -= 1;
        self.values.get(self.back)
    }
}

impl ExactSizeIterator for Pairs<'_> {}

impl FusedIterator for Pairs<'_> {}
