//! Assertion helpers for structured payloads.

use logmsg_domain::{LogValue, LogValues, ToLogValue};
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

/// Assert that `actual` holds exactly the `expected` pairs, in any order.
///
/// `expected` must list the `{OriginalFormat}` pair too. Pairs are compared
/// after a stable sort by key, so repeated keys keep their positional order.
#[track_caller]
pub fn assert_log_values(actual: &LogValues, expected: &[(&str, LogValue)]) {
    let mut actual_pairs: Vec<(String, LogValue)> = actual
        .iter()
        .map(|pair| (pair.key.to_string(), pair.value.clone()))
        .collect();
    let mut expected_pairs: Vec<(String, LogValue)> = expected
        .iter()
        .map(|(key, value)| ((*key).to_string(), value.clone()))
        .collect();

    actual_pairs.sort_by(|left, right| left.0.cmp(&right.0));
    expected_pairs.sort_by(|left, right| left.0.cmp(&right.0));

    assert_eq!(
        actual_pairs, expected_pairs,
        "structured values differ for \"{}\"",
        actual.original_format()
    );
}

/// A value that counts how often it is captured.
///
/// Lets tests observe whether a definition built its payload at all.
#[derive(Debug, Clone, Default)]
pub struct CountingValue {
    captures: Arc<AtomicUsize>,
}

impl CountingValue {
    /// Create a value with a fresh counter.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of captures across this value and its clones.
    pub fn captures(&self) -> usize {
        self.captures.load(Ordering::SeqCst)
    }
}

impl ToLogValue for CountingValue {
    fn to_log_value(&self) -> LogValue {
        let previous = self.captures.fetch_add(1, Ordering::SeqCst);
        LogValue::UInt(u64::try_from(previous + 1).unwrap_or(u64::MAX))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use logmsg_domain::{MessageTemplate, ORIGINAL_FORMAT_KEY};

    #[test]
    fn pairs_compare_in_any_order() {
        let template = MessageTemplate::cached("{b} {a}").unwrap();
        let values = LogValues::try_new(template, vec![LogValue::Int(2), LogValue::Int(1)]).unwrap();

        assert_log_values(
            &values,
            &[
                (ORIGINAL_FORMAT_KEY, LogValue::Str("{b} {a}".into())),
                ("a", LogValue::Int(1)),
                ("b", LogValue::Int(2)),
            ],
        );
    }

    #[test]
    #[should_panic(expected = "structured values differ")]
    fn missing_format_pair_fails() {
        let template = MessageTemplate::cached("{a}").unwrap();
        let values = LogValues::try_new(template, vec![LogValue::Int(1)]).unwrap();
        assert_log_values(&values, &[("a", LogValue::Int(1))]);
    }

    #[test]
    fn counting_value_shares_its_counter() {
        let value = CountingValue::new();
        let copy = value.clone();
        assert_eq!(copy.to_log_value(), LogValue::UInt(1));
        assert_eq!(value.captures(), 1);
    }
}
