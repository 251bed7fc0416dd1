//! Domain-specific assertion macros for unisearch harnesses.
//!
//! These wrap `pretty_assertions` and add failure messages that say which
//! record or field broke the expectation.

use unisearch_core::Record;

// ---------------------------------------------------------------------------
// Field assertions
// ---------------------------------------------------------------------------

/// Assert that a `Record` has a field with an expected rendered value.
///
/// ```rust
/// assert_has_field!(record, "name", "George Harris");
/// assert_has_field!(record, "salary", "90000");
/// ```
#[macro_export]
macro_rules! assert_has_field {
    ($record:expr, $key:expr, $value:expr) => {{
        let record: &unisearch_core::Record = &$record;
        let key: &str = $key;
        let expected: &str = $value;
        match record.get(key) {
            Some(actual) if actual.render() == expected => {}
            Some(actual) => panic!(
                "assert_has_field! failed:\n  record[{:?}]\n  expected: {}\n  actual:   {}",
                key,
                expected,
                actual.render()
            ),
            None => panic!(
                "assert_has_field! failed: field {:?} not found in record.\n  Available fields: {:?}",
                key,
                record.field_names().collect::<Vec<_>>()
            ),
        }
    }};
}

// ---------------------------------------------------------------------------
// Result set assertions
// ---------------------------------------------------------------------------

/// Assert that every record in a result set satisfies a predicate.
///
/// ```rust
/// assert_results_all!(results, |r: &Record| r.get("building").is_some());
/// ```
#[macro_export]
macro_rules! assert_results_all {
    ($results:expr, $pred:expr) => {{
        let results: &[&unisearch_core::Record] = &$results;
        let pred = $pred;
        let failing: Vec<_> = results.iter().filter(|r| !pred(**r)).collect();
        if !failing.is_empty() {
            panic!(
                "assert_results_all! failed: {} of {} records did not satisfy predicate.\n  first: {:?}",
                failing.len(),
                results.len(),
                failing[0]
            );
        }
    }};
}

/// Assert that a result set holds exactly the records with the given `id`-like
/// key values, in order.
///
/// ```rust
/// assert_result_keys!(results, "courseId", ["CS101", "CS102"]);
/// ```
#[macro_export]
macro_rules! assert_result_keys {
    ($results:expr, $key:expr, [$($expected:expr),* $(,)?]) => {{
        let results: &[&unisearch_core::Record] = &$results;
        let key: &str = $key;
        let actual: Vec<String> = results
            .iter()
            .map(|r| r.get(key).map(|v| v.render()).unwrap_or_default())
            .collect();
        let expected: Vec<String> = vec![$($expected.to_string()),*];
        pretty_assertions::assert_eq!(actual, expected, "result keys for field {:?}", key);
    }};
}

// ---------------------------------------------------------------------------
// Invariant helpers
// ---------------------------------------------------------------------------

/// True when `needle` is an order-preserving subsequence of `haystack`,
/// compared by record identity.
pub fn is_subsequence(needle: &[&Record], haystack: &[Record]) -> bool {
    let mut rest = haystack.iter();
    needle
        .iter()
        .all(|want| rest.any(|have| std::ptr::eq(*want, have)))
}

/// True when some field of `record`, rendered and lowercased, contains the
/// lowercased `query`.
pub fn any_field_contains(record: &Record, query: &str) -> bool {
    let folded = query.to_ascii_lowercase();
    record
        .values()
        .any(|v| v.render().to_ascii_lowercase().contains(&folded))
}
