//! Fuzzy profile name resolution.
//!
//! A query is matched against the stored names in three passes, each over the
//! names sorted ascending so ties always go to the lexicographically first name:
//!
//! 1. exact match
//! 2. names starting with the query
//! 3. names containing the query anywhere
//!
//! The query is matched literally. Characters like `.` or `*` only match
//! themselves; there is no pattern syntax.

/// Resolve `query` to one of `names`, or `None` if nothing matches.
pub fn resolve<S: AsRef<str>>(query: &str, names: &[S]) -> Option<String> {
    let mut sorted: Vec<&str> = names.iter().map(AsRef::as_ref).collect();
    sorted.sort_unstable();

    sorted
        .iter()
        .find(|name| **name == query)
        .or_else(|| sorted.iter().find(|name| name.starts_with(query)))
        .or_else(|| sorted.iter().find(|name| name.contains(query)))
        .map(|name| name.to_string())
}
