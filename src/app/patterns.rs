use globset::Glob;
use std::collections::HashSet;

/// Baseline ignore patterns every migrated configuration starts with.
pub const DEFAULT_IGNORES: &[&str] = &["dist/", "**/node_modules/"];

/// Ordered, de-duplicated list of ignore globs. The first occurrence of a
/// pattern fixes its position; later duplicates are dropped.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PatternSet {
    patterns: Vec<String>,
    seen: HashSet<String>,
}

impl PatternSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns `false` if the pattern was already present.
    pub fn insert(&mut self, pattern: impl Into<String>) -> bool {
        let pattern = pattern.into();
        if self.seen.contains(&pattern) {
            return false;
        }
        self.seen.insert(pattern.clone());
        self.patterns.push(pattern);
        true
    }

    pub fn extend<I, S>(&mut self, patterns: I)
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        for pattern in patterns {
            self.insert(pattern);
        }
    }

    pub fn into_vec(self) -> Vec<String> {
        self.patterns
    }

    /// Patterns that do not compile as globs. They are kept in the set since
    /// the linter has its own matcher, but callers may want to flag them.
    pub fn invalid_patterns(&self) -> Vec<&str> {
        self.patterns
            .iter()
            .filter(|p| Glob::new(p).is_err())
            .map(String::as_str)
            .collect()
    }
}

impl<S: Into<String>> FromIterator<S> for PatternSet {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        let mut set = PatternSet::new();
        set.extend(iter);
        set
    }
}

/// Baseline, then inline legacy patterns, then ignore-file patterns.
pub fn normalize(baseline: &[String], inline: &[String], from_file: &[String]) -> Vec<String> {
    let mut set = PatternSet::new();
    set.extend(baseline.iter().cloned());
    set.extend(inline.iter().cloned());
    set.extend(from_file.iter().cloned());

    for pattern in set.invalid_patterns() {
        log::warn!("Ignore pattern {:?} is not a valid glob", pattern);
    }
    set.into_vec()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn strings(items: &[&str]) -> Vec<String> {
        items.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_normalize_collapses_duplicates_to_first_occurrence() {
        let result = normalize(
            &strings(&["dist/", "**/node_modules/"]),
            &strings(&["dist/"]),
            &strings(&["build/", "dist/"]),
        );
        assert_eq!(result, strings(&["dist/", "**/node_modules/", "build/"]));
    }

    #[test]
    fn test_normalize_is_stable_across_runs() {
        let baseline = strings(DEFAULT_IGNORES);
        let inline = strings(&["site", "packages/version"]);
        let file = strings(&["coverage/", "site"]);
        assert_eq!(
            normalize(&baseline, &inline, &file),
            normalize(&baseline, &inline, &file)
        );
    }

    #[test]
    fn test_duplicates_within_one_source() {
        let result = normalize(&[], &strings(&["a", "b", "a"]), &[]);
        assert_eq!(result, strings(&["a", "b"]));
    }

    #[test]
    fn test_insert_reports_duplicates() {
        let mut set = PatternSet::new();
        assert!(set.insert("dist/"));
        assert!(!set.insert("dist/"));
        assert_eq!(set.into_vec(), vec!["dist/"]);
    }

    #[test]
    fn test_invalid_globs_are_kept_but_reported() {
        let set: PatternSet = ["ok/**", "broken/[", "fine"].into_iter().collect();
        assert_eq!(set.invalid_patterns(), vec!["broken/["]);
        assert_eq!(set.into_vec().len(), 3);
    }
}
