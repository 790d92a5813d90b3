//! Excluded-path matching.
//!
//! # Responsibilities
//! - Recognise API routes (`/api/...`)
//! - Recognise framework-internal and public asset folders (`/_next/...`)
//! - Recognise bare root files (`/favicon.ico`, `/robots.txt`)
//!
//! # Design Decisions
//! - Each exclusion class is its own matcher so it can be tested alone
//! - Prefix matching is case-sensitive, like request paths
//! - No regex: the root-file check is a single left-to-right byte scan

use serde::Serialize;

use crate::config::ExclusionConfig;

/// Trait for matching request paths against a condition.
pub trait Matcher: Send + Sync + std::fmt::Debug {
    /// Returns true if the path matches this condition.
    fn matches(&self, path: &str) -> bool;
}

/// Why a path skipped tenant routing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Exclusion {
    /// API route.
    Api,
    /// Framework-internal or public asset folder.
    Internal,
    /// File directly under the web root.
    StaticFile,
}

impl Exclusion {
    pub fn as_str(&self) -> &'static str {
        match self {
            Exclusion::Api => "api",
            Exclusion::Internal => "internal",
            Exclusion::StaticFile => "static_file",
        }
    }
}

/// Matches any of a set of path prefixes.
#[derive(Debug, Clone)]
pub struct PathPrefixMatcher {
    prefixes: Vec<String>,
}

impl PathPrefixMatcher {
    /// Create a new prefix matcher.
    pub fn new<I, S>(prefixes: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            prefixes: prefixes.into_iter().map(Into::into).collect(),
        }
    }
}

impl Matcher for PathPrefixMatcher {
    fn matches(&self, path: &str) -> bool {
        self.prefixes.iter().any(|p| path.starts_with(p.as_str()))
    }
}

/// Matches paths whose first segment starts like a file name:
/// `[A-Za-z0-9_-]+` then `.` then a word character.
#[derive(Debug, Clone, Copy, Default)]
pub struct RootFileMatcher;

fn is_word(b: u8) -> bool {
    b.is_ascii_alphanumeric() || b == b'_'
}

impl Matcher for RootFileMatcher {
    fn matches(&self, path: &str) -> bool {
        let rest = match path.strip_prefix('/') {
            Some(rest) => rest.as_bytes(),
            None => return false,
        };

        let stem = rest.iter().take_while(|b| is_word(**b) || **b == b'-').count();
        if stem == 0 {
            return false;
        }

        rest.get(stem) == Some(&b'.') && rest.get(stem + 1).is_some_and(|b| is_word(*b))
    }
}

/// Ordered set of exclusion rules, checked before any tenant routing.
#[derive(Debug)]
pub struct ExclusionMatcher {
    rules: Vec<(Exclusion, Box<dyn Matcher>)>,
}

impl ExclusionMatcher {
    /// Compile the configured exclusion rules.
    pub fn from_config(config: &ExclusionConfig) -> Self {
        let mut rules: Vec<(Exclusion, Box<dyn Matcher>)> = vec![
            (
                Exclusion::Api,
                Box::new(PathPrefixMatcher::new(config.api_prefixes.iter().cloned())),
            ),
            (
                Exclusion::Internal,
                Box::new(PathPrefixMatcher::new(config.internal_prefixes.iter().cloned())),
            ),
        ];
        if config.root_files {
            rules.push((Exclusion::StaticFile, Box::new(RootFileMatcher)));
        }
        Self { rules }
    }

    /// Returns the first exclusion class the path falls into.
    pub fn check(&self, path: &str) -> Option<Exclusion> {
        self.rules
            .iter()
            .find(|(_, matcher)| matcher.matches(path))
            .map(|(exclusion, _)| *exclusion)
    }
}

impl Default for ExclusionMatcher {
    fn default() -> Self {
        Self::from_config(&ExclusionConfig::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_path_prefix_matcher() {
        let matcher = PathPrefixMatcher::new(["/api/"]);
        assert!(matcher.matches("/api/post"));
        assert!(matcher.matches("/api/"));
        assert!(!matcher.matches("/api"));
        assert!(!matcher.matches("/apis/x"));
        assert!(!matcher.matches("/API/post"));
    }

    #[test]
    fn test_root_file_matcher() {
        let m = RootFileMatcher;
        assert!(m.matches("/favicon.ico"));
        assert!(m.matches("/robots.txt"));
        assert!(m.matches("/og-image.v2.png"));
        assert!(m.matches("/sitemap.xml/extra"));

        assert!(!m.matches("/"));
        assert!(!m.matches("/about"));
        assert!(!m.matches("/.env"));
        assert!(!m.matches("/blog/cover.png"));
        assert!(!m.matches("/trailing."));
        assert!(!m.matches("/a.-b"));
        assert!(!m.matches("favicon.ico"));
    }

    #[test]
    fn default_rules_cover_each_class() {
        let m = ExclusionMatcher::default();
        assert_eq!(m.check("/api/subscription"), Some(Exclusion::Api));
        assert_eq!(m.check("/_next/static/chunk.js"), Some(Exclusion::Internal));
        assert_eq!(m.check("/_static/logo.svg"), Some(Exclusion::Internal));
        assert_eq!(m.check("/examples/demo"), Some(Exclusion::Internal));
        assert_eq!(m.check("/favicon.ico"), Some(Exclusion::StaticFile));

        assert_eq!(m.check("/"), None);
        assert_eq!(m.check("/login"), None);
        assert_eq!(m.check("/api"), None);
        assert_eq!(m.check("/post/42"), None);
    }

    #[test]
    fn root_files_can_be_disabled() {
        let config = ExclusionConfig {
            root_files: false,
            ..ExclusionConfig::default()
        };
        let m = ExclusionMatcher::from_config(&config);
        assert_eq!(m.check("/favicon.ico"), None);
        assert_eq!(m.check("/api/x"), Some(Exclusion::Api));
    }

    #[test]
    fn api_wins_over_root_file() {
        let m = ExclusionMatcher::default();
        assert_eq!(m.check("/api/report.csv"), Some(Exclusion::Api));
    }
}
