//! Path pattern parsing and segment matching.
//!
//! # Responsibilities
//! - Parse declared patterns into typed segments
//! - Match a pattern against the leading segments of a concrete path
//! - Bind parameter and catch-all values
//!
//! # Design Decisions
//! - Literal matching is case-sensitive
//! - No regex, so matching stays O(segments)
//! - A parameter (`:name`) matches exactly one non-empty segment
//! - A catch-all (`*` / `*name`) is only valid as the final segment and
//!   consumes the entire remaining suffix, empty included

use thiserror::Error;

/// One segment of a declared route pattern.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Segment {
    Literal(String),
    Param(String),
    CatchAll(Option<String>),
}

/// A pattern that failed to parse.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("invalid pattern {pattern:?}: {reason}")]
pub struct PatternError {
    pattern: String,
    reason: &'static str,
}

impl PatternError {
    fn new(pattern: &str, reason: &'static str) -> Self {
        Self {
            pattern: pattern.to_string(),
            reason,
        }
    }
}

/// A successful prefix match: how many path segments were consumed and
/// which parameters were bound along the way.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PrefixMatch {
    pub consumed: usize,
    pub params: Vec<(String, String)>,
}

/// A parsed route pattern.
///
/// The root pattern `/` parses to zero segments; child patterns are
/// relative and never start with `/` in practice, though a leading or
/// trailing slash is tolerated.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RoutePattern {
    raw: String,
    segments: Vec<Segment>,
}

impl RoutePattern {
    pub fn parse(pattern: &str) -> Result<Self, PatternError> {
        let trimmed = pattern.trim_matches('/');
        let mut segments = Vec::new();

        if !trimmed.is_empty() {
            let parts: Vec<&str> = trimmed.split('/').collect();
            for (i, part) in parts.iter().enumerate() {
                if part.is_empty() {
                    return Err(PatternError::new(pattern, "empty segment"));
                }
                if let Some(name) = part.strip_prefix(':') {
                    if name.is_empty() {
                        return Err(PatternError::new(pattern, "parameter segment needs a name"));
                    }
                    segments.push(Segment::Param(name.to_string()));
                } else if let Some(name) = part.strip_prefix('*') {
                    if i != parts.len() - 1 {
                        return Err(PatternError::new(
                            pattern,
                            "catch-all must be the final segment",
                        ));
                    }
                    let name = (!name.is_empty()).then(|| name.to_string());
                    segments.push(Segment::CatchAll(name));
                } else {
                    segments.push(Segment::Literal(part.to_string()));
                }
            }
        }

        Ok(Self {
            raw: pattern.to_string(),
            segments,
        })
    }

    pub fn raw(&self) -> &str {
        &self.raw
    }

    pub fn segments(&self) -> &[Segment] {
        &self.segments
    }

    /// True when every segment is a literal.
    pub fn is_literal(&self) -> bool {
        self.segments
            .iter()
            .all(|s| matches!(s, Segment::Literal(_)))
    }

    /// Canonical form: segments re-joined without surrounding slashes.
    /// Used to compare sibling declarations independent of slash style.
    pub fn canonical(&self) -> String {
        let parts: Vec<String> = self
            .segments
            .iter()
            .map(|s| match s {
                Segment::Literal(lit) => lit.clone(),
                Segment::Param(name) => format!(":{name}"),
                Segment::CatchAll(Some(name)) => format!("*{name}"),
                Segment::CatchAll(None) => "*".to_string(),
            })
            .collect();
        parts.join("/")
    }

    /// Match this pattern against the leading segments of `path`.
    ///
    /// Returns how much of the path the pattern consumed, or `None` when
    /// any segment fails to match. Bindings are only reported for a full
    /// pattern match.
    pub fn match_prefix(&self, path: &[&str]) -> Option<PrefixMatch> {
        let mut consumed = 0;
        let mut params = Vec::new();

        for segment in &self.segments {
            match segment {
                Segment::Literal(lit) => match path.get(consumed) {
                    Some(p) if *p == lit.as_str() => consumed += 1,
                    _ => return None,
                },
                Segment::Param(name) => match path.get(consumed) {
                    Some(p) if !p.is_empty() => {
                        params.push((name.clone(), (*p).to_string()));
                        consumed += 1;
                    }
                    _ => return None,
                },
                Segment::CatchAll(name) => {
                    if let Some(name) = name {
                        params.push((name.clone(), path[consumed..].join("/")));
                    }
                    consumed = path.len();
                }
            }
        }

        Some(PrefixMatch { consumed, params })
    }
}

/// Canonical form of a concrete path: query/fragment dropped, slashes
/// collapsed, root spelled `/`.
pub(crate) fn normalize_path(path: &str) -> String {
    let segments = split_path(path);
    if segments.is_empty() {
        "/".to_string()
    } else {
        format!("/{}", segments.join("/"))
    }
}

/// Split a concrete path into segments, dropping any query or fragment
/// suffix and collapsing surrounding slashes. The root path yields no
/// segments.
pub(crate) fn split_path(path: &str) -> Vec<&str> {
    let stripped = path
        .split(|c| c == '?' || c == '#')
        .next()
        .unwrap_or_default();
    stripped
        .split('/')
        .filter(|s| !s.is_empty())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_root_is_empty() {
        let p = RoutePattern::parse("/").unwrap();
        assert!(p.segments().is_empty());
        assert!(p.is_literal());
    }

    #[test]
    fn test_parse_kinds() {
        let p = RoutePattern::parse("/users/:id/files/*rest").unwrap();
        assert_eq!(
            p.segments(),
            &[
                Segment::Literal("users".into()),
                Segment::Param("id".into()),
                Segment::Literal("files".into()),
                Segment::CatchAll(Some("rest".into())),
            ]
        );
        assert_eq!(p.canonical(), "users/:id/files/*rest");
    }

    #[test]
    fn test_parse_rejects_misplaced_catch_all() {
        assert!(RoutePattern::parse("*rest/more").is_err());
        assert!(RoutePattern::parse("/a//b").is_err());
        assert!(RoutePattern::parse(":").is_err());
    }

    #[test]
    fn test_match_literal_prefix() {
        let p = RoutePattern::parse("/data").unwrap();
        let m = p.match_prefix(&["data", "table"]).unwrap();
        assert_eq!(m.consumed, 1);
        assert!(m.params.is_empty());
        assert!(p.match_prefix(&["import"]).is_none());
    }

    #[test]
    fn test_match_binds_params() {
        let p = RoutePattern::parse("users/:id").unwrap();
        let m = p.match_prefix(&["users", "42"]).unwrap();
        assert_eq!(m.consumed, 2);
        assert_eq!(m.params, vec![("id".to_string(), "42".to_string())]);
    }

    #[test]
    fn test_match_catch_all_consumes_rest() {
        let p = RoutePattern::parse("docs/*path").unwrap();
        let m = p.match_prefix(&["docs", "a", "b"]).unwrap();
        assert_eq!(m.consumed, 3);
        assert_eq!(m.params, vec![("path".to_string(), "a/b".to_string())]);

        let empty = p.match_prefix(&["docs"]).unwrap();
        assert_eq!(empty.consumed, 1);
        assert_eq!(empty.params, vec![("path".to_string(), String::new())]);
    }

    #[test]
    fn test_failed_match_reports_no_bindings() {
        let p = RoutePattern::parse(":section/table").unwrap();
        assert!(p.match_prefix(&["data", "import"]).is_none());
    }

    #[test]
    fn test_split_path() {
        assert!(split_path("/").is_empty());
        assert_eq!(split_path("/data/table/"), vec!["data", "table"]);
        assert_eq!(split_path("/data?tab=1#top"), vec!["data"]);
    }
}
