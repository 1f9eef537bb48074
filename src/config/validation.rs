//! Route table validation.
//!
//! # Responsibilities
//! - Semantic validation (serde handles syntactic)
//! - Enforce sibling uniqueness: no two siblings may declare the same
//!   literal path
//! - Check pattern syntax and reject routes that can never resolve
//! - Validate the unmatched-path policy
//!
//! # Design Decisions
//! - Returns all validation errors, not just the first
//! - Validation is a pure function over the declared table
//! - Runs before a table is accepted into a Router

use std::collections::HashSet;

use crate::config::schema::RouterConfig;
use crate::routing::pattern::{PatternError, RoutePattern};
use crate::routing::table::RouteDef;

/// A single semantic defect in a declared route table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    /// A path pattern failed to parse.
    Pattern(PatternError),

    /// Two siblings declare the same literal path; only the first can
    /// ever match.
    DuplicateSibling { path: String },

    /// A route with no view and no children can never resolve.
    ViewlessLeaf { path: String },

    /// `strict_match = false` requires a fallback view.
    MissingFallback,
}

impl std::fmt::Display for ValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ValidationError::Pattern(e) => write!(f, "{}", e),
            ValidationError::DuplicateSibling { path } => {
                write!(f, "duplicate sibling path {:?}", path)
            }
            ValidationError::ViewlessLeaf { path } => {
                write!(f, "route {:?} has neither a view nor children", path)
            }
            ValidationError::MissingFallback => {
                write!(f, "strict_match = false requires fallback_view")
            }
        }
    }
}

impl std::error::Error for ValidationError {}

impl From<PatternError> for ValidationError {
    fn from(e: PatternError) -> Self {
        ValidationError::Pattern(e)
    }
}

/// Validate a declarative route table.
pub fn validate_config(config: &RouterConfig) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();

    if !config.strict_match && config.fallback_view.is_none() {
        errors.push(ValidationError::MissingFallback);
    }

    let defs: Vec<RouteDef> = config.routes.iter().map(RouteDef::from).collect();
    collect_errors(&defs, &mut errors);

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

/// Validate a programmatic route tree.
pub fn validate_defs(defs: &[RouteDef]) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();
    collect_errors(defs, &mut errors);
    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

fn collect_errors(defs: &[RouteDef], errors: &mut Vec<ValidationError>) {
    let mut literals = HashSet::new();

    for def in defs {
        match RoutePattern::parse(def.path()) {
            Ok(pattern) => {
                if pattern.is_literal() && !literals.insert(pattern.canonical()) {
                    errors.push(ValidationError::DuplicateSibling {
                        path: def.path().to_string(),
                    });
                }
            }
            Err(e) => errors.push(ValidationError::Pattern(e)),
        }

        if !def.has_view() && def.children().is_empty() {
            errors.push(ValidationError::ViewlessLeaf {
                path: def.path().to_string(),
            });
        }

        collect_errors(def.children(), errors);
    }
}
