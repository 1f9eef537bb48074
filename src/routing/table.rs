//! Route table construction and lookup.
//!
//! # Responsibilities
//! - Compile declared routes into an immutable tree
//! - Look up the route matching a concrete path
//! - Bind path parameters along the way
//!
//! # Design Decisions
//! - Compiled once at construction, immutable at runtime
//! - Depth-first, declaration order, first match wins
//! - Selection commits: a matched subtree that dead-ends fails the
//!   whole lookup rather than falling through to later siblings
//! - Explicit `None` on no match rather than a silent default

use std::collections::HashMap;
use std::sync::Arc;

use crate::config::schema::RouteSpec;
use crate::config::validation::{self, ValidationError};
use crate::routing::pattern::{normalize_path, split_path, PatternError, RoutePattern};
use crate::view::loader::{ViewId, ViewLoader, ViewRef};

/// Stable identifier of a compiled route, assigned in declaration order.
/// Keys the view-load cache.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct RouteId(u32);

impl RouteId {
    pub fn new(id: u32) -> Self {
        Self(id)
    }
}

/// A route declaration, possibly nested.
///
/// Child paths are relative to the parent. A definition without a view
/// only groups children; matching it exactly fails the navigation.
#[derive(Debug)]
pub struct RouteDef {
    path: String,
    view: Option<ViewRef>,
    children: Vec<RouteDef>,
}

impl RouteDef {
    pub fn new(path: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            view: None,
            children: Vec::new(),
        }
    }

    /// Attach an eagerly-available view.
    pub fn view(mut self, id: impl Into<ViewId>) -> Self {
        self.view = Some(ViewRef::Eager(id.into()));
        self
    }

    /// Attach a deferred view loader.
    pub fn lazy<L: ViewLoader + 'static>(mut self, loader: L) -> Self {
        self.view = Some(ViewRef::Deferred(Arc::new(loader)));
        self
    }

    /// Append a nested route, matched relative to this one.
    pub fn child(mut self, child: RouteDef) -> Self {
        self.children.push(child);
        self
    }

    pub fn path(&self) -> &str {
        &self.path
    }

    pub fn children(&self) -> &[RouteDef] {
        &self.children
    }

    pub fn has_view(&self) -> bool {
        self.view.is_some()
    }
}

impl From<&RouteSpec> for RouteDef {
    fn from(spec: &RouteSpec) -> Self {
        Self {
            path: spec.path.clone(),
            view: spec
                .view
                .as_ref()
                .map(|v| ViewRef::Eager(v.as_str().into())),
            children: spec.children.iter().map(RouteDef::from).collect(),
        }
    }
}

/// Outcome of a successful table lookup.
#[derive(Debug, Clone)]
pub struct RouteMatch {
    pub route_id: RouteId,
    pub matched_path: String,
    pub params: HashMap<String, String>,
    pub(crate) view: ViewRef,
}

#[derive(Debug)]
struct RouteNode {
    pattern: RoutePattern,
    view: Option<ViewRef>,
    id: RouteId,
    children: Vec<RouteNode>,
}

/// An immutable, compiled route table.
#[derive(Debug)]
pub struct RouteTable {
    roots: Vec<RouteNode>,
    route_count: u32,
}

impl RouteTable {
    /// Validate and compile a declared route tree.
    pub fn new(defs: Vec<RouteDef>) -> Result<Self, Vec<ValidationError>> {
        validation::validate_defs(&defs)?;
        Self::compile(defs).map_err(|e| vec![ValidationError::from(e)])
    }

    /// Compile without validation.
    ///
    /// Declaration-order semantics still hold for tables that violate the
    /// sibling-uniqueness invariant, which tests rely on.
    pub(crate) fn compile(defs: Vec<RouteDef>) -> Result<Self, PatternError> {
        let mut next_id = 0u32;
        let roots = defs
            .into_iter()
            .map(|def| Self::compile_node(def, &mut next_id))
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Self {
            roots,
            route_count: next_id,
        })
    }

    fn compile_node(def: RouteDef, next_id: &mut u32) -> Result<RouteNode, PatternError> {
        let pattern = RoutePattern::parse(&def.path)?;
        let id = RouteId(*next_id);
        *next_id += 1;
        let children = def
            .children
            .into_iter()
            .map(|child| Self::compile_node(child, next_id))
            .collect::<Result<Vec<_>, _>>()?;
        Ok(RouteNode {
            pattern,
            view: def.view,
            id,
            children,
        })
    }

    /// Number of compiled routes, grouping-only nodes included.
    pub fn len(&self) -> usize {
        self.route_count as usize
    }

    pub fn is_empty(&self) -> bool {
        self.route_count == 0
    }

    /// Match `path` against the table.
    ///
    /// Returns the matched leaf with its bound parameters, or `None` when
    /// no declared route matches.
    pub fn lookup(&self, path: &str) -> Option<RouteMatch> {
        let segments = split_path(path);
        let mut params = HashMap::new();
        let node = Self::find(&self.roots, &segments, &mut params)?;
        let view = node.view.clone()?;
        let matched_path = normalize_path(path);

        Some(RouteMatch {
            route_id: node.id,
            matched_path,
            params,
            view,
        })
    }

    fn find<'a>(
        nodes: &'a [RouteNode],
        segments: &[&str],
        params: &mut HashMap<String, String>,
    ) -> Option<&'a RouteNode> {
        for node in nodes {
            let Some(prefix) = node.pattern.match_prefix(segments) else {
                continue;
            };
            let rest = &segments[prefix.consumed..];

            // A node that consumes nothing further is only a candidate
            // when it can delegate the rest to children.
            if !rest.is_empty() && node.children.is_empty() {
                continue;
            }

            for (name, value) in prefix.params {
                params.insert(name, value);
            }

            if rest.is_empty() {
                if node.view.is_some() {
                    return Some(node);
                }
                // Grouping node matched exactly: only a default child
                // (empty pattern) can still supply a view.
                return Self::find(&node.children, rest, params);
            }
            return Self::find(&node.children, rest, params);
        }
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::view::loader::ViewId;

    fn demo_defs() -> Vec<RouteDef> {
        vec![
            RouteDef::new("/").view("Home"),
            RouteDef::new("/data")
                .view("DataManage")
                .child(RouteDef::new("table").view("Dummy"))
                .child(RouteDef::new("import").view("Dummy"))
                .child(RouteDef::new("export").view("Dummy"))
                .child(RouteDef::new("stat").view("Dummy")),
        ]
    }

    fn eager(m: &RouteMatch) -> ViewId {
        match &m.view {
            ViewRef::Eager(id) => id.clone(),
            ViewRef::Deferred(_) => panic!("expected eager view"),
        }
    }

    #[test]
    fn test_lookup_root() {
        let table = RouteTable::new(demo_defs()).unwrap();
        let m = table.lookup("/").unwrap();
        assert_eq!(m.matched_path, "/");
        assert_eq!(eager(&m), ViewId::new("Home"));
        assert!(m.params.is_empty());
    }

    #[test]
    fn test_lookup_nested_child() {
        let table = RouteTable::new(demo_defs()).unwrap();
        let m = table.lookup("/data/table").unwrap();
        assert_eq!(m.matched_path, "/data/table");
        assert_eq!(eager(&m), ViewId::new("Dummy"));
    }

    #[test]
    fn test_lookup_parent_with_children() {
        let table = RouteTable::new(demo_defs()).unwrap();
        let m = table.lookup("/data").unwrap();
        assert_eq!(eager(&m), ViewId::new("DataManage"));
    }

    #[test]
    fn test_lookup_unknown_child_fails() {
        let table = RouteTable::new(demo_defs()).unwrap();
        assert!(table.lookup("/data/unknown").is_none());
        assert!(table.lookup("/nope").is_none());
    }

    #[test]
    fn test_first_match_wins_on_duplicate_siblings() {
        // Intentionally ill-formed: two siblings share a literal path.
        // Built through the unvalidated path to pin declaration-order
        // semantics.
        let table = RouteTable::compile(vec![
            RouteDef::new("/dup").view("First"),
            RouteDef::new("/dup").view("Second"),
        ])
        .unwrap();
        let m = table.lookup("/dup").unwrap();
        assert_eq!(eager(&m), ViewId::new("First"));
    }

    #[test]
    fn test_param_binding() {
        let table = RouteTable::new(vec![RouteDef::new("/users/:id").view("Profile")]).unwrap();
        let m = table.lookup("/users/42").unwrap();
        assert_eq!(m.params.get("id").map(String::as_str), Some("42"));
        assert_eq!(m.matched_path, "/users/42");
    }

    #[test]
    fn test_catch_all_binding() {
        let table = RouteTable::new(vec![
            RouteDef::new("/").view("Home"),
            RouteDef::new("/docs/*path").view("Docs"),
        ])
        .unwrap();
        let m = table.lookup("/docs/guide/install").unwrap();
        assert_eq!(
            m.params.get("path").map(String::as_str),
            Some("guide/install")
        );
    }

    #[test]
    fn test_grouping_node_exact_match_fails() {
        let table = RouteTable::new(vec![RouteDef::new("/admin")
            .child(RouteDef::new("users").view("AdminUsers"))])
        .unwrap();
        assert!(table.lookup("/admin").is_none());
        assert!(table.lookup("/admin/users").is_some());
    }

    #[test]
    fn test_default_child_supplies_view() {
        let table = RouteTable::new(vec![RouteDef::new("/settings")
            .child(RouteDef::new("/").view("SettingsHome"))
            .child(RouteDef::new("profile").view("Profile"))])
        .unwrap();
        let m = table.lookup("/settings").unwrap();
        assert_eq!(eager(&m), ViewId::new("SettingsHome"));
    }

    #[test]
    fn test_leaf_root_does_not_shadow_siblings() {
        let table = RouteTable::new(demo_defs()).unwrap();
        // "/" is declared first; it must not swallow "/data".
        let m = table.lookup("/data/import").unwrap();
        assert_eq!(m.matched_path, "/data/import");
    }

    #[test]
    fn test_trailing_slash_and_query_normalized() {
        let table = RouteTable::new(demo_defs()).unwrap();
        let m = table.lookup("/data/table/?tab=2").unwrap();
        assert_eq!(m.matched_path, "/data/table");
    }
}
