//! Routing subsystem.
//!
//! # Data Flow
//! ```text
//! navigate(path)
//!     → router.rs (sequence number, input checks)
//!     → table.rs (depth-first lookup)
//!     → pattern.rs (evaluate each declared segment)
//!     → view cache (resolve deferred views)
//!     → commit: swap current-route slot, notify listeners
//!
//! Table Compilation (at construction):
//!     RouteDef[]
//!     → Parse patterns
//!     → Assign route ids in declaration order
//!     → Freeze as immutable RouteTable
//! ```
//!
//! # Design Decisions
//! - Table compiled at construction, immutable at runtime
//! - No regex in the match path (typed segments only)
//! - Deterministic: same path against the same table and loader state
//!   resolves to the same route
//! - First match wins, in declaration order

pub mod pattern;
pub mod router;
pub mod table;
