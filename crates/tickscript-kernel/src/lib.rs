//! tickscript-kernel — validation and per-tick state for TAS script tools.
//!
//! A TAS script drives per-tick game input through named tools (`duck`,
//! `strafe`, `setang`, ...). This crate owns everything between the
//! tokenizer and the tick loop:
//!
//! ```text
//! tokens ──▶ matcher ──(schema lookup in registry)──▶ ToolMatch
//!                                                        │
//!                                          ┌─────────────┴───────────┐
//!                                  ActiveToolTracker         CheckCoordinator
//!                                  (durations, off,          (`check` only:
//!                                   priority ordering)        replay requests)
//! ```
//!
//! The registry is read-only after startup; the tracker and coordinator are
//! each owned by exactly one script execution. Everything is synchronous —
//! the host executor owns the tick loop and calls in once per script line
//! and once per tick.

pub mod check;
pub mod error;
pub mod matcher;
pub mod registry;
pub mod schema;
pub mod tracker;

pub use check::{CheckConfig, CheckCoordinator, CheckOutcome, CheckTarget};
pub use error::{MatchError, MatchResult};
pub use matcher::{match_args, match_invocation, ArgBinding, ArgValue, ToolMatch};
pub use registry::ToolRegistry;
pub use schema::{ArgNode, NodeKind, ToolSchema, Unit};
pub use tracker::ActiveToolTracker;
