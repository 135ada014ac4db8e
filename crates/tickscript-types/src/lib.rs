//! Pure data types for tickscript — source spans, tokens, active tools,
//! player state.
//!
//! This crate is a leaf dependency with no I/O and no parser. It exists so
//! that hosts (an editor language server, a replay executor) can consume
//! tickscript's diagnostics and active-tool listings without pulling in the
//! kernel's matching machinery.

pub mod player;
pub mod span;
pub mod token;
pub mod tool;

// Flat re-exports for convenience
pub use player::*;
pub use span::*;
pub use token::*;
pub use tool::*;
