/// Core sequentializing logic.
///
/// Contains the top-level compile entry point, the recursive tree walk,
/// and the per-variable generation bookkeeping.
pub mod core;

/// Compiled statement records.
///
/// Defines the structured statement type the compiler appends to its
/// output buffer, and the final textual rendering step.
pub mod code;

pub use code::{Statement, render};
pub use core::compile_top;
