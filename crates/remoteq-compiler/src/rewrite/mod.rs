//! Cross-type expression rewriting.
//!
//! Replays an expression authored against one element type on a
//! structurally compatible type: every static type is substituted and
//! entity members are looked up again by name on the new type.

mod rewriter;


pub use rewriter::{Rewriter, rewrite};
