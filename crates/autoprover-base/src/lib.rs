//! Shared substrate for the autoprover workspace.
//!
//! This crate has no dependency on any of `autoprover-term`,
//! `autoprover-completion`, `autoprover-clausal`, or
//! `autoprover-resolution` — it provides only the small pieces those
//! crates all need: symbol interning, a scratch arena, and the
//! library-wide error type.

mod arena;
mod error;
mod intern;

pub use arena::Arena;
pub use error::{EngineError, Result};
pub use intern::{Interner, Symbol};
