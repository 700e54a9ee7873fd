//! Shared types and diagnostics used across the cubefield crates.
//!
//! # Invariants
//! - `Vertex` layout is `#[repr(C)]` and byte-castable; the GPU attribute
//!   wiring in the render crate depends on field order staying fixed.

pub mod timer;
pub mod vertex;

pub use timer::ScopedTimer;
pub use vertex::Vertex;
