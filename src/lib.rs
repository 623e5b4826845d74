//! # Lockstep Math
//!
//! Deterministic Q48.16 fixed-point kernel for lockstep simulation, with
//! table-driven trigonometry and square root.
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │                      LOCKSTEP MATH                           │
//! ├─────────────────────────────────────────────────────────────┤
//! │  core/           - Deterministic primitives                  │
//! │  ├── fixed.rs    - Q48.16 scalar and constants               │
//! │  ├── ops.rs      - Wrapping and checked arithmetic engine    │
//! │  ├── tables.rs   - Binary lookup tables, one-time install    │
//! │  ├── trig.rs     - sin/cos/tan/asin/acos/sqrt via tables     │
//! │  ├── bits.rs     - Raw bit view of vector lanes              │
//! │  ├── vec2.rs     - 2D vector                                 │
//! │  ├── vec3.rs     - 3D vector                                 │
//! │  ├── hash.rs     - Determinism digests                       │
//! │  └── error.rs    - Error types                               │
//! │                                                              │
//! │  config.rs       - Environment configuration for the binary  │
//! └─────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Determinism Guarantee
//!
//! Every operation in `core/` is pure integer arithmetic over the raw
//! representation plus lookups into immutable tables. Floating point is
//! only used to author tables and to convert values for display.
//!
//! Given identical tables and inputs, the kernel produces **identical
//! bits** on any platform of the same endianness.

#![warn(missing_docs)]
#![warn(clippy::all)]
#![deny(unsafe_code)]

pub mod config;
pub mod core;

// Re-export commonly used types
pub use crate::config::KernelConfig;
pub use crate::core::error::{FixedError, FixedResult};
pub use crate::core::fixed::{Fixed64, FIXED_HALF, FIXED_ONE, FIXED_SCALE};
pub use crate::core::hash::{kernel_digest, table_digest, TraceDigest};
pub use crate::core::tables::{DirSource, MemorySource, TableCell, TableError, TableKind, TableSet, TableSource};
pub use crate::core::vec2::FixedVec2;
pub use crate::core::vec3::FixedVec3;

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
