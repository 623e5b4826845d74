//! Core deterministic primitives.
//!
//! All types in this module are designed for perfect cross-platform determinism.
//! Table loading is the only code here that touches I/O.

pub mod error;
pub mod fixed;
pub mod ops;
pub mod tables;
pub mod trig;
pub mod bits;
mod lanes;
pub mod vec2;
pub mod vec3;
pub mod hash;

// Re-export core types
pub use error::{FixedError, FixedResult};
pub use fixed::{Fixed64, FIXED_ONE, FIXED_HALF, FIXED_SCALE};
pub use ops::{BinOp, Operand, Overflow};
pub use tables::{TableCell, TableError, TableKind, TableSet, TableSource, DirSource, MemorySource};
pub use bits::{Bits, Vec2Bits, Vec3Bits};
pub use vec2::FixedVec2;
pub use vec3::FixedVec3;
pub use hash::{kernel_digest, table_digest, TraceDigest};
