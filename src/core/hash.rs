//! Determinism Digests
//!
//! Provides SHA-256 digests over kernel outputs for:
//! - Checking that two machines compute bit-identical results
//! - Checking that two machines loaded identical table files
//! - Pinning a trace so regressions in the kernel show up as a changed digest

use sha2::{Digest, Sha256};

use super::error::{FixedError, FixedResult};
use super::fixed::Fixed64;
use super::tables::{TableKind, TableSet};
use super::vec2::FixedVec2;
use super::vec3::FixedVec3;

/// Digest output type (256 bits / 32 bytes)
pub type TraceDigest = [u8; 32];

/// Raw step between consecutive sweep inputs.
const SWEEP_STEP: i64 = 7_919;

/// Deterministic hasher for kernel outputs.
///
/// Wraps SHA-256 with helpers for fixed-point types.
/// Order of updates is critical for determinism.
pub struct TraceHasher {
    hasher: Sha256,
}

impl TraceHasher {
    /// Create a new hasher with domain separator.
    pub fn new(domain: &[u8]) -> Self {
        let mut hasher = Sha256::new();
        hasher.update(domain);
        Self { hasher }
    }

    /// Hasher for kernel sweeps.
    pub fn for_kernel_trace() -> Self {
        Self::new(b"LOCKSTEP_KERNEL_TRACE_V1")
    }

    /// Hasher for table contents.
    pub fn for_tables() -> Self {
        Self::new(b"LOCKSTEP_TABLES_V1")
    }

    /// Update with raw bytes.
    #[inline]
    pub fn update_bytes(&mut self, bytes: &[u8]) {
        self.hasher.update(bytes);
    }

    /// Update with a u8 value.
    #[inline]
    pub fn update_u8(&mut self, value: u8) {
        self.hasher.update([value]);
    }

    /// Update with a u64 value (little-endian).
    #[inline]
    pub fn update_u64(&mut self, value: u64) {
        self.hasher.update(value.to_le_bytes());
    }

    /// Update with an i64 value (little-endian).
    #[inline]
    pub fn update_i64(&mut self, value: i64) {
        self.hasher.update(value.to_le_bytes());
    }

    /// Update with a Fixed64 value.
    #[inline]
    pub fn update_fixed(&mut self, value: Fixed64) {
        self.update_i64(value.raw());
    }

    /// Update with a FixedVec2.
    #[inline]
    pub fn update_vec2(&mut self, value: FixedVec2) {
        self.update_fixed(value.x);
        self.update_fixed(value.y);
    }

    /// Update with a FixedVec3.
    #[inline]
    pub fn update_vec3(&mut self, value: FixedVec3) {
        self.update_fixed(value.x);
        self.update_fixed(value.y);
        self.update_fixed(value.z);
    }

    /// Update with an operation outcome; errors hash by kind.
    pub fn update_result(&mut self, value: &FixedResult<Fixed64>) {
        match value {
            Ok(v) => {
                self.update_u8(0);
                self.update_fixed(*v);
            }
            Err(err) => {
                self.update_u8(1);
                self.update_u8(error_tag(err));
            }
        }
    }

    /// Finalize and return the digest.
    pub fn finalize(self) -> TraceDigest {
        self.hasher.finalize().into()
    }
}

fn error_tag(err: &FixedError) -> u8 {
    match err {
        FixedError::DivisionByZero => 1,
        FixedError::Overflow { .. } => 2,
        FixedError::Table(_) => 3,
        FixedError::TypeMismatch { .. } => 4,
        FixedError::OutsideTable { .. } => 5,
    }
}

/// Digest of all four tables, in load order.
pub fn table_digest(tables: &TableSet) -> TraceDigest {
    let mut hasher = TraceHasher::for_tables();
    for kind in TableKind::ALL {
        hasher.update_u64(tables.len_of(kind) as u64);
        hasher.update_bytes(&tables.to_bytes(kind));
    }
    hasher.finalize()
}

/// Digest of a fixed sweep through the kernel.
///
/// Covers checked and wrapping arithmetic, every table-driven function and
/// the vector types, over `samples` inputs spread across positive and
/// negative raw values. Two runs agree iff every output bit agrees.
pub fn kernel_digest(tables: &TableSet, samples: u32) -> TraceDigest {
    let mut hasher = TraceHasher::for_kernel_trace();
    hasher.update_u64(u64::from(samples));

    for i in 0..i64::from(samples) {
        let x = Fixed64::from_raw(i.wrapping_mul(SWEEP_STEP));
        let y = Fixed64::from_raw((i - i64::from(samples) / 2).wrapping_mul(SWEEP_STEP * 3));

        hasher.update_fixed(x + y);
        hasher.update_fixed(x * y);
        hasher.update_result(&x.checked_mul(y));
        hasher.update_result(&x.checked_div(y));
        hasher.update_result(&x.checked_rem(y));

        hasher.update_result(&x.sin(tables));
        hasher.update_result(&x.cos(tables));
        hasher.update_result(&x.tan(tables));
        hasher.update_result(&y.asin(tables));
        hasher.update_result(&y.acos(tables));
        hasher.update_result(&y.sqrt(tables));

        let v = FixedVec3::new(x, y, x - y);
        hasher.update_vec3(v.cross(FixedVec3::ONE));
        hasher.update_vec2(FixedVec2::from_bits(v.truncate().bits().ushr(3)));
        hasher.update_result(&v.truncate().length_squared().sqrt(tables));
    }

    hasher.finalize()
}

// =============================================================================
// TESTS
// =============================================================================
