//! Lookup Tables
//!
//! Four flat binary tables back every transcendental in the kernel:
//!
//! ```text
//! ┌──────────┬────────────┬─────────┬──────────────────────────────┐
//! │  File    │  Element   │  Count  │  Domain                      │
//! ├──────────┼────────────┼─────────┼──────────────────────────────┤
//! │ Sin.bin  │  u16       │ 102944  │  sin over [0, π/2]           │
//! │ Tan.bin  │  i64 (raw) │ 102944  │  tan over [0, π/2]           │
//! │ Asin.bin │  i32       │  65536  │  asin over [0, 1)            │
//! │ Sqrt.bin │  u16       │  65536  │  sqrt mantissa over [1, 3)   │
//! └──────────┴────────────┴─────────┴──────────────────────────────┘
//! ```
//!
//! Files have no header and are read back in the byte order they were
//! authored with. A [`TableSet`] is immutable once built; share it by
//! reference or install it process-wide through a [`TableCell`].

use std::collections::BTreeMap;
use std::fmt;
use std::io;
use std::path::{Path, PathBuf};
use std::sync::OnceLock;

use bytemuck::{AnyBitPattern, NoUninit};
use thiserror::Error;
use tracing::{debug, info, warn};

use super::fixed::{Fixed64, FIXED_ONE};

/// Sample count of the sin and tan tables: one per raw unit over [0, π/2].
pub const QUARTER_WAVE_LEN: usize = Fixed64::HALF_PI.raw() as usize + 1;

/// Sample count of the asin and sqrt tables: one per 16-bit index.
pub const UNIT_LEN: usize = FIXED_ONE as usize;

/// Identifies one of the four tables.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum TableKind {
    /// First-quadrant sine
    Sin,
    /// Half-period tangent
    Tan,
    /// Quarter-domain arcsine
    Asin,
    /// Square-root mantissa
    Sqrt,
}

impl TableKind {
    /// All tables in load order.
    pub const ALL: [TableKind; 4] = [TableKind::Sin, TableKind::Tan, TableKind::Asin, TableKind::Sqrt];

    /// File name of the table.
    pub const fn file_name(self) -> &'static str {
        match self {
            TableKind::Sin => "Sin.bin",
            TableKind::Tan => "Tan.bin",
            TableKind::Asin => "Asin.bin",
            TableKind::Sqrt => "Sqrt.bin",
        }
    }

    /// Width of one element in bytes.
    pub const fn element_width(self) -> usize {
        match self {
            TableKind::Sin | TableKind::Sqrt => 2,
            TableKind::Asin => 4,
            TableKind::Tan => 8,
        }
    }

    /// Number of elements in a canonical table.
    pub const fn canonical_len(self) -> usize {
        match self {
            TableKind::Sin | TableKind::Tan => QUARTER_WAVE_LEN,
            TableKind::Asin | TableKind::Sqrt => UNIT_LEN,
        }
    }
}

impl fmt::Display for TableKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            TableKind::Sin => "sin",
            TableKind::Tan => "tan",
            TableKind::Asin => "asin",
            TableKind::Sqrt => "sqrt",
        };
        f.write_str(name)
    }
}

/// Table loading errors. Any of these is fatal for trig and sqrt.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TableError {
    /// Byte source could not be read.
    #[error("cannot read {table} table: {reason}")]
    Unreadable {
        /// Table being read.
        table: TableKind,
        /// Underlying I/O failure.
        reason: String,
    },

    /// Byte length is not a multiple of the element width.
    #[error("{table} table has {len} bytes, not a multiple of {width}")]
    Misaligned {
        /// Table being decoded.
        table: TableKind,
        /// Byte length received.
        len: usize,
        /// Element width in bytes.
        width: usize,
    },

    /// Tables requested before a successful install.
    #[error("lookup tables not installed")]
    NotInstalled,

    /// Authored table could not be written.
    #[error("cannot write {table} table: {reason}")]
    Write {
        /// Table being written.
        table: TableKind,
        /// Underlying I/O failure.
        reason: String,
    },
}

// =============================================================================
// BYTE SOURCES
// =============================================================================

/// Supplies the raw bytes of each table.
pub trait TableSource {
    /// Read every byte of one table.
    fn read(&self, kind: TableKind) -> io::Result<Vec<u8>>;
}

/// Reads `<dir>/Sin.bin` and friends from the filesystem.
#[derive(Clone, Debug)]
pub struct DirSource {
    dir: PathBuf,
}

impl DirSource {
    /// Source rooted at `dir`.
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    /// Directory the tables are read from.
    pub fn dir(&self) -> &Path {
        &self.dir
    }
}

impl TableSource for DirSource {
    fn read(&self, kind: TableKind) -> io::Result<Vec<u8>> {
        std::fs::read(self.dir.join(kind.file_name()))
    }
}

/// In-memory buffers, e.g. embedded with `include_bytes!` or received over the wire.
#[derive(Clone, Debug, Default)]
pub struct MemorySource {
    buffers: BTreeMap<TableKind, Vec<u8>>,
}

impl MemorySource {
    /// Empty source; every read fails until buffers are added.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add or replace the bytes of one table.
    pub fn insert(&mut self, kind: TableKind, bytes: Vec<u8>) {
        self.buffers.insert(kind, bytes);
    }

    /// Builder form of [`MemorySource::insert`].
    pub fn with(mut self, kind: TableKind, bytes: Vec<u8>) -> Self {
        self.insert(kind, bytes);
        self
    }
}

impl TableSource for MemorySource {
    fn read(&self, kind: TableKind) -> io::Result<Vec<u8>> {
        self.buffers.get(&kind).cloned().ok_or_else(|| {
            io::Error::new(
                io::ErrorKind::NotFound,
                format!("no buffer for {}", kind.file_name()),
            )
        })
    }
}

// =============================================================================
// TABLE SET
// =============================================================================

/// The four typed sample arrays.
#[derive(Clone, PartialEq, Eq)]
pub struct TableSet {
    sin: Box<[u16]>,
    tan: Box<[Fixed64]>,
    asin: Box<[i32]>,
    sqrt: Box<[u16]>,
}

impl TableSet {
    /// Load and decode all four tables.
    ///
    /// Nothing is returned unless every table reads and decodes cleanly.
    pub fn load<S: TableSource + ?Sized>(source: &S) -> Result<Self, TableError> {
        let sin: Vec<u16> = decode(source, TableKind::Sin)?;
        let tan: Vec<i64> = decode(source, TableKind::Tan)?;
        let asin: Vec<i32> = decode(source, TableKind::Asin)?;
        let sqrt: Vec<u16> = decode(source, TableKind::Sqrt)?;

        let tables = Self::from_parts(
            sin,
            tan.into_iter().map(Fixed64::from_raw).collect(),
            asin,
            sqrt,
        );
        info!(
            sin = tables.sin.len(),
            tan = tables.tan.len(),
            asin = tables.asin.len(),
            sqrt = tables.sqrt.len(),
            "lookup tables loaded"
        );
        Ok(tables)
    }

    /// Build from already-typed samples.
    pub fn from_parts(sin: Vec<u16>, tan: Vec<Fixed64>, asin: Vec<i32>, sqrt: Vec<u16>) -> Self {
        Self {
            sin: sin.into_boxed_slice(),
            tan: tan.into_boxed_slice(),
            asin: asin.into_boxed_slice(),
            sqrt: sqrt.into_boxed_slice(),
        }
    }

    /// First-quadrant sine samples.
    pub fn sin_samples(&self) -> &[u16] {
        &self.sin
    }

    /// Half-period tangent samples.
    pub fn tan_samples(&self) -> &[Fixed64] {
        &self.tan
    }

    /// Quarter-domain arcsine samples.
    pub fn asin_samples(&self) -> &[i32] {
        &self.asin
    }

    /// Square-root mantissa samples.
    pub fn sqrt_samples(&self) -> &[u16] {
        &self.sqrt
    }

    /// Number of samples in one table.
    pub fn len_of(&self, kind: TableKind) -> usize {
        match kind {
            TableKind::Sin => self.sin.len(),
            TableKind::Tan => self.tan.len(),
            TableKind::Asin => self.asin.len(),
            TableKind::Sqrt => self.sqrt.len(),
        }
    }

    /// Serialize one table in native byte order, the inverse of [`TableSet::load`].
    pub fn to_bytes(&self, kind: TableKind) -> Vec<u8> {
        match kind {
            TableKind::Sin => bytemuck::cast_slice::<u16, u8>(&self.sin[..]).to_vec(),
            TableKind::Asin => bytemuck::cast_slice::<i32, u8>(&self.asin[..]).to_vec(),
            TableKind::Sqrt => bytemuck::cast_slice::<u16, u8>(&self.sqrt[..]).to_vec(),
            TableKind::Tan => {
                let raw: Vec<i64> = self.tan.iter().map(|v| v.raw()).collect();
                bytemuck::cast_slice::<i64, u8>(&raw[..]).to_vec()
            }
        }
    }

    /// Write all four tables into `dir` as `.bin` files.
    pub fn write_dir(&self, dir: &Path) -> Result<(), TableError> {
        for kind in TableKind::ALL {
            let path = dir.join(kind.file_name());
            std::fs::write(&path, self.to_bytes(kind)).map_err(|e| TableError::Write {
                table: kind,
                reason: e.to_string(),
            })?;
            debug!(table = %kind, path = %path.display(), "table written");
        }
        info!(dir = %dir.display(), "lookup tables written");
        Ok(())
    }

    /// Generate canonical tables from host floating point.
    ///
    /// # Warning
    /// Authoring only. Host `sin`/`tan`/`asin`/`sqrt` may differ across
    /// platforms, so generate once, ship the files, and always load those.
    pub fn author() -> Self {
        let unit = FIXED_ONE as f64;

        let sin = (0..QUARTER_WAVE_LEN)
            .map(|i| ((i as f64 / unit).sin() * unit).round().min(f64::from(u16::MAX)) as u16)
            .collect();

        let tan = (0..QUARTER_WAVE_LEN)
            .map(|i| Fixed64::from_raw(((i as f64 / unit).tan() * unit).round() as i64))
            .collect();

        let asin = (0..UNIT_LEN)
            .map(|i| ((i as f64 / unit).asin() * unit).round() as i32)
            .collect();

        // Index i covers the reduced raw value 65536 + 2i; the sample is the
        // raw root minus one whole unit.
        let sqrt = (0..UNIT_LEN)
            .map(|i| {
                let reduced = (FIXED_ONE + 2 * i as i64) as f64;
                let root = (reduced * unit).sqrt().round() - unit;
                root.clamp(0.0, f64::from(u16::MAX)) as u16
            })
            .collect();

        Self::from_parts(sin, tan, asin, sqrt)
    }
}

impl fmt::Debug for TableSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TableSet")
            .field("sin", &self.sin.len())
            .field("tan", &self.tan.len())
            .field("asin", &self.asin.len())
            .field("sqrt", &self.sqrt.len())
            .finish()
    }
}

/// Read one table and reinterpret its bytes as `T`.
fn decode<T, S>(source: &S, kind: TableKind) -> Result<Vec<T>, TableError>
where
    T: NoUninit + AnyBitPattern,
    S: TableSource + ?Sized,
{
    let bytes = source.read(kind).map_err(|e| TableError::Unreadable {
        table: kind,
        reason: e.to_string(),
    })?;

    let width = kind.element_width();
    if bytes.len() % width != 0 {
        return Err(TableError::Misaligned {
            table: kind,
            len: bytes.len(),
            width,
        });
    }

    // Copies into a Vec<T>, so the byte buffer's alignment does not matter.
    let samples: Vec<T> = bytemuck::allocation::pod_collect_to_vec::<u8, T>(&bytes[..]);
    if samples.len() != kind.canonical_len() {
        warn!(
            table = %kind,
            len = samples.len(),
            expected = kind.canonical_len(),
            "table length differs from canonical size"
        );
    }
    debug!(table = %kind, bytes = bytes.len(), "table decoded");
    Ok(samples)
}

// =============================================================================
// ONE-SHOT INSTALLATION
// =============================================================================

/// A slot that loads a [`TableSet`] at most once.
///
/// Concurrent first callers block until the single load finishes. The outcome,
/// success or failure, is final: a failed load is never retried.
#[derive(Debug)]
pub struct TableCell {
    slot: OnceLock<Result<TableSet, TableError>>,
}

impl TableCell {
    /// Empty cell.
    pub const fn new() -> Self {
        Self {
            slot: OnceLock::new(),
        }
    }

    /// Load from `source` if nothing has been loaded yet; return the stored outcome.
    pub fn install<S: TableSource + ?Sized>(&self, source: &S) -> Result<&TableSet, TableError> {
        let mut loaded_here = false;
        let outcome = self.slot.get_or_init(|| {
            loaded_here = true;
            TableSet::load(source)
        });
        if !loaded_here {
            debug!("lookup tables already installed, source ignored");
        }
        outcome.as_ref().map_err(Clone::clone)
    }

    /// Installed tables, or the error that the one load produced.
    pub fn get(&self) -> Result<&TableSet, TableError> {
        match self.slot.get() {
            Some(Ok(tables)) => Ok(tables),
            Some(Err(err)) => Err(err.clone()),
            None => Err(TableError::NotInstalled),
        }
    }
}

impl Default for TableCell {
    fn default() -> Self {
        Self::new()
    }
}

static GLOBAL: TableCell = TableCell::new();

/// Load the process-wide tables once. Later calls return the first outcome.
pub fn install<S: TableSource + ?Sized>(source: &S) -> Result<&'static TableSet, TableError> {
    GLOBAL.install(source)
}

/// The process-wide tables.
pub fn global() -> Result<&'static TableSet, TableError> {
    GLOBAL.get()
}

// =============================================================================
// TESTS
// =============================================================================
