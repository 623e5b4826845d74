//! Lockstep Math
//!
//! Loads (or authors) the lookup tables, installs them process-wide and
//! prints the determinism digests peers compare before a session starts.

use anyhow::{Context, Result};
use tracing::info;
use tracing_subscriber::{EnvFilter, FmtSubscriber};

use lockstep_math::{
    core::tables,
    kernel_digest, table_digest, DirSource, Fixed64, FixedVec2, KernelConfig, TableSet, VERSION,
};

fn main() -> Result<()> {
    let config = KernelConfig::from_env();

    // Initialize logging
    let filter = EnvFilter::try_new(&config.log_filter)
        .with_context(|| format!("invalid log filter {:?}", config.log_filter))?;
    let subscriber = FmtSubscriber::builder().with_env_filter(filter).finish();
    tracing::subscriber::set_global_default(subscriber)
        .context("failed to set tracing subscriber")?;

    info!("Lockstep Math v{}", VERSION);

    if config.author_tables {
        std::fs::create_dir_all(&config.table_dir)
            .with_context(|| format!("cannot create {}", config.table_dir.display()))?;
        TableSet::author()
            .write_dir(&config.table_dir)
            .context("failed to author lookup tables")?;
    }

    let source = DirSource::new(&config.table_dir);
    info!("Table directory: {}", source.dir().display());
    let tables = tables::install(&source).context("failed to install lookup tables")?;

    info!("Table digest:  {}", hex::encode(table_digest(tables)));
    info!(
        "Kernel digest: {} ({} samples)",
        hex::encode(kernel_digest(tables, config.trace_samples)),
        config.trace_samples
    );

    demo_values(tables)
}

/// Log a handful of reference values so a human can eyeball a table set.
fn demo_values(tables: &TableSet) -> Result<()> {
    info!("=== Reference Values ===");

    let quarter = Fixed64::HALF_PI / 2i64;
    info!("sin(pi/4)  = {}", quarter.sin(tables)?);
    info!("cos(pi/4)  = {}", quarter.cos(tables)?);
    info!("tan(pi/4)  = {}", quarter.tan(tables)?);
    info!("asin(0.5)  = {}", Fixed64::HALF.asin(tables)?);
    info!("acos(0.5)  = {}", Fixed64::HALF.acos(tables)?);
    info!("sqrt(2)    = {}", Fixed64::from_int(2).sqrt(tables)?);

    let v = FixedVec2::from_ints(3, 4);
    info!("|{}|^2 = {}", v, v.length_squared());
    info!("{} rotated by pi/2 = {}", FixedVec2::RIGHT, FixedVec2::RIGHT.rotate(Fixed64::HALF_PI, tables)?);

    Ok(())
}
