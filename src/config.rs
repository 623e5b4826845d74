//! Runtime Configuration
//!
//! Settings for the `lockstep-math` binary, read from the environment.
//! The library itself takes everything it needs as arguments.

use std::path::PathBuf;

/// Default number of sweep inputs hashed into the determinism digest.
pub const DEFAULT_TRACE_SAMPLES: u32 = 4096;

/// Kernel runtime configuration.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct KernelConfig {
    /// Directory holding `Sin.bin`, `Tan.bin`, `Asin.bin` and `Sqrt.bin`.
    pub table_dir: PathBuf,
    /// Generate and write the tables into `table_dir` before loading them.
    pub author_tables: bool,
    /// Number of inputs in the determinism sweep.
    pub trace_samples: u32,
    /// `tracing` filter directive, e.g. `info` or `lockstep_math=debug`.
    pub log_filter: String,
}

impl Default for KernelConfig {
    fn default() -> Self {
        Self {
            table_dir: PathBuf::from("tables"),
            author_tables: false,
            trace_samples: DEFAULT_TRACE_SAMPLES,
            log_filter: "info".to_string(),
        }
    }
}

impl KernelConfig {
    /// Create config from environment variables.
    ///
    /// - `LOCKSTEP_TABLE_DIR`
    /// - `LOCKSTEP_AUTHOR_TABLES` (`true` or `1`)
    /// - `LOCKSTEP_TRACE_SAMPLES`
    /// - `LOCKSTEP_LOG`
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Create config from any key lookup. Unset or unparsable values keep defaults.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();
        Self {
            table_dir: lookup("LOCKSTEP_TABLE_DIR")
                .map(PathBuf::from)
                .unwrap_or(defaults.table_dir),
            author_tables: lookup("LOCKSTEP_AUTHOR_TABLES")
                .map(|v| v == "true" || v == "1")
                .unwrap_or(defaults.author_tables),
            trace_samples: lookup("LOCKSTEP_TRACE_SAMPLES")
                .and_then(|v| v.parse().ok())
                .unwrap_or(defaults.trace_samples),
            log_filter: lookup("LOCKSTEP_LOG").unwrap_or(defaults.log_filter),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::BTreeMap;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: BTreeMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn test_defaults_when_unset() {
        assert_eq!(KernelConfig::from_lookup(|_| None), KernelConfig::default());
    }

    #[test]
    fn test_reads_every_key() {
        let config = KernelConfig::from_lookup(lookup_from(&[
            ("LOCKSTEP_TABLE_DIR", "/opt/tables"),
            ("LOCKSTEP_AUTHOR_TABLES", "1"),
            ("LOCKSTEP_TRACE_SAMPLES", "64"),
            ("LOCKSTEP_LOG", "debug"),
        ]));
        assert_eq!(config.table_dir, PathBuf::from("/opt/tables"));
        assert!(config.author_tables);
        assert_eq!(config.trace_samples, 64);
        assert_eq!(config.log_filter, "debug");
    }

    #[test]
    fn test_bad_sample_count_keeps_default() {
        let config = KernelConfig::from_lookup(lookup_from(&[
            ("LOCKSTEP_TRACE_SAMPLES", "lots"),
            ("LOCKSTEP_AUTHOR_TABLES", "yes"),
        ]));
        assert_eq!(config.trace_samples, DEFAULT_TRACE_SAMPLES);
        assert!(!config.author_tables);
    }
}
