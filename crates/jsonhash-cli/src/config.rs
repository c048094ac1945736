//! # Configuration
//!
//! Optional YAML configuration file (`--config`). Command-line flags win over
//! the file; the file wins over built-in defaults.
//!
//! ```yaml
//! algorithm: sha256   # or sha512
//! memoize: true       # one cache for every document in the invocation
//! cache_capacity: 1024  # bound the cache (oldest entries evicted first)
//! max_depth: 4096     # null disables the nesting limit
//! format: json        # force a decoder instead of guessing from extensions
//! ```

use std::num::NonZeroUsize;
use std::path::Path;

use anyhow::{Context, Result};
use clap::Args;
use serde::Deserialize;

use jsonhash_core::{DocumentFormat, HashOptions, DEFAULT_MAX_DEPTH};
use jsonhash_crypto::DigestAlgorithm;

/// Contents of the configuration file.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct CliConfig {
    /// Digest algorithm name.
    pub algorithm: String,
    /// Memoize digests across the whole invocation.
    pub memoize: bool,
    /// Nesting limit; `None` is unbounded.
    pub max_depth: Option<usize>,
    /// Maximum number of memoized digests; `None` is unbounded.
    pub cache_capacity: Option<usize>,
    /// Forced document format.
    pub format: Option<String>,
}

impl Default for CliConfig {
    fn default() -> Self {
        Self {
            algorithm: DigestAlgorithm::default().to_string(),
            memoize: false,
            max_depth: Some(DEFAULT_MAX_DEPTH),
            cache_capacity: None,
            format: None,
        }
    }
}

impl CliConfig {
    /// Load the file at `path`, or the defaults when no path is given.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let Some(path) = path else {
            return Ok(Self::default());
        };
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read config file: {}", path.display()))?;
        let config: Self = serde_yaml::from_str(&content)
            .with_context(|| format!("failed to parse config YAML: {}", path.display()))?;
        tracing::debug!(path = %path.display(), ?config, "loaded configuration");
        Ok(config)
    }
}

/// Hashing flags shared by every subcommand.
#[derive(Args, Debug, Clone, Default)]
pub struct HashingArgs {
    /// Digest algorithm (sha256, sha512).
    #[arg(long, value_name = "NAME")]
    pub algorithm: Option<String>,

    /// Cache digests across all documents of this invocation.
    #[arg(long)]
    pub memoize: bool,

    /// Bound the memoization cache to this many digests.
    #[arg(long, value_name = "ENTRIES")]
    pub cache_capacity: Option<usize>,

    /// Reject documents nested deeper than this.
    #[arg(long, value_name = "DEPTH", conflicts_with = "unbounded")]
    pub max_depth: Option<usize>,

    /// Disable the nesting limit.
    #[arg(long)]
    pub unbounded: bool,

    /// Document format (json, yaml). Guessed from the file extension if unset.
    #[arg(long, value_name = "FORMAT")]
    pub format: Option<String>,
}

/// Effective settings after merging flags over the configuration file.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HashSettings {
    /// Digest algorithm for every hash invocation.
    pub algorithm: DigestAlgorithm,
    /// Share one cache across the documents of the invocation.
    pub memoize: bool,
    /// Cache bound when memoizing; `None` keeps every digest.
    pub cache_capacity: Option<NonZeroUsize>,
    /// Traversal options, including the nesting limit.
    pub options: HashOptions,
    /// Decoder override; `None` detects the format per path.
    pub format: Option<DocumentFormat>,
}

impl HashSettings {
    /// Merge `args` over `config`.
    ///
    /// An unknown algorithm or format name, or a zero cache capacity, is a
    /// configuration error and is reported immediately.
    pub fn resolve(args: &HashingArgs, config: &CliConfig) -> Result<Self> {
        let algorithm_name = args.algorithm.as_deref().unwrap_or(&config.algorithm);
        let algorithm: DigestAlgorithm = algorithm_name
            .parse()
            .with_context(|| format!("invalid digest algorithm {algorithm_name:?}"))?;

        let max_depth = if args.unbounded {
            None
        } else {
            args.max_depth.or(config.max_depth)
        };

        let format = args
            .format
            .as_deref()
            .or(config.format.as_deref())
            .map(str::parse::<DocumentFormat>)
            .transpose()
            .context("invalid document format")?;

        let memoize = args.memoize || config.memoize;
        let cache_capacity = match args.cache_capacity.or(config.cache_capacity) {
            Some(entries) => Some(
                NonZeroUsize::new(entries).context("cache capacity must be at least 1")?,
            ),
            None => None,
        };
        if cache_capacity.is_some() && !memoize {
            tracing::warn!("cache capacity has no effect without memoization");
        }

        Ok(Self {
            algorithm,
            memoize,
            cache_capacity,
            options: HashOptions { max_depth },
            format,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_without_file() {
        let config = CliConfig::load(None).unwrap();
        assert_eq!(config, CliConfig::default());
        let settings = HashSettings::resolve(&HashingArgs::default(), &config).unwrap();
        assert_eq!(settings.algorithm, DigestAlgorithm::Sha256);
        assert!(!settings.memoize);
        assert_eq!(settings.options, HashOptions::default());
        assert_eq!(settings.format, None);
    }

    #[test]
    fn file_values_apply() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("jsonhash.yaml");
        std::fs::write(
            &path,
            "algorithm: sha512\nmemoize: true\ncache_capacity: 1024\nmax_depth: null\nformat: yaml\n",
        )
        .unwrap();
        let config = CliConfig::load(Some(&path)).unwrap();
        assert_eq!(config.cache_capacity, Some(1024));
        let settings = HashSettings::resolve(&HashingArgs::default(), &config).unwrap();
        assert_eq!(settings.algorithm, DigestAlgorithm::Sha512);
        assert!(settings.memoize);
        assert_eq!(settings.cache_capacity, NonZeroUsize::new(1024));
        assert_eq!(settings.options, HashOptions::unbounded());
        assert_eq!(settings.format, Some(DocumentFormat::Yaml));
    }

    #[test]
    fn missing_fields_keep_defaults() {
        let config: CliConfig = serde_yaml::from_str("memoize: true\n").unwrap();
        assert_eq!(config.max_depth, Some(DEFAULT_MAX_DEPTH));
        assert_eq!(config.algorithm, "sha256");
    }

    #[test]
    fn unknown_field_is_rejected() {
        assert!(serde_yaml::from_str::<CliConfig>("cache: 10\n").is_err());
    }

    #[test]
    fn flags_override_file() {
        let config = CliConfig {
            algorithm: "sha512".into(),
            memoize: false,
            max_depth: None,
            cache_capacity: Some(4096),
            format: Some("yaml".into()),
        };
        let args = HashingArgs {
            algorithm: Some("sha256".into()),
            memoize: true,
            cache_capacity: Some(16),
            max_depth: Some(10),
            unbounded: false,
            format: Some("json".into()),
        };
        let settings = HashSettings::resolve(&args, &config).unwrap();
        assert_eq!(settings.algorithm, DigestAlgorithm::Sha256);
        assert!(settings.memoize);
        assert_eq!(settings.cache_capacity, NonZeroUsize::new(16));
        assert_eq!(settings.options, HashOptions::with_max_depth(10));
        assert_eq!(settings.format, Some(DocumentFormat::Json));
    }

    #[test]
    fn unbounded_flag_clears_limit() {
        let args = HashingArgs {
            unbounded: true,
            ..HashingArgs::default()
        };
        let settings = HashSettings::resolve(&args, &CliConfig::default()).unwrap();
        assert_eq!(settings.options.max_depth, None);
    }

    #[test]
    fn unknown_algorithm_fails_fast() {
        let args = HashingArgs {
            algorithm: Some("md5".into()),
            ..HashingArgs::default()
        };
        let err = HashSettings::resolve(&args, &CliConfig::default()).unwrap_err();
        assert!(format!("{err:#}").contains("md5"));
    }

    #[test]
    fn zero_cache_capacity_is_rejected() {
        let config: CliConfig = serde_yaml::from_str("memoize: true\ncache_capacity: 0\n").unwrap();
        let err = HashSettings::resolve(&HashingArgs::default(), &config).unwrap_err();
        assert!(format!("{err:#}").contains("cache capacity"));
    }
}
