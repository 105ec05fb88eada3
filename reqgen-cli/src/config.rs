//! Configuration for the request generator.
//!
//! Configuration can be loaded from multiple sources with the following
//! precedence (highest to lowest):
//!
//! 1. Environment variables (prefixed with `REQGEN__`)
//! 2. YAML configuration file (specified via `-c` or `--config` flag)
//! 3. Defaults
//!
//! Environment variables use double underscores (`__`) to denote nested
//! structures, e.g. `REQGEN__LOGGING__LEVEL=debug`.
//!
//! The default configuration reproduces the three standard benchmark
//! inputs: an easy workload, a CPU-intensive workload with long patterns,
//! and a network-intensive workload with many short patterns.
//!
//! # YAML Configuration File
//!
//! ```yaml
//! output_dir: /tmp/requests
//! seed: 1234
//!
//! workloads:
//!   - name: easy
//!     output: easy-requests.txt
//!     lines: 100
//!     types: 2
//!     pattern:
//!       type: random
//!       chars: 10
//!   - name: network-intensive
//!     output: network_intensive_requests.txt
//!     lines: 100
//!     types: 2
//!     pattern:
//!       type: cyclic
//! ```

use std::path::{Path, PathBuf};

use anyhow::Result;
use figment::providers::{Env, Format, Serialized, Yaml};
use serde::{Deserialize, Serialize};
use tracing::level_filters::LevelFilter;

/// Environment variable prefix for all configuration options.
const ENV_PREFIX: &str = "REQGEN__";

/// Pattern construction for one workload.
///
/// The `type` field in YAML or `__TYPE` in environment variables
/// determines which variant is used.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Deserialize, Serialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum Pattern {
    /// Random alphanumeric patterns of a fixed length (type `"random"`).
    Random {
        /// Number of characters per pattern.
        chars: usize,
    },

    /// Short cyclically-repeating two-character patterns (type `"cyclic"`).
    Cyclic,
}

/// One request file to generate.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize, Serialize)]
pub struct WorkloadConfig {
    /// Name of the workload, used in logs and for `--only`.
    pub name: String,
    /// File name of the request file, relative to
    /// [`output_dir`](Config::output_dir).
    pub output: PathBuf,
    /// Number of request lines to generate.
    pub lines: usize,
    /// Number of distinct categories per request.
    pub types: usize,
    /// How the regex patterns are constructed.
    pub pattern: Pattern,
}

mod display_fromstr {
    pub fn serialize<T, S>(value: &T, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
        T: std::fmt::Display,
    {
        serializer.collect_str(&value)
    }

    pub fn deserialize<'de, T, D>(deserializer: D) -> Result<T, D::Error>
    where
        D: serde::Deserializer<'de>,
        T: std::str::FromStr,
        <T as std::str::FromStr>::Err: std::fmt::Display,
    {
        use serde::Deserialize;
        let s = <std::borrow::Cow<'de, str>>::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}

/// Logging configuration. Logs are always written to stderr.
#[derive(Debug, Deserialize, Serialize)]
pub struct Logging {
    /// Minimum log level to output. Defaults to `INFO`; the `RUST_LOG`
    /// environment variable provides more granular control if needed.
    #[serde(with = "display_fromstr")]
    pub level: LevelFilter,
}

impl Default for Logging {
    fn default() -> Self {
        Self {
            level: LevelFilter::INFO,
        }
    }
}

/// Main configuration struct for the request generator.
#[derive(Debug, Deserialize, Serialize)]
pub struct Config {
    /// Directory the request files are written into. Created if absent.
    ///
    /// Defaults to the current working directory.
    pub output_dir: PathBuf,

    /// Base RNG seed for reproducible runs.
    ///
    /// The workload at position `n` in [`workloads`](Config::workloads)
    /// uses `seed + n`, so a seeded run reproduces every file exactly.
    /// When unset, every run draws fresh entropy.
    pub seed: Option<u64>,

    /// Logging configuration.
    pub logging: Logging,

    /// The request files to generate.
    pub workloads: Vec<WorkloadConfig>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            output_dir: PathBuf::from("."),
            seed: None,
            logging: Logging::default(),
            workloads: vec![
                WorkloadConfig {
                    name: "easy".into(),
                    output: "easy-requests.txt".into(),
                    lines: 100,
                    types: 2,
                    pattern: Pattern::Random { chars: 10 },
                },
                WorkloadConfig {
                    name: "cpu-intensive".into(),
                    output: "cpu-intensive-requests.txt".into(),
                    lines: 100,
                    types: 2,
                    pattern: Pattern::Random { chars: 100 },
                },
                WorkloadConfig {
                    name: "network-intensive".into(),
                    output: "network_intensive_requests.txt".into(),
                    lines: 100,
                    types: 2,
                    pattern: Pattern::Cyclic,
                },
            ],
        }
    }
}

impl Config {
    /// Loads configuration from the provided arguments.
    ///
    /// Configuration is merged in the following order (later sources
    /// override earlier ones):
    /// 1. Default values
    /// 2. YAML configuration file (if provided)
    /// 3. Environment variables (prefixed with `REQGEN__`)
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let mut figment = figment::Figment::from(Serialized::defaults(Config::default()));
        if let Some(path) = path {
            figment = figment.merge(Yaml::file(path));
        }
        let config = figment
            .merge(Env::prefixed(ENV_PREFIX).split("__"))
            .extract()?;

        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use super::*;

    #[test]
    fn defaults_are_the_three_presets() {
        figment::Jail::expect_with(|_jail| {
            let config = Config::load(None).unwrap();

            assert_eq!(config.output_dir, Path::new("."));
            assert_eq!(config.seed, None);
            assert_eq!(config.logging.level, LevelFilter::INFO);

            let names: Vec<_> = config.workloads.iter().map(|w| w.name.as_str()).collect();
            assert_eq!(names, ["easy", "cpu-intensive", "network-intensive"]);

            let outputs: Vec<_> = config.workloads.iter().map(|w| &w.output).collect();
            assert_eq!(
                outputs,
                [
                    Path::new("easy-requests.txt"),
                    Path::new("cpu-intensive-requests.txt"),
                    Path::new("network_intensive_requests.txt"),
                ]
            );

            assert!(
                config
                    .workloads
                    .iter()
                    .all(|w| w.lines == 100 && w.types == 2)
            );
            assert_eq!(config.workloads[0].pattern, Pattern::Random { chars: 10 });
            assert_eq!(config.workloads[1].pattern, Pattern::Random { chars: 100 });
            assert_eq!(config.workloads[2].pattern, Pattern::Cyclic);

            Ok(())
        });
    }

    #[test]
    fn configurable_via_env() {
        figment::Jail::expect_with(|jail| {
            jail.set_env("REQGEN__OUTPUT_DIR", "/tmp/requests");
            jail.set_env("REQGEN__SEED", "1234");
            jail.set_env("REQGEN__LOGGING__LEVEL", "debug");

            let config = Config::load(None).unwrap();

            assert_eq!(config.output_dir, Path::new("/tmp/requests"));
            assert_eq!(config.seed, Some(1234));
            assert_eq!(config.logging.level, LevelFilter::DEBUG);

            Ok(())
        });
    }

    #[test]
    fn configurable_via_yaml() {
        let mut tempfile = tempfile::NamedTempFile::new().unwrap();
        tempfile
            .write_all(
                br#"
            output_dir: /data/requests
            seed: 7

            workloads:
              - name: tiny
                output: tiny.txt
                lines: 4
                types: 3
                pattern:
                  type: random
                  chars: 3
              - name: short
                output: short.txt
                lines: 10
                types: 1
                pattern:
                  type: cyclic
            "#,
            )
            .unwrap();

        figment::Jail::expect_with(|_jail| {
            let config = Config::load(Some(tempfile.path())).unwrap();

            assert_eq!(config.output_dir, Path::new("/data/requests"));
            assert_eq!(config.seed, Some(7));
            assert_eq!(
                config.workloads,
                vec![
                    WorkloadConfig {
                        name: "tiny".into(),
                        output: "tiny.txt".into(),
                        lines: 4,
                        types: 3,
                        pattern: Pattern::Random { chars: 3 },
                    },
                    WorkloadConfig {
                        name: "short".into(),
                        output: "short.txt".into(),
                        lines: 10,
                        types: 1,
                        pattern: Pattern::Cyclic,
                    },
                ]
            );

            Ok(())
        });
    }

    #[test]
    fn env_overrides_yaml() {
        let mut tempfile = tempfile::NamedTempFile::new().unwrap();
        tempfile.write_all(b"seed: 7\n").unwrap();

        figment::Jail::expect_with(|jail| {
            jail.set_env("REQGEN__SEED", "8");

            let config = Config::load(Some(tempfile.path())).unwrap();
            assert_eq!(config.seed, Some(8));

            Ok(())
        });
    }
}
