mod file;

use std::io::{Error, ErrorKind, Result};
use std::path::Path;

use log::debug;

use crate::service::OspfOptions;

/// Parse a TOML config file and return a GeneratorConfig
pub fn from_file(path: &str) -> Result<GeneratorConfig> {
    let spec = file::GeneratorConfigSpec::from_file(path)?;
    GeneratorConfig::from_spec(spec)
}

/// Tunables consumed while generating a node's artifacts
#[derive(Clone, Debug, PartialEq)]
pub struct GeneratorConfig {
    pub bin_search: Vec<String>,
    pub sbin_search: Vec<String>,
    pub ospf: OspfOptions,
}

/// Search dirs are pasted into a double-quoted shell variable and later
/// word-split, so each must be a single plain word
fn validate_search_dirs(key: &str, dirs: &[String]) -> Result<()> {
    let unsafe_char = |c: char| c.is_whitespace() || matches!(c, '"' | '$' | '`' | '\\');
    match dirs.iter().find(|d| d.is_empty() || d.contains(unsafe_char)) {
        Some(dir) => Err(Error::new(
            ErrorKind::InvalidInput,
            format!("Invalid {} entry: '{}'", key, dir),
        )),
        None => Ok(()),
    }
}

impl GeneratorConfig {
    fn from_spec(spec: file::GeneratorConfigSpec) -> Result<Self> {
        validate_search_dirs("quagga_bin_search", &spec.quagga_bin_search)?;
        validate_search_dirs("quagga_sbin_search", &spec.quagga_sbin_search)?;
        Ok(Self {
            bin_search: spec.quagga_bin_search,
            sbin_search: spec.quagga_sbin_search,
            ospf: OspfOptions {
                link_detection: spec.ospf.link_detection,
            },
        })
    }

    /// Load from `path` if it exists, defaults otherwise
    pub fn load_or_default(path: &str) -> Result<Self> {
        if Path::new(path).exists() {
            from_file(path)
        } else {
            debug!("No config at {}, using defaults", path);
            Ok(Self::default())
        }
    }
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        let spec = file::GeneratorConfigSpec::default();
        Self {
            bin_search: spec.quagga_bin_search,
            sbin_search: spec.quagga_sbin_search,
            ospf: OspfOptions {
                link_detection: spec.ospf.link_detection,
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_file() {
        let config = from_file("./demos/quaggen.toml").unwrap();
        assert_eq!(config.sbin_search[0], "/usr/lib/frr");
        assert!(config.ospf.link_detection);
    }

    #[test]
    fn test_load_or_default() {
        let config = GeneratorConfig::load_or_default("./demos/missing.toml").unwrap();
        assert_eq!(config, GeneratorConfig::default());
        assert_eq!(config.bin_search.len(), 3);
        assert!(!config.ospf.link_detection);
    }

    #[test]
    fn test_unsafe_search_dirs() {
        for dir in &["", "/opt/my bin", "/opt/\"q", "$HOME/bin", "/opt/`id`", "/opt\\bin"] {
            let mut spec = file::GeneratorConfigSpec::default();
            spec.quagga_sbin_search.push(dir.to_string());
            let err = GeneratorConfig::from_spec(spec).unwrap_err();
            assert_eq!(err.kind(), ErrorKind::InvalidInput, "{:?} accepted", dir);
        }
        let spec = file::GeneratorConfigSpec::from_toml("quagga_bin_search = [\"/opt/quagga bin\"]").unwrap();
        assert!(GeneratorConfig::from_spec(spec).is_err());
        assert!(GeneratorConfig::from_spec(file::GeneratorConfigSpec::default()).is_ok());
    }
}
