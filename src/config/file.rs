use std::fs::File;
use std::io::{self, Read};

use serde::Deserialize;
use toml;

struct Defaults {}

impl Defaults {
    fn bin_search() -> Vec<String> {
        vec![
            "/usr/local/bin".to_string(),
            "/usr/bin".to_string(),
            "/usr/lib/quagga".to_string(),
        ]
    }

    fn sbin_search() -> Vec<String> {
        vec![
            "/usr/local/sbin".to_string(),
            "/usr/sbin".to_string(),
            "/usr/lib/quagga".to_string(),
        ]
    }

    fn link_detection() -> bool {
        false
    }
}

/// Config (toml) representation of OSPF tuning
#[derive(Clone, Debug, Default, Deserialize)]
pub(super) struct OspfConfigSpec {
    // Detect point-to-point & external links, and use fast hello timers
    #[serde(default = "Defaults::link_detection")]
    pub(super) link_detection: bool,
}

#[derive(Debug, Deserialize)]
pub(super) struct GeneratorConfigSpec {
    // Directories searched for vtysh
    #[serde(default = "Defaults::bin_search")]
    pub(super) quagga_bin_search: Vec<String>,
    // Directories searched for the routing daemons
    #[serde(default = "Defaults::sbin_search")]
    pub(super) quagga_sbin_search: Vec<String>,
    #[serde(default)]
    pub(super) ospf: OspfConfigSpec,
}

impl Default for GeneratorConfigSpec {
    fn default() -> Self {
        Self {
            quagga_bin_search: Defaults::bin_search(),
            quagga_sbin_search: Defaults::sbin_search(),
            ospf: OspfConfigSpec::default(),
        }
    }
}

impl GeneratorConfigSpec {
    pub(super) fn from_toml(contents: &str) -> io::Result<Self> {
        toml::from_str(contents).map_err(|err| io::Error::new(io::ErrorKind::InvalidData, err))
    }

    pub(super) fn from_file(path: &str) -> io::Result<Self> {
        let mut file = File::open(path)?;
        let mut contents = String::new();
        file.read_to_string(&mut contents)?;
        Self::from_toml(&contents)
    }
}
