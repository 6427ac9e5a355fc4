use std::convert::TryFrom;
use std::fmt;
use std::path::Path;

use log::info;

use crate::boot::synthesize;
use crate::compose::compose;
use crate::config::GeneratorConfig;
use crate::error::GenerateError;
use crate::service::{QUAGGA_BOOT, QUAGGA_CONF, VTYSH_CONF};
use crate::topology::Node;

pub const VTYSH_CONF_TEXT: &str = "service integrated-vtysh-config\n";

/// Files the zebra service writes for a node
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub enum Artifact {
    QuaggaConf,
    BootScript,
    VtyshConf,
}

impl Artifact {
    pub fn all() -> [Artifact; 3] {
        [Artifact::QuaggaConf, Artifact::BootScript, Artifact::VtyshConf]
    }

    pub fn path(self) -> &'static str {
        match self {
            Artifact::QuaggaConf => QUAGGA_CONF,
            Artifact::BootScript => QUAGGA_BOOT,
            Artifact::VtyshConf => VTYSH_CONF,
        }
    }

    pub fn known_names() -> Vec<&'static str> {
        Self::all().iter().map(|a| a.path()).collect()
    }
}

impl fmt::Display for Artifact {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.path())
    }
}

/// Accepts the full path or just the file name
impl TryFrom<&str> for Artifact {
    type Error = GenerateError;

    fn try_from(filename: &str) -> Result<Self, Self::Error> {
        Self::all()
            .iter()
            .copied()
            .find(|a| {
                a.path() == filename
                    || Path::new(a.path()).file_name().map_or(false, |n| n == filename)
            })
            .ok_or_else(|| GenerateError::UnknownArtifact(filename.to_string()))
    }
}

/// Produce the text of one zebra artifact for a node.
///
/// Nothing is written; on error the caller should treat the whole node as failed.
pub fn generate(node: &Node, filename: &str, config: &GeneratorConfig) -> Result<String, GenerateError> {
    let artifact = Artifact::try_from(filename)?;
    info!("Generating {} for node {}", artifact, node.name);
    match artifact {
        Artifact::QuaggaConf => compose(node),
        Artifact::BootScript => {
            let composed = compose(node)?;
            Ok(synthesize(node, &composed, config).into_text())
        }
        Artifact::VtyshConf => Ok(VTYSH_CONF_TEXT.to_string()),
    }
}
