use std::error;
use std::fmt;

/// Fatal conditions that abort generation for a node.
/// Callers must not write partial artifacts when one of these is returned.
#[derive(Clone, Debug, PartialEq)]
pub enum GenerateError {
    /// Address is neither IPv4- nor IPv6-shaped. [address]
    InvalidAddress(String),
    /// Requested artifact isn't produced by zebra. [filename]
    UnknownArtifact(String),
}

impl fmt::Display for GenerateError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str("Generate Error: ")?;
        use GenerateError::*;
        match self {
            InvalidAddress(addr) => write!(f, "invalid address '{}'", addr)?,
            UnknownArtifact(name) => write!(
                f,
                "file name '{}' is not a known configuration [{}]",
                name,
                crate::artifact::Artifact::known_names().join(", ")
            )?,
        }
        Ok(())
    }
}

impl error::Error for GenerateError {}
