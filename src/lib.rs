//! Quagga routing daemon config generation
//!
//! Given a node's interfaces and its enabled routing services, build zebra's
//! unified `Quagga.conf` and the `quaggaboot.sh` script that starts exactly the
//! daemons that config calls for. Generation is pure: no I/O and no state kept
//! between calls, so identical input always produces identical text.

pub mod address;
pub mod artifact;
pub mod boot;
pub mod compose;
pub mod config;
mod error;
pub mod policy;
pub mod service;
pub mod topology;

pub use artifact::{generate, Artifact};
pub use boot::{synthesize, BootScript, Daemon};
pub use compose::compose;
pub use config::GeneratorConfig;
pub use error::GenerateError;
pub use service::{Protocol, RoutingService, ServiceSet};
pub use topology::{Interface, Link, Node, Topology};
