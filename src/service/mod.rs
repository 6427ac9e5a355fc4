//! Quagga routing services
//!
//! Every protocol daemon contributes to the single `Quagga.conf` that zebra owns:
//! a protocol-global block (router statement, router-id, redistribution) and
//! optional per-interface lines. A service is only asked for its contribution
//! when all of its dependencies are enabled on the node.
//!
//! The built-in protocols are the closed [`Protocol`] set, but the composer only
//! sees [`RoutingService`] trait objects, so other services can be plugged in
//! without touching it.

mod babel;
mod bgp;
mod ospf;
mod pim;
mod rip;

pub use ospf::OspfOptions;

use std::fmt;
use std::io;
use std::str::FromStr;
use std::sync::Arc;

use log::trace;

use crate::topology::{Interface, Node};

pub const ZEBRA: &str = "zebra";
pub const QUAGGA_GROUP: &str = "Quagga";
pub const QUAGGA_CONF: &str = "/usr/local/etc/quagga/Quagga.conf";
pub const QUAGGA_BOOT: &str = "quaggaboot.sh";
pub const VTYSH_CONF: &str = "/usr/local/etc/quagga/vtysh.conf";
pub const QUAGGA_STATE_DIR: &str = "/var/run/quagga";

const PROTOCOL_META: &str = "The config file for this service can be found in the Zebra service.";

/// Immutable metadata describing a service, built once per service type
#[derive(Debug, PartialEq)]
pub struct ServiceDescriptor {
    pub name: &'static str,
    pub group: &'static str,
    pub dependencies: &'static [&'static str],
    pub ipv4_routing: bool,
    pub ipv6_routing: bool,
    /// Daemon binary this service runs (zebra launches all of them)
    pub daemon: &'static str,
    pub dirs: &'static [&'static str],
    pub configs: &'static [&'static str],
    pub startup: &'static [&'static str],
    pub shutdown: &'static [&'static str],
    pub validate: &'static [&'static str],
    /// Operator has to finish the generated config by hand
    pub custom_needed: bool,
    pub meta: Option<&'static str>,
}

impl ServiceDescriptor {
    /// Descriptor for a protocol daemon that hooks into zebra's config
    const fn protocol(
        name: &'static str,
        daemon: &'static str,
        ipv4_routing: bool,
        ipv6_routing: bool,
        shutdown: &'static [&'static str],
        validate: &'static [&'static str],
    ) -> Self {
        Self {
            name,
            group: QUAGGA_GROUP,
            dependencies: &[ZEBRA],
            ipv4_routing,
            ipv6_routing,
            daemon,
            dirs: &[],
            configs: &[],
            startup: &[],
            shutdown,
            validate,
            custom_needed: false,
            meta: Some(PROTOCOL_META),
        }
    }
}

static ZEBRA_DESCRIPTOR: ServiceDescriptor = ServiceDescriptor {
    name: ZEBRA,
    group: QUAGGA_GROUP,
    dependencies: &[],
    ipv4_routing: false,
    ipv6_routing: false,
    daemon: "zebra",
    dirs: &["/usr/local/etc/quagga", QUAGGA_STATE_DIR],
    configs: &[QUAGGA_CONF, QUAGGA_BOOT, VTYSH_CONF],
    startup: &["sh quaggaboot.sh zebra"],
    shutdown: &["killall zebra"],
    validate: &["pidof zebra"],
    custom_needed: false,
    meta: None,
};

/// Capability interface the config composer works against
pub trait RoutingService: fmt::Debug + Send + Sync {
    fn descriptor(&self) -> &ServiceDescriptor;

    fn name(&self) -> &str {
        self.descriptor().name
    }

    /// Protocol-global block, called once per node
    fn global_config(&self, _node: &Node) -> String {
        String::new()
    }

    /// Lines scoped to one routed interface
    fn interface_config(&self, _node: &Node, _ifc: &Interface) -> String {
        String::new()
    }
}

/// Routing protocols shipped with Quagga
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Protocol {
    Zebra,
    Ospfv2(OspfOptions),
    Ospfv3(OspfOptions),
    /// OSPFv3 MANET Designated Router, for wireless networks
    Ospfv3Mdr,
    Bgp,
    Rip,
    Ripng,
    Babel,
    Xpimd,
}

impl Protocol {
    pub fn all() -> Vec<Protocol> {
        use Protocol::*;
        vec![
            Zebra,
            Ospfv2(OspfOptions::default()),
            Ospfv3(OspfOptions::default()),
            Ospfv3Mdr,
            Bgp,
            Rip,
            Ripng,
            Babel,
            Xpimd,
        ]
    }

    /// Apply OSPF tuning options (no-op for other protocols)
    pub fn with_ospf_options(self, options: OspfOptions) -> Self {
        match self {
            Protocol::Ospfv2(_) => Protocol::Ospfv2(options),
            Protocol::Ospfv3(_) => Protocol::Ospfv3(options),
            other => other,
        }
    }
}

impl RoutingService for Protocol {
    fn descriptor(&self) -> &ServiceDescriptor {
        use Protocol::*;
        match self {
            Zebra => &ZEBRA_DESCRIPTOR,
            Ospfv2(_) => &ospf::OSPFV2,
            Ospfv3(_) => &ospf::OSPFV3,
            Ospfv3Mdr => &ospf::OSPFV3_MDR,
            Bgp => &bgp::BGP,
            Rip => &rip::RIP,
            Ripng => &rip::RIPNG,
            Babel => &babel::BABEL,
            Xpimd => &pim::XPIMD,
        }
    }

    fn global_config(&self, node: &Node) -> String {
        use Protocol::*;
        match self {
            Zebra => String::new(),
            Ospfv2(_) => ospf::ospfv2_global(node),
            Ospfv3(_) | Ospfv3Mdr => ospf::ospfv3_global(node),
            Bgp => bgp::global(node),
            Rip => rip::rip_global(),
            Ripng => rip::ripng_global(),
            Babel => babel::global(node),
            Xpimd => pim::global(node),
        }
    }

    fn interface_config(&self, _node: &Node, ifc: &Interface) -> String {
        use Protocol::*;
        match self {
            Ospfv2(options) => ospf::ospfv2_interface(ifc, options),
            Ospfv3(options) => ospf::ospfv3_interface(ifc, options),
            Ospfv3Mdr => ospf::mdr_interface(ifc),
            Babel => babel::interface(ifc),
            Xpimd => pim::interface(),
            Zebra | Bgp | Rip | Ripng => String::new(),
        }
    }
}

impl fmt::Display for Protocol {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

impl FromStr for Protocol {
    type Err = io::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Protocol::all()
            .into_iter()
            .find(|p| p.name().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| {
                io::Error::new(
                    io::ErrorKind::InvalidInput,
                    format!("Unsupported service: '{}'", s),
                )
            })
    }
}

/// Ordered set of services enabled on a node
#[derive(Clone, Debug, Default)]
pub struct ServiceSet(Vec<Arc<dyn RoutingService>>);

impl ServiceSet {
    pub fn new(services: Vec<Arc<dyn RoutingService>>) -> Self {
        Self(services)
    }

    pub fn from_protocols<I>(protocols: I) -> Self
    where
        I: IntoIterator<Item = Protocol>,
    {
        Self(
            protocols
                .into_iter()
                .map(|p| Arc::new(p) as Arc<dyn RoutingService>)
                .collect(),
        )
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn contains(&self, name: &str) -> bool {
        self.0.iter().any(|s| s.name() == name)
    }

    /// Are all of this service's dependencies enabled?
    pub fn is_satisfied(&self, descriptor: &ServiceDescriptor) -> bool {
        descriptor
            .dependencies
            .iter()
            .all(|dep| self.contains(dep))
    }

    pub fn iter(&self) -> impl Iterator<Item = &Arc<dyn RoutingService>> {
        self.0.iter()
    }

    /// Services whose dependencies are met, in enabled order
    pub fn active(&self) -> impl Iterator<Item = &Arc<dyn RoutingService>> {
        self.0.iter().filter(move |s| {
            let ok = self.is_satisfied(s.descriptor());
            if !ok {
                trace!(
                    "Skipping {}, missing dependencies {:?}",
                    s.name(),
                    s.descriptor().dependencies
                );
            }
            ok
        })
    }
}
