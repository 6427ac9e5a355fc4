mod file;

pub use file::Topology;

use std::fmt;
use std::sync::Arc;

use serde::{self, Deserialize, Deserializer};

use crate::service::ServiceSet;

pub const DEFAULT_MTU: u32 = 1500;

#[derive(Clone, Copy, Debug, Deserialize, Eq, Hash, PartialEq)]
#[serde(rename_all = "lowercase")]
pub enum NodeKind {
    Router,
    Host,
    /// Pass-through to a physical port outside the emulation
    Rj45,
    Other,
}

/// The kind of network an interface attaches to
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub enum LinkKind {
    Wired,
    Wireless,
    Emane,
    PointToPoint,
}

impl LinkKind {
    /// WLAN and EMANE networks are both wireless-class
    pub fn is_wireless(self) -> bool {
        matches!(self, LinkKind::Wireless | LinkKind::Emane)
    }
}

impl fmt::Display for LinkKind {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        use LinkKind::*;
        let display = match self {
            Wired => "wired",
            Wireless => "wireless",
            Emane => "emane",
            PointToPoint => "point-to-point",
        };
        write!(f, "{}", display)
    }
}

impl<'de> Deserialize<'de> for LinkKind {
    fn deserialize<D>(deserializer: D) -> Result<LinkKind, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        match s.to_lowercase().as_str() {
            "wired" | "switch" | "hub" => Ok(LinkKind::Wired),
            "wireless" | "wlan" => Ok(LinkKind::Wireless),
            "emane" => Ok(LinkKind::Emane),
            "point-to-point" | "ptp" => Ok(LinkKind::PointToPoint),
            _ => Err(serde::de::Error::custom(format!(
                "Unsupported link kind: '{}'",
                s
            ))),
        }
    }
}

/// One interface attached to a Link, as seen by its peers
#[derive(Clone, Debug, PartialEq)]
pub struct LinkMember {
    pub node_id: u32,
    pub node_kind: NodeKind,
    pub interface: String,
    pub mtu: u32,
}

/// A shared network segment. Interfaces hold it by `Arc`, members are
/// stored by value so there's no reference cycle back to the interfaces.
#[derive(Debug)]
pub struct Link {
    pub name: String,
    pub kind: LinkKind,
    pub members: Vec<LinkMember>,
}

impl Link {
    pub fn new(name: &str, kind: LinkKind) -> Self {
        Self {
            name: name.to_string(),
            kind,
            members: Vec::with_capacity(4),
        }
    }

    pub fn with_member(mut self, node_id: u32, node_kind: NodeKind, interface: &str, mtu: u32) -> Self {
        self.members.push(LinkMember {
            node_id,
            node_kind,
            interface: interface.to_string(),
            mtu,
        });
        self
    }

    /// Members of this link other than the given interface
    pub fn peers<'a>(&'a self, ifc: &'a Interface) -> impl Iterator<Item = &'a LinkMember> + 'a {
        self.members
            .iter()
            .filter(move |m| !(m.node_id == ifc.node_id && m.interface == ifc.name))
    }
}

#[derive(Clone, Debug)]
pub struct Interface {
    pub node_id: u32,
    pub name: String,
    pub mtu: u32,
    /// Control interfaces get addressed but are never handed to a routing daemon
    pub control: bool,
    pub addresses: Vec<String>,
    pub link: Option<Arc<Link>>,
}

impl Interface {
    pub fn new(name: &str, mtu: u32) -> Self {
        Self {
            node_id: 0,
            name: name.to_string(),
            mtu,
            control: false,
            addresses: vec![],
            link: None,
        }
    }

    pub fn with_addresses(mut self, addresses: &[&str]) -> Self {
        self.addresses = addresses.iter().map(|a| a.to_string()).collect();
        self
    }

    pub fn control(mut self) -> Self {
        self.control = true;
        self
    }

    pub fn on_link(mut self, link: Arc<Link>) -> Self {
        self.link = Some(link);
        self
    }

    pub fn link_kind(&self) -> Option<LinkKind> {
        self.link.as_ref().map(|l| l.kind)
    }
}

/// Read-only snapshot of one emulated node, built per generation request
#[derive(Clone, Debug)]
pub struct Node {
    pub id: u32,
    pub name: String,
    pub kind: NodeKind,
    pub interfaces: Vec<Interface>,
    pub services: ServiceSet,
}

impl Node {
    pub fn new(id: u32, name: &str) -> Self {
        Self {
            id,
            name: name.to_string(),
            kind: NodeKind::Router,
            interfaces: Vec::with_capacity(4),
            services: ServiceSet::default(),
        }
    }

    pub fn with_interface(mut self, mut ifc: Interface) -> Self {
        ifc.node_id = self.id;
        self.interfaces.push(ifc);
        self
    }

    pub fn with_services(mut self, services: ServiceSet) -> Self {
        self.services = services;
        self
    }

    /// Interfaces that take part in routing (everything but control)
    pub fn routed_interfaces(&self) -> impl Iterator<Item = &Interface> {
        self.interfaces.iter().filter(|i| !i.control)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_link_peers() {
        let link = Arc::new(
            Link::new("net1", LinkKind::Wired)
                .with_member(1, NodeKind::Router, "eth0", 1500)
                .with_member(2, NodeKind::Router, "eth0", 1500)
                .with_member(1, NodeKind::Router, "eth1", 1500),
        );
        let node = Node::new(1, "n1").with_interface(Interface::new("eth0", 1500).on_link(link.clone()));
        let peers: Vec<_> = link.peers(&node.interfaces[0]).collect();
        assert_eq!(peers.len(), 2);
        assert!(peers.iter().all(|p| !(p.node_id == 1 && p.interface == "eth0")));
    }

    #[test]
    fn test_routed_interfaces() {
        let node = Node::new(1, "n1")
            .with_interface(Interface::new("eth0", 1500))
            .with_interface(Interface::new("ctrl0", 1500).control())
            .with_interface(Interface::new("eth1", 1500));
        let names: Vec<_> = node.routed_interfaces().map(|i| i.name.as_str()).collect();
        assert_eq!(names, vec!["eth0", "eth1"]);
        assert!(node.interfaces.iter().all(|i| i.node_id == 1));
    }

    #[test]
    fn test_link_kind() {
        assert!(LinkKind::Wireless.is_wireless());
        assert!(LinkKind::Emane.is_wireless());
        assert!(!LinkKind::PointToPoint.is_wireless());
        assert_eq!(LinkKind::PointToPoint.to_string(), "point-to-point");
    }
}
