use std::collections::HashMap;
use std::fs::File;
use std::io::{self, Read};
use std::sync::Arc;

use ipnetwork::IpNetwork;
use log::{debug, warn};
use serde::Deserialize;
use toml;

use super::{Interface, Link, LinkKind, Node, NodeKind, DEFAULT_MTU};
use crate::config::GeneratorConfig;
use crate::service::{Protocol, ServiceSet};

struct Defaults {}

impl Defaults {
    fn mtu() -> u32 {
        DEFAULT_MTU
    }

    fn node_kind() -> NodeKind {
        NodeKind::Router
    }

    fn link_kind() -> LinkKind {
        LinkKind::Wired
    }
}

/// Config (toml) representation of a shared network
#[derive(Clone, Debug, Deserialize)]
pub(super) struct NetworkSpec {
    pub(super) name: String,
    #[serde(default = "Defaults::link_kind")]
    pub(super) kind: LinkKind,
}

#[derive(Clone, Debug, Deserialize)]
pub(super) struct InterfaceSpec {
    pub(super) name: String,
    #[serde(default = "Defaults::mtu")]
    pub(super) mtu: u32,
    // Addressed, but excluded from routing
    #[serde(default)]
    pub(super) control: bool,
    // CIDR form, E.g. "10.0.0.1/24" or "2001::1/64"
    #[serde(default = "Vec::new")]
    pub(super) addresses: Vec<String>,
    // Name of the network this interface attaches to
    pub(super) network: Option<String>,
}

#[derive(Clone, Debug, Deserialize)]
pub(super) struct NodeSpec {
    pub(super) id: u32,
    pub(super) name: String,
    #[serde(default = "Defaults::node_kind")]
    pub(super) kind: NodeKind,
    // Enabled services, in order
    #[serde(default = "Vec::new")]
    pub(super) services: Vec<String>,
    #[serde(default = "Vec::new")]
    pub(super) interfaces: Vec<InterfaceSpec>,
}

#[derive(Debug, Deserialize)]
pub(super) struct TopologySpec {
    #[serde(default = "Vec::new")]
    pub(super) networks: Vec<NetworkSpec>,
    #[serde(default = "Vec::new")]
    pub(super) nodes: Vec<NodeSpec>,
}

/// Snapshot of every node in a scenario
#[derive(Debug)]
pub struct Topology {
    pub nodes: Vec<Node>,
}

fn invalid_input(reason: String) -> io::Error {
    io::Error::new(io::ErrorKind::InvalidInput, reason)
}

impl Topology {
    pub fn from_file(path: &str, config: &GeneratorConfig) -> io::Result<Self> {
        let mut file = File::open(path)?;
        let mut contents = String::new();
        file.read_to_string(&mut contents)?;
        Self::from_toml(&contents, config)
    }

    pub fn from_toml(contents: &str, config: &GeneratorConfig) -> io::Result<Self> {
        let spec: TopologySpec = toml::from_str(contents)
            .map_err(|err| io::Error::new(io::ErrorKind::InvalidData, err))?;
        Self::from_spec(spec, config)
    }

    fn from_spec(spec: TopologySpec, config: &GeneratorConfig) -> io::Result<Self> {
        let links = build_links(&spec)?;
        let nodes = spec
            .nodes
            .iter()
            .map(|n| build_node(n, &links, config))
            .collect::<io::Result<Vec<_>>>()?;
        debug!("Loaded {} nodes, {} networks", nodes.len(), links.len());
        Ok(Self { nodes })
    }

    /// Look up a node by name or id
    pub fn node(&self, key: &str) -> Option<&Node> {
        self.nodes
            .iter()
            .find(|n| n.name == key || n.id.to_string() == key)
    }
}

fn build_links(spec: &TopologySpec) -> io::Result<HashMap<String, Arc<Link>>> {
    let mut links: HashMap<String, Link> = HashMap::with_capacity(spec.networks.len());
    for network in &spec.networks {
        if links.contains_key(&network.name) {
            return Err(invalid_input(format!("Duplicate network: '{}'", network.name)));
        }
        links.insert(network.name.clone(), Link::new(&network.name, network.kind));
    }
    for node in &spec.nodes {
        for ifc in &node.interfaces {
            let name = match &ifc.network {
                Some(name) => name,
                None => continue,
            };
            let link = links.remove(name).ok_or_else(|| {
                invalid_input(format!(
                    "Unknown network '{}' on {}/{}",
                    name, node.name, ifc.name
                ))
            })?;
            links.insert(
                name.clone(),
                link.with_member(node.id, node.kind, &ifc.name, ifc.mtu),
            );
        }
    }
    Ok(links.into_iter().map(|(k, v)| (k, Arc::new(v))).collect())
}

fn build_node(
    spec: &NodeSpec,
    links: &HashMap<String, Arc<Link>>,
    config: &GeneratorConfig,
) -> io::Result<Node> {
    let protocols = spec
        .services
        .iter()
        .map(|s| s.parse::<Protocol>().map(|p| p.with_ospf_options(config.ospf)))
        .collect::<io::Result<Vec<_>>>()?;
    let mut node = Node::new(spec.id, &spec.name).with_services(ServiceSet::from_protocols(protocols));
    node.kind = spec.kind;
    for ifc in &spec.interfaces {
        for address in &ifc.addresses {
            if address.parse::<IpNetwork>().is_err() {
                warn!("{}/{}: '{}' is not a valid CIDR address", spec.name, ifc.name, address);
            }
        }
        let mut interface = Interface::new(&ifc.name, ifc.mtu);
        interface.control = ifc.control;
        interface.addresses = ifc.addresses.clone();
        // Links were all built above, unknown names already rejected
        interface.link = ifc.network.as_ref().and_then(|n| links.get(n)).cloned();
        node = node.with_interface(interface);
    }
    Ok(node)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::policy::{is_external_link, min_neighbor_mtu, mtu_mismatch};
    use crate::service::OspfOptions;

    #[test]
    fn test_parse_topology() {
        let topology = Topology::from_file("./demos/topology.toml", &GeneratorConfig::default()).unwrap();
        assert_eq!(topology.nodes.len(), 3);

        let n1 = topology.node("n1").unwrap();
        assert_eq!(n1.id, 1);
        assert_eq!(n1.interfaces.len(), 3);
        let names: Vec<_> = n1.services.iter().map(|s| s.name().to_string()).collect();
        assert_eq!(names, vec!["zebra", "OSPFv2", "OSPFv3", "BGP"]);
        assert!(n1.interfaces[2].control);

        let eth0 = &n1.interfaces[0];
        let link = eth0.link.as_ref().unwrap();
        assert_eq!(link.kind, LinkKind::Wired);
        assert_eq!(link.members.len(), 2);
        assert!(!mtu_mismatch(eth0));

        let eth1 = &n1.interfaces[1];
        assert_eq!(eth1.mtu, 9000);
        assert!(mtu_mismatch(eth1));
        assert_eq!(min_neighbor_mtu(eth1), 1500);
        assert!(is_external_link(eth1));

        assert_eq!(topology.node("2").unwrap().name, "n2");
        assert!(topology.node("n9").is_none());
    }

    #[test]
    fn test_ospf_options_applied() {
        let config = GeneratorConfig {
            ospf: OspfOptions {
                link_detection: true,
            },
            ..GeneratorConfig::default()
        };
        let topology = Topology::from_file("./demos/topology.toml", &config).unwrap();
        let n1 = topology.node("n1").unwrap();
        let ospf = n1.services.iter().find(|s| s.name() == "OSPFv2").unwrap();
        // Fast timers only show up with link detection on
        assert!(ospf
            .interface_config(n1, &n1.interfaces[0])
            .contains("ip ospf hello-interval 2"));
    }

    #[test]
    fn test_unknown_network() {
        let contents = r#"
[[nodes]]
id = 1
name = "n1"
[[nodes.interfaces]]
name = "eth0"
network = "nowhere"
"#;
        let err = Topology::from_toml(contents, &GeneratorConfig::default()).unwrap_err();
        assert_eq!(err.kind(), io::ErrorKind::InvalidInput);
    }

    #[test]
    fn test_unknown_service() {
        let contents = r#"
[[nodes]]
id = 1
name = "n1"
services = ["zebra", "IS-IS"]
"#;
        let err = Topology::from_toml(contents, &GeneratorConfig::default()).unwrap_err();
        assert_eq!(err.kind(), io::ErrorKind::InvalidInput);
    }

    #[test]
    fn test_defaults() {
        let contents = r#"
[[networks]]
name = "wlan1"
kind = "wireless"

[[nodes]]
id = 4
name = "n4"
[[nodes.interfaces]]
name = "eth0"
addresses = ["10.0.4.1/32"]
network = "wlan1"
"#;
        let topology = Topology::from_toml(contents, &GeneratorConfig::default()).unwrap();
        let n4 = &topology.nodes[0];
        assert_eq!(n4.kind, NodeKind::Router);
        assert!(n4.services.is_empty());
        assert_eq!(n4.interfaces[0].mtu, 1500);
        assert!(!n4.interfaces[0].control);
        assert_eq!(n4.interfaces[0].link_kind(), Some(LinkKind::Wireless));
    }
}
