//! Per-interface facts derived from the topology, shared by the routing services

use crate::address::{host_part, AddressFamily};
use crate::topology::{Interface, LinkKind, Node, NodeKind, DEFAULT_MTU};

pub const FALLBACK_ROUTER_ID: &str = "0.0.0.0";

/// First IPv4 address on a routed interface (without prefix length),
/// or "0.0.0.0" if the node has none
pub fn router_id(node: &Node) -> String {
    node.routed_interfaces()
        .flat_map(|ifc| ifc.addresses.iter())
        .find(|a| AddressFamily::classify(a) == AddressFamily::IPv4)
        .map(|a| host_part(a).to_string())
        .unwrap_or_else(|| FALLBACK_ROUTER_ID.to_string())
}

/// Is this interface connected to an external (RJ45) link?
pub fn is_external_link(ifc: &Interface) -> bool {
    match &ifc.link {
        Some(link) => link.peers(ifc).any(|p| p.node_kind == NodeKind::Rj45),
        None => false,
    }
}

/// Detect an MTU that OSPF neighbors may disagree on.
/// Anything other than 1500 counts (e.g. a GreTap device has no knowledge of the
/// other nodes), as does an interface with no link to compare against.
pub fn mtu_mismatch(ifc: &Interface) -> bool {
    if ifc.mtu != DEFAULT_MTU {
        return true;
    }
    match &ifc.link {
        Some(link) => link.members.iter().any(|m| m.mtu != ifc.mtu),
        None => true,
    }
}

/// Smallest MTU among this interface and everything on its link
pub fn min_neighbor_mtu(ifc: &Interface) -> u32 {
    match &ifc.link {
        Some(link) => link
            .members
            .iter()
            .map(|m| m.mtu)
            .fold(ifc.mtu, std::cmp::min),
        None => ifc.mtu,
    }
}

/// Is this interface on a notional point-to-point link?
pub fn is_point_to_point(ifc: &Interface) -> bool {
    ifc.link_kind() == Some(LinkKind::PointToPoint)
}
