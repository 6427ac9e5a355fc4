use crate::address::AddressFamily;
use crate::policy::{is_external_link, is_point_to_point, min_neighbor_mtu, mtu_mismatch, router_id};
use crate::topology::{Interface, Node};

use super::ServiceDescriptor;

pub(super) static OSPFV2: ServiceDescriptor = ServiceDescriptor::protocol(
    "OSPFv2",
    "ospfd",
    true,
    false,
    &["killall ospfd"],
    &["pidof ospfd"],
);

// IPv4 routing flag is set for OSPFv3 too; zebra relies on it to emit the
// interface's IPv4 addresses alongside the IPv6 ones
pub(super) static OSPFV3: ServiceDescriptor = ServiceDescriptor::protocol(
    "OSPFv3",
    "ospf6d",
    true,
    true,
    &["killall ospf6d"],
    &["pidof ospf6d"],
);

pub(super) static OSPFV3_MDR: ServiceDescriptor = ServiceDescriptor::protocol(
    "OSPFv3MDR",
    "ospf6d",
    true,
    true,
    &["killall ospf6d"],
    &["pidof ospf6d"],
);

const MANET_MDR: &str = "\
  ipv6 ospf6 hello-interval 2
  ipv6 ospf6 dead-interval 6
  ipv6 ospf6 retransmit-interval 5
  ipv6 ospf6 network manet-designated-router
  ipv6 ospf6 diffhellos
  ipv6 ospf6 adjacencyconnectivity uniconnected
  ipv6 ospf6 lsafullness mincostlsa
";

/// Opt-in interface tuning, off by default so the generated config
/// only carries MTU fixes
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub struct OspfOptions {
    /// Mark point-to-point links and use fast hello timers, except on
    /// external (RJ45) links which keep the OSPF defaults
    pub link_detection: bool,
}

pub(super) fn ospfv2_global(node: &Node) -> String {
    let mut cfg = String::from("router ospf\n");
    cfg.push_str(&format!("  router-id {}\n", router_id(node)));
    // network 10.0.0.1/24 area 0
    for address in node
        .routed_interfaces()
        .flat_map(|ifc| ifc.addresses.iter())
        .filter(|a| AddressFamily::classify(a) == AddressFamily::IPv4)
    {
        cfg.push_str(&format!("  network {} area 0\n", address));
    }
    cfg.push_str("!\n");
    cfg
}

pub(super) fn ospfv2_interface(ifc: &Interface, options: &OspfOptions) -> String {
    let mut cfg = String::new();
    if mtu_mismatch(ifc) {
        cfg.push_str("  ip ospf mtu-ignore\n");
    }
    if options.link_detection {
        tune_link(&mut cfg, ifc, "ip ospf");
    }
    cfg
}

pub(super) fn ospfv3_global(node: &Node) -> String {
    let mut cfg = String::from("router ospf6\n");
    cfg.push_str(&format!("  router-id {}\n", router_id(node)));
    for ifc in node.routed_interfaces() {
        cfg.push_str(&format!("  interface {} area 0.0.0.0\n", ifc.name));
    }
    cfg.push_str("!\n");
    cfg
}

/// Advertise a reduced interface MTU when a neighbor's is smaller
fn ospfv3_mtu(ifc: &Interface) -> String {
    let min_mtu = min_neighbor_mtu(ifc);
    if min_mtu < ifc.mtu {
        format!("  ipv6 ospf6 ifmtu {}\n", min_mtu)
    } else {
        String::new()
    }
}

pub(super) fn ospfv3_interface(ifc: &Interface, options: &OspfOptions) -> String {
    let mut cfg = ospfv3_mtu(ifc);
    if options.link_detection {
        tune_link(&mut cfg, ifc, "ipv6 ospf6");
    }
    cfg
}

pub(super) fn mdr_interface(ifc: &Interface) -> String {
    let mut cfg = ospfv3_mtu(ifc);
    cfg.push_str("  ipv6 ospf6 instance-id 65\n");
    if ifc.link_kind().map_or(false, |k| k.is_wireless()) {
        cfg.push_str(MANET_MDR);
    }
    cfg
}

fn tune_link(cfg: &mut String, ifc: &Interface, prefix: &str) {
    if is_external_link(ifc) {
        return;
    }
    if is_point_to_point(ifc) {
        cfg.push_str(&format!("  {} network point-to-point\n", prefix));
    }
    cfg.push_str(&format!("  {} hello-interval 2\n", prefix));
    cfg.push_str(&format!("  {} dead-interval 6\n", prefix));
    cfg.push_str(&format!("  {} retransmit-interval 5\n", prefix));
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::topology::{Link, LinkKind, NodeKind};
    use std::sync::Arc;

    fn link(kind: LinkKind, mtus: &[u32]) -> Arc<Link> {
        let mut link = Link::new("net1", kind);
        for (i, mtu) in mtus.iter().enumerate() {
            link = link.with_member(i as u32 + 1, NodeKind::Router, "eth0", *mtu);
        }
        Arc::new(link)
    }

    fn node() -> Node {
        Node::new(1, "n1")
            .with_interface(Interface::new("eth0", 1500).with_addresses(&["10.0.0.1/24", "2001::1/64"]))
            .with_interface(Interface::new("ctrl0", 1500).control().with_addresses(&["172.16.0.1/24"]))
            .with_interface(Interface::new("eth1", 1500).with_addresses(&["10.0.1.1/24"]))
    }

    #[test]
    fn test_ospfv2_global() {
        assert_eq!(
            ospfv2_global(&node()),
            "router ospf\n  router-id 10.0.0.1\n  network 10.0.0.1/24 area 0\n  network 10.0.1.1/24 area 0\n!\n"
        );
    }

    #[test]
    fn test_ospfv3_global() {
        assert_eq!(
            ospfv3_global(&node()),
            "router ospf6\n  router-id 10.0.0.1\n  interface eth0 area 0.0.0.0\n  interface eth1 area 0.0.0.0\n!\n"
        );
    }

    #[test]
    fn test_router_id_fallback() {
        let node = Node::new(2, "n2")
            .with_interface(Interface::new("eth0", 1500).with_addresses(&["2001::2/64"]))
            .with_interface(Interface::new("ctrl0", 1500).control().with_addresses(&["172.16.0.2/24"]));
        assert_eq!(ospfv2_global(&node), "router ospf\n  router-id 0.0.0.0\n!\n");
        assert!(ospfv3_global(&node).contains("  router-id 0.0.0.0\n"));
    }

    #[test]
    fn test_mtu_lines() {
        let defaults = OspfOptions::default();
        let matched = Interface::new("eth0", 1500).on_link(link(LinkKind::Wired, &[1500, 1500]));
        assert_eq!(ospfv2_interface(&matched, &defaults), "");
        assert_eq!(ospfv3_interface(&matched, &defaults), "");

        let jumbo = Interface::new("eth0", 9000).on_link(link(LinkKind::Wired, &[9000, 1500]));
        assert_eq!(ospfv2_interface(&jumbo, &defaults), "  ip ospf mtu-ignore\n");
        assert_eq!(ospfv3_interface(&jumbo, &defaults), "  ipv6 ospf6 ifmtu 1500\n");

        // Smaller than its neighbor: mismatch for v2, nothing to reduce for v3
        let small = Interface::new("eth0", 1400).on_link(link(LinkKind::Wired, &[1400, 1500]));
        assert_eq!(ospfv2_interface(&small, &defaults), "  ip ospf mtu-ignore\n");
        assert_eq!(ospfv3_interface(&small, &defaults), "");
    }

    #[test]
    fn test_mdr_interface() {
        let wired = Interface::new("eth0", 1500).on_link(link(LinkKind::Wired, &[1500]));
        assert_eq!(mdr_interface(&wired), "  ipv6 ospf6 instance-id 65\n");

        let wlan = Interface::new("eth0", 1500).on_link(link(LinkKind::Wireless, &[1500, 1280]));
        let cfg = mdr_interface(&wlan);
        let lines: Vec<_> = cfg.lines().collect();
        assert_eq!(lines.len(), 9);
        assert_eq!(lines[0], "  ipv6 ospf6 ifmtu 1280");
        assert_eq!(lines[1], "  ipv6 ospf6 instance-id 65");
        assert_eq!(lines[5], "  ipv6 ospf6 network manet-designated-router");
        assert_eq!(lines[8], "  ipv6 ospf6 lsafullness mincostlsa");

        let emane = Interface::new("eth0", 1500).on_link(link(LinkKind::Emane, &[1500]));
        assert!(mdr_interface(&emane).ends_with(MANET_MDR));
    }

    #[test]
    fn test_link_detection() {
        let options = OspfOptions {
            link_detection: true,
        };
        let ptp = Interface::new("eth0", 1500).on_link(link(LinkKind::PointToPoint, &[1500, 1500]));
        assert_eq!(
            ospfv2_interface(&ptp, &options),
            "  ip ospf network point-to-point\n  ip ospf hello-interval 2\n  ip ospf dead-interval 6\n  ip ospf retransmit-interval 5\n"
        );
        assert!(ospfv3_interface(&ptp, &options).starts_with("  ipv6 ospf6 network point-to-point\n"));

        let external = Arc::new(
            Link::new("net1", LinkKind::Wired)
                .with_member(1, NodeKind::Router, "eth0", 1500)
                .with_member(2, NodeKind::Rj45, "enp3s0", 1500),
        );
        let node = Node::new(1, "n1").with_interface(Interface::new("eth0", 1500).on_link(external));
        assert_eq!(ospfv2_interface(&node.interfaces[0], &options), "");
    }
}
