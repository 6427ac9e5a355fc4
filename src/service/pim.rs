use crate::topology::Node;

use super::ServiceDescriptor;

/// PIM multicast routing based on XORP
pub(super) static XPIMD: ServiceDescriptor = ServiceDescriptor::protocol(
    "Xpimd",
    "xpimd",
    true,
    false,
    &["killall xpimd"],
    &["pidof xpimd"],
);

const DEFAULT_CANDIDATE: &str = "eth0";

pub(super) fn global(node: &Node) -> String {
    // BSR/RP candidate is the first non-loopback interface
    let ifname = node
        .interfaces
        .iter()
        .map(|ifc| ifc.name.as_str())
        .find(|name| *name != "lo")
        .unwrap_or(DEFAULT_CANDIDATE);
    let mut cfg = String::from("router mfea\n!\n");
    cfg.push_str("router igmp\n!\n");
    cfg.push_str("router pim\n");
    cfg.push_str("  !ip pim rp-address 10.0.0.1\n");
    cfg.push_str(&format!("  ip pim bsr-candidate {}\n", ifname));
    cfg.push_str(&format!("  ip pim rp-candidate {}\n", ifname));
    cfg.push_str("  !ip pim spt-threshold interval 10 bytes 80000\n");
    cfg
}

pub(super) fn interface() -> String {
    "  ip mfea\n  ip igmp\n  ip pim\n".to_string()
}
