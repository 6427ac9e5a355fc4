use crate::topology::{Interface, Node};

use super::ServiceDescriptor;

pub(super) static BABEL: ServiceDescriptor = ServiceDescriptor::protocol(
    "Babel",
    "babeld",
    false,
    true,
    &["killall babeld"],
    &["pidof babeld"],
);

pub(super) fn global(node: &Node) -> String {
    let mut cfg = String::from("router babel\n");
    for ifc in node.routed_interfaces() {
        cfg.push_str(&format!("  network {}\n", ifc.name));
    }
    cfg.push_str("  redistribute static\n  redistribute connected\n");
    cfg
}

pub(super) fn interface(ifc: &Interface) -> String {
    if ifc.link_kind().map_or(false, |k| k.is_wireless()) {
        "  babel wireless\n  no babel split-horizon\n".to_string()
    } else {
        "  babel wired\n  babel split-horizon\n".to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::topology::{Link, LinkKind};
    use std::sync::Arc;

    #[test]
    fn test_global() {
        let node = Node::new(1, "n1")
            .with_interface(Interface::new("eth0", 1500))
            .with_interface(Interface::new("ctrl0", 1500).control())
            .with_interface(Interface::new("eth1", 1500));
        assert_eq!(
            global(&node),
            "router babel\n  network eth0\n  network eth1\n  redistribute static\n  redistribute connected\n"
        );
    }

    #[test]
    fn test_interface() {
        let wlan = Interface::new("eth0", 1500).on_link(Arc::new(Link::new("wlan1", LinkKind::Wireless)));
        assert_eq!(interface(&wlan), "  babel wireless\n  no babel split-horizon\n");
        let switch = Interface::new("eth0", 1500).on_link(Arc::new(Link::new("sw1", LinkKind::Wired)));
        assert_eq!(interface(&switch), "  babel wired\n  babel split-horizon\n");
        assert_eq!(interface(&Interface::new("eth0", 1500)), "  babel wired\n  babel split-horizon\n");
    }
}
