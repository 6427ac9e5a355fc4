use crate::policy::router_id;
use crate::topology::Node;

use super::ServiceDescriptor;

/// Peers must be configured by hand, with a full mesh for those sharing an AS
pub(super) static BGP: ServiceDescriptor = ServiceDescriptor {
    custom_needed: true,
    ..ServiceDescriptor::protocol("BGP", "bgpd", true, true, &["killall bgpd"], &["pidof bgpd"])
};

pub(super) fn global(node: &Node) -> String {
    let mut cfg = String::from("!\n! BGP configuration\n!\n");
    cfg.push_str("! You should configure the AS number below,\n");
    cfg.push_str("! along with this router's peers.\n!\n");
    cfg.push_str(&format!("router bgp {}\n", node.id));
    cfg.push_str(&format!("  bgp router-id {}\n", router_id(node)));
    cfg.push_str("  redistribute connected\n");
    cfg.push_str("! neighbor 1.2.3.4 remote-as 555\n!\n");
    cfg
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::topology::Interface;

    #[test]
    fn test_global() {
        let node = Node::new(7, "n7")
            .with_interface(Interface::new("eth0", 1500).with_addresses(&["10.0.7.1/24"]));
        let cfg = global(&node);
        assert!(cfg.starts_with("!\n! BGP configuration\n!\n"));
        assert!(cfg.contains("\nrouter bgp 7\n  bgp router-id 10.0.7.1\n  redistribute connected\n"));
        assert!(cfg.ends_with("! neighbor 1.2.3.4 remote-as 555\n!\n"));
    }

    #[test]
    fn test_global_without_ipv4() {
        let node = Node::new(3, "n3").with_interface(Interface::new("eth0", 1500).with_addresses(&["2001::3/64"]));
        assert!(global(&node).contains("  bgp router-id 0.0.0.0\n"));
    }
}
