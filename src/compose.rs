//! Build zebra's unified `Quagga.conf` from a node's interfaces and the
//! contributions of every enabled routing service

use itertools::Itertools;
use log::debug;

use crate::address::{render_statement, AddressFamily};
use crate::error::GenerateError;
use crate::topology::{Interface, Node};

/// Render the address statements of one family, one indented line each
fn address_lines<'a, I>(addresses: I) -> Result<String, GenerateError>
where
    I: IntoIterator<Item = &'a String>,
{
    let statements: Vec<String> = addresses
        .into_iter()
        .map(|a| render_statement(a))
        .collect::<Result<_, _>>()?;
    Ok(statements
        .iter()
        .map(|s| format!("  {}\n", s))
        .join(""))
}

fn of_family(ifc: &Interface, family: AddressFamily) -> impl Iterator<Item = &String> {
    ifc.addresses
        .iter()
        .filter(move |a| AddressFamily::classify(a) == family)
}

fn interface_block(node: &Node, ifc: &Interface) -> Result<String, GenerateError> {
    let mut cfg = format!("interface {}\n", ifc.name);
    // Control interfaces are addressed but never handed to a routing daemon
    if ifc.control {
        cfg.push_str(&address_lines(&ifc.addresses)?);
        cfg.push_str("!\n");
        return Ok(cfg);
    }
    if let Some(bad) = ifc
        .addresses
        .iter()
        .find(|a| AddressFamily::classify(a) == AddressFamily::Invalid)
    {
        return Err(GenerateError::InvalidAddress(bad.to_string()));
    }

    let mut cfg_v4 = String::new();
    let mut cfg_v6 = String::new();
    let mut want_ipv4 = false;
    let mut want_ipv6 = false;
    for service in node.services.active() {
        let desc = service.descriptor();
        let ifc_cfg = service.interface_config(node, ifc);
        want_ipv4 |= desc.ipv4_routing;
        // A dual-stack service only feeds the IPv6 section
        if desc.ipv6_routing {
            want_ipv6 = true;
            cfg_v6.push_str(&ifc_cfg);
        } else {
            cfg_v4.push_str(&ifc_cfg);
        }
    }

    if want_ipv4 {
        cfg.push_str(&address_lines(of_family(ifc, AddressFamily::IPv4))?);
        cfg.push_str(&cfg_v4);
    }
    if want_ipv6 {
        cfg.push_str(&address_lines(of_family(ifc, AddressFamily::IPv6))?);
        cfg.push_str(&cfg_v6);
    }
    cfg.push_str("!\n");
    Ok(cfg)
}

/// Compose the full configuration text for a node.
///
/// Output is deterministic for a given interface and service ordering.
pub fn compose(node: &Node) -> Result<String, GenerateError> {
    let mut cfg = String::with_capacity(1024);
    for ifc in &node.interfaces {
        debug!("Composing interface {} on node {}", ifc.name, node.name);
        cfg.push_str(&interface_block(node, ifc)?);
    }
    for service in node.services.active() {
        debug!("Adding {} config for node {}", service.name(), node.name);
        cfg.push_str(&service.global_config(node));
    }
    Ok(cfg)
}
