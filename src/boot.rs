//! `quaggaboot.sh` synthesis
//!
//! The script's shell logic is a contract with the node's runtime: it finds the
//! daemon binaries on the configured search paths, links the config into
//! `/etc/quagga` when that directory exists, starts zebra and then each daemon
//! whose `router` stanza appears in the composed config.
//! [`daemons_for`] applies the same matching rules ahead of time so callers can
//! see which daemons a config will bring up.

use std::fmt;

use itertools::Itertools;
use log::debug;

use crate::config::GeneratorConfig;
use crate::service::{QUAGGA_CONF, QUAGGA_STATE_DIR};
use crate::topology::Node;

/// Protocols started in this order, each when `router <name>` is configured
const ROUTER_PROTOCOLS: [&str; 6] = ["rip", "ripng", "ospf6", "ospf", "bgp", "babel"];

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Daemon {
    Zebra,
    Ripd,
    Ripngd,
    Ospf6d,
    Ospfd,
    Bgpd,
    Babeld,
    /// Started with `-6` when a `router pim6` stanza is configured
    Xpimd { ipv6: bool },
}

impl Daemon {
    fn for_protocol(protocol: &str) -> Option<Self> {
        use Daemon::*;
        match protocol {
            "rip" => Some(Ripd),
            "ripng" => Some(Ripngd),
            "ospf6" => Some(Ospf6d),
            "ospf" => Some(Ospfd),
            "bgp" => Some(Bgpd),
            "babel" => Some(Babeld),
            _ => None,
        }
    }

    pub fn binary(&self) -> &'static str {
        use Daemon::*;
        match self {
            Zebra => "zebra",
            Ripd => "ripd",
            Ripngd => "ripngd",
            Ospf6d => "ospf6d",
            Ospfd => "ospfd",
            Bgpd => "bgpd",
            Babeld => "babeld",
            Xpimd { .. } => "xpimd",
        }
    }
}

impl fmt::Display for Daemon {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Daemon::Xpimd { ipv6: true } => write!(f, "{} -6", self.binary()),
            _ => write!(f, "{}", self.binary()),
        }
    }
}

fn is_word_char(c: char) -> bool {
    c.is_alphanumeric() || c == '_'
}

/// Matches `^router \<protocol\>`
fn has_router(config: &str, protocol: &str) -> bool {
    config.lines().any(|line| {
        line.strip_prefix("router ")
            .and_then(|rest| rest.strip_prefix(protocol))
            .map_or(false, |tail| !tail.starts_with(is_word_char))
    })
}

/// Matches `^[[:space:]]*router[[:space:]]+<stanza>[[:space:]]*$`
fn has_stanza(config: &str, stanza: &str) -> bool {
    config.lines().any(|line| {
        let words: Vec<&str> = line.split_whitespace().collect();
        words == ["router", stanza]
    })
}

/// Daemons the boot script will start for this config, in start order
pub fn daemons_for(config: &str) -> Vec<Daemon> {
    let mut daemons = vec![Daemon::Zebra];
    daemons.extend(
        ROUTER_PROTOCOLS
            .iter()
            .filter(|p| has_router(config, p))
            .filter_map(|p| Daemon::for_protocol(p)),
    );
    let pim6 = has_stanza(config, "pim6");
    if pim6 || has_stanza(config, "pim") {
        daemons.push(Daemon::Xpimd { ipv6: pim6 });
    }
    daemons
}

#[derive(Clone, Debug, PartialEq)]
pub struct BootScript {
    pub daemons: Vec<Daemon>,
    text: String,
}

impl BootScript {
    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn into_text(self) -> String {
        self.text
    }
}

impl fmt::Display for BootScript {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(&self.text)
    }
}

// Entries are plain directories, GeneratorConfig rejects anything the shell would split or expand
fn search_path(dirs: &[String]) -> String {
    format!("\"{}\"", dirs.iter().join(" "))
}

/// Render the boot script for a node's composed config
pub fn synthesize(node: &Node, composed: &str, config: &GeneratorConfig) -> BootScript {
    let daemons = daemons_for(composed);
    debug!(
        "Boot script for {} starts [{}]",
        node.name,
        daemons.iter().join(", ")
    );
    BootScript {
        daemons,
        text: render(
            QUAGGA_CONF,
            &search_path(&config.sbin_search),
            &search_path(&config.bin_search),
            QUAGGA_STATE_DIR,
        ),
    }
}

fn render(conf: &str, sbin_search: &str, bin_search: &str, state_dir: &str) -> String {
    format!(
        r#"#!/bin/sh
# auto-generated by zebra service (quaggen)
QUAGGA_CONF={conf}
QUAGGA_SBIN_SEARCH={sbin_search}
QUAGGA_BIN_SEARCH={bin_search}
QUAGGA_STATE_DIR={state_dir}

searchforprog()
{{
    prog=$1
    searchpath=$@
    ret=
    for p in $searchpath; do
        if [ -x $p/$prog ]; then
            ret=$p
            break
        fi
    done
    echo $ret
}}

confcheck()
{{
    CONF_DIR=`dirname $QUAGGA_CONF`
    # if /etc/quagga exists, point /etc/quagga/Quagga.conf -> CONF_DIR
    if [ "$CONF_DIR" != "/etc/quagga" ] && [ -d /etc/quagga ] && [ ! -e /etc/quagga/Quagga.conf ]; then
        ln -s $CONF_DIR/Quagga.conf /etc/quagga/Quagga.conf
    fi
    # if /etc/quagga exists, point /etc/quagga/vtysh.conf -> CONF_DIR
    if [ "$CONF_DIR" != "/etc/quagga" ] && [ -d /etc/quagga ] && [ ! -e /etc/quagga/vtysh.conf ]; then
        ln -s $CONF_DIR/vtysh.conf /etc/quagga/vtysh.conf
    fi
}}

bootdaemon()
{{
    QUAGGA_SBIN_DIR=$(searchforprog $1 $QUAGGA_SBIN_SEARCH)
    if [ "z$QUAGGA_SBIN_DIR" = "z" ]; then
        echo "ERROR: Quagga's '$1' daemon not found in search path:"
        echo "  $QUAGGA_SBIN_SEARCH"
        return 1
    fi

    flags=""

    if [ "$1" = "xpimd" ] && \
        grep -E -q '^[[:space:]]*router[[:space:]]+pim6[[:space:]]*$' $QUAGGA_CONF; then
        flags="$flags -6"
    fi

    $QUAGGA_SBIN_DIR/$1 $flags -d
    if [ "$?" != "0" ]; then
        echo "ERROR: Quagga's '$1' daemon failed to start!:"
        return 1
    fi
}}

bootquagga()
{{
    QUAGGA_BIN_DIR=$(searchforprog 'vtysh' $QUAGGA_BIN_SEARCH)
    if [ "z$QUAGGA_BIN_DIR" = "z" ]; then
        echo "ERROR: Quagga's 'vtysh' program not found in search path:"
        echo "  $QUAGGA_BIN_SEARCH"
        return 1
    fi

    # fix /var/run/quagga permissions
    id -u quagga 2>/dev/null >/dev/null
    if [ "$?" = "0" ]; then
        chown quagga $QUAGGA_STATE_DIR
    fi

    bootdaemon "zebra"
    for r in {protocols}; do
        if grep -q "^router \<${{r}}\>" $QUAGGA_CONF; then
            bootdaemon "${{r}}d"
        fi
    done

    if grep -E -q '^[[:space:]]*router[[:space:]]+pim6?[[:space:]]*$' $QUAGGA_CONF; then
        bootdaemon "xpimd"
    fi

    $QUAGGA_BIN_DIR/vtysh -b
}}

if [ "$1" != "zebra" ]; then
    echo "WARNING: '$1': all Quagga daemons are launched by the 'zebra' service!"
    exit 1
fi
confcheck
bootquagga
"#,
        conf = conf,
        sbin_search = sbin_search,
        bin_search = bin_search,
        state_dir = state_dir,
        protocols = ROUTER_PROTOCOLS.join(" "),
    )
}
