use std::process;

use clap::Parser;
#[cfg(feature = "cli")]
use colored::*;
use env_logger::Builder;
use log::{debug, info, LevelFilter};
#[cfg(feature = "cli")]
use prettytable::{cell, format, row, Table};

use quaggen::{generate, GeneratorConfig, Protocol, RoutingService, Topology};

#[derive(Parser, Debug)]
#[clap(name = "quaggen", rename_all = "kebab-case")]
/// Generate Quagga routing daemon configs for emulated nodes
pub struct Args {
    #[clap(subcommand)]
    pub cmd: Command,
    /// Path to generator config.toml (defaults apply if missing)
    #[clap(short, long, default_value = "quaggen.toml")]
    pub config: String,
    /// Show debug logs (additive for trace logs)
    #[clap(short, parse(from_occurrences), global = true)]
    pub verbose: u8,
}

#[derive(Parser, Debug)]
#[clap(rename_all = "kebab-case")]
pub enum Command {
    /// Print one generated artifact for a node
    #[clap(alias = "g")]
    Generate(GenerateOptions),
    /// List the routing services that can be enabled
    #[clap(alias = "s")]
    Services,
}

#[derive(Parser, Debug)]
#[clap(rename_all = "kebab-case")]
pub struct GenerateOptions {
    /// Path to topology.toml
    pub topology: String,
    /// Node name or id
    pub node: String,
    /// Quagga.conf, quaggaboot.sh or vtysh.conf
    #[clap(default_value = "Quagga.conf")]
    pub artifact: String,
}

fn run(args: &Args) -> Result<(), Box<dyn std::error::Error>> {
    match &args.cmd {
        Command::Generate(options) => {
            let config = GeneratorConfig::load_or_default(&args.config)?;
            let topology = Topology::from_file(&options.topology, &config)?;
            debug!("Found {} nodes in {}", topology.nodes.len(), options.topology);
            let node = topology
                .node(&options.node)
                .ok_or_else(|| format!("No node '{}' in {}", options.node, options.topology))?;
            print!("{}", generate(node, &options.artifact, &config)?);
        }
        Command::Services => print_services(),
    }
    Ok(())
}

#[cfg(feature = "cli")]
fn print_services() {
    let mut table = Table::new();
    table.set_format(*format::consts::FORMAT_CLEAN);
    table.set_titles(row!["Service", "Depends On", "IPv4", "IPv6", "Daemon"]);
    for protocol in Protocol::all() {
        let desc = protocol.descriptor();
        table.add_row(row![
            desc.name,
            desc.dependencies.join(", "),
            desc.ipv4_routing,
            desc.ipv6_routing,
            desc.daemon
        ]);
    }
    table.printstd();
}

#[cfg(not(feature = "cli"))]
fn print_services() {
    for protocol in Protocol::all() {
        let desc = protocol.descriptor();
        println!("{}\t{}", desc.name, desc.daemon);
    }
}

fn main() {
    let args = Args::parse();

    let (quaggen_level, other_level) = match args.verbose {
        0 => (LevelFilter::Info, LevelFilter::Warn),
        1 => (LevelFilter::Debug, LevelFilter::Warn),
        2 => (LevelFilter::Trace, LevelFilter::Warn),
        _ => (LevelFilter::Trace, LevelFilter::Trace),
    };
    Builder::new()
        .filter(Some("quaggen"), quaggen_level)
        .filter(None, other_level)
        .init();
    info!("Logging at levels {}/{}", quaggen_level, other_level);

    if let Err(err) = run(&args) {
        #[cfg(feature = "cli")]
        eprintln!("{}", err.to_string().red());
        #[cfg(not(feature = "cli"))]
        eprintln!("{}", err);
        process::exit(1);
    }
}
