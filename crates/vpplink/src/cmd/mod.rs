use std::path::PathBuf;
use std::time::Duration;

use clap::{Args, Subcommand};
use tracing::warn;
use vpplink::{ChannelConfig, VppLink};

use crate::exit::{vpp_error, CliError, CliResult, USAGE};
use crate::output::OutputFormat;

pub mod check;
pub mod info;
pub mod interfaces;
pub mod neighbors;
pub mod routes;
pub mod version;

#[derive(Subcommand, Debug)]
pub enum Command {
    /// List interfaces, or look one up by name or tag.
    Interfaces(InterfacesArgs),
    /// List single-path routes of a FIB table.
    Routes(RoutesArgs),
    /// List neighbor entries of an interface.
    Neighbors(NeighborsArgs),
    /// List addresses configured on an interface.
    Addresses(AddressesArgs),
    /// Connect and print engine and session metadata.
    Info(InfoArgs),
    /// Check an API module version against a constraint.
    Check(CheckArgs),
    /// Show version information.
    Version(VersionArgs),
}

/// Where and how to reach the engine.
#[derive(Debug, Clone)]
pub struct Target {
    pub socket: PathBuf,
    pub timeout: Duration,
}

impl Target {
    pub fn connect(&self) -> CliResult<VppLink> {
        let config = ChannelConfig {
            socket_path: self.socket.clone(),
            reply_timeout: self.timeout,
            handshake_timeout: self.timeout,
            ..ChannelConfig::default()
        };
        VppLink::connect(&config).map_err(vpp_error)
    }
}

/// Unregister from the engine; a failure here does not change the outcome.
pub fn disconnect(link: VppLink) {
    if let Err(err) = link.close() {
        warn!(error = %err, "failed to close engine session");
    }
}

pub fn run(command: Command, target: &Target, format: OutputFormat) -> CliResult<i32> {
    match command {
        Command::Interfaces(args) => interfaces::run(args, target, format),
        Command::Routes(args) => routes::run(args, target, format),
        Command::Neighbors(args) => neighbors::run_neighbors(args, target, format),
        Command::Addresses(args) => neighbors::run_addresses(args, target, format),
        Command::Info(args) => info::run(args, target, format),
        Command::Check(args) => check::run(args, target, format),
        Command::Version(args) => version::run(args),
    }
}

#[derive(Args, Debug)]
pub struct InterfacesArgs {
    /// Print the index of the interface with this name.
    #[arg(long, conflicts_with = "tag")]
    pub name: Option<String>,
    /// Print the index of the interface with this tag.
    #[arg(long)]
    pub tag: Option<String>,
}

#[derive(Args, Debug)]
pub struct RoutesArgs {
    /// FIB table id.
    #[arg(long, default_value = "0")]
    pub table: u32,
    /// List the IPv6 table instead of IPv4.
    #[arg(long)]
    pub ipv6: bool,
}

#[derive(Args, Debug)]
pub struct NeighborsArgs {
    /// Interface index.
    pub sw_if_index: u32,
    /// List IPv6 neighbors instead of IPv4.
    #[arg(long)]
    pub ipv6: bool,
}

#[derive(Args, Debug)]
pub struct AddressesArgs {
    /// Interface index.
    pub sw_if_index: u32,
    /// List IPv6 addresses instead of IPv4.
    #[arg(long)]
    pub ipv6: bool,
}

#[derive(Args, Debug, Default)]
pub struct InfoArgs {}

#[derive(Args, Debug)]
pub struct CheckArgs {
    /// API module name, e.g. `interface`.
    pub module: String,
    /// Constraint such as `>=3.1.0, <4.0.0`.
    pub constraint: String,
    /// Read versions from `*.api.json` files instead of the engine.
    #[arg(long, value_name = "DIR")]
    pub api_dir: Option<PathBuf>,
}

#[derive(Args, Debug)]
pub struct VersionArgs {
    /// Show extended build provenance.
    #[arg(long)]
    pub extended: bool,
}

pub fn parse_timeout(input: &str) -> CliResult<Duration> {
    let input = input.trim();
    if input.is_empty() {
        return Err(CliError::new(USAGE, "timeout must not be empty"));
    }

    let (number, unit) = if let Some(num) = input.strip_suffix("ms") {
        (num, "ms")
    } else if let Some(num) = input.strip_suffix('s') {
        (num, "s")
    } else {
        (input, "s")
    };

    let value: u64 = number
        .parse()
        .map_err(|_| CliError::new(USAGE, format!("invalid timeout value: {input}")))?;

    if value == 0 {
        return Err(CliError::new(USAGE, "timeout must be greater than zero"));
    }

    Ok(match unit {
        "ms" => Duration::from_millis(value),
        _ => Duration::from_secs(value),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_timeout_seconds() {
        assert_eq!(parse_timeout("5s").unwrap(), Duration::from_secs(5));
        assert_eq!(parse_timeout("2").unwrap(), Duration::from_secs(2));
    }

    #[test]
    fn parse_timeout_millis() {
        assert_eq!(parse_timeout("150ms").unwrap(), Duration::from_millis(150));
    }

    #[test]
    fn parse_timeout_invalid() {
        assert_eq!(parse_timeout("0s").unwrap_err().code, USAGE);
        assert_eq!(parse_timeout("bad").unwrap_err().code, USAGE);
        assert_eq!(parse_timeout(" ").unwrap_err().code, USAGE);
    }
}
