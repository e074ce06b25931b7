mod cmd;
mod exit;
mod logging;
mod output;

use std::path::PathBuf;

use clap::Parser;
use vpplink::transport::DEFAULT_API_SOCKET;

use crate::cmd::{Command, Target};
use crate::logging::{init_logging, LogFormat, LogLevel};
use crate::output::OutputFormat;

#[derive(Parser, Debug)]
#[command(name = "vpplink", version, about = "VPP binary API control-plane client")]
struct Cli {
    /// Engine API socket.
    #[arg(long, env = "VPP_API_SOCKET", default_value = DEFAULT_API_SOCKET, global = true)]
    socket: PathBuf,

    /// Longest wait for any engine reply (e.g. 5s, 500ms).
    #[arg(long, default_value = "5s", global = true)]
    timeout: String,

    /// Output format.
    #[arg(long, value_name = "FORMAT", global = true)]
    format: Option<OutputFormat>,

    /// Log output format (stderr).
    #[arg(long, value_name = "FORMAT", default_value = "text", global = true)]
    log_format: LogFormat,

    /// Minimum log level (stderr).
    #[arg(long, value_name = "LEVEL", default_value = "warn", global = true)]
    log_level: LogLevel,

    #[command(subcommand)]
    command: Command,
}

fn main() {
    let cli = Cli::parse();
    init_logging(cli.log_format, cli.log_level);

    let format = cli.format.unwrap_or_else(OutputFormat::default_for_stdout);
    let result = cmd::parse_timeout(&cli.timeout).and_then(|timeout| {
        let target = Target {
            socket: cli.socket,
            timeout,
        };
        cmd::run(cli.command, &target, format)
    });

    match result {
        Ok(code) => std::process::exit(code),
        Err(err) => {
            eprintln!("error: {err}");
            std::process::exit(err.code);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_routes_subcommand() {
        let cli = Cli::try_parse_from(["vpplink", "routes", "--table", "3", "--ipv6"])
            .expect("routes args should parse");

        match cli.command {
            Command::Routes(args) => {
                assert_eq!(args.table, 3);
                assert!(args.ipv6);
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn socket_flag_is_global() {
        let cli = Cli::try_parse_from(["vpplink", "info", "--socket", "/tmp/vpp.sock"])
            .expect("info args should parse");
        assert_eq!(cli.socket, PathBuf::from("/tmp/vpp.sock"));
        assert!(matches!(cli.command, Command::Info(_)));
    }

    #[test]
    fn rejects_name_and_tag_together() {
        let err = Cli::try_parse_from(["vpplink", "interfaces", "--name", "tap0", "--tag", "x"])
            .expect_err("conflicting args should fail");

        assert_eq!(err.kind(), clap::error::ErrorKind::ArgumentConflict);
    }

    #[test]
    fn neighbors_requires_interface_index() {
        let err = Cli::try_parse_from(["vpplink", "neighbors"])
            .expect_err("missing index should fail");
        assert_eq!(
            err.kind(),
            clap::error::ErrorKind::MissingRequiredArgument
        );
    }

    #[test]
    fn parses_check_with_api_dir() {
        let cli = Cli::try_parse_from([
            "vpplink",
            "check",
            "interface",
            ">=3.0.0",
            "--api-dir",
            "/usr/share/vpp/api",
        ])
        .expect("check args should parse");

        match cli.command {
            Command::Check(args) => {
                assert_eq!(args.module, "interface");
                assert_eq!(args.constraint, ">=3.0.0");
                assert_eq!(args.api_dir, Some(PathBuf::from("/usr/share/vpp/api")));
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }
}
