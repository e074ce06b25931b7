use serde::Serialize;

use crate::cmd::{disconnect, InfoArgs, Target};
use crate::exit::{vpp_error, CliResult, SUCCESS};
use crate::output::{print_json, OutputFormat};

#[derive(Serialize)]
struct PeerCreds {
    uid: u32,
    gid: u32,
    pid: u32,
}

#[derive(Serialize)]
struct InfoOutput {
    socket: String,
    program: String,
    version: String,
    build_date: String,
    client_index: u32,
    messages: usize,
    ping_latency_ms: Option<f64>,
    peer_credentials: Option<PeerCreds>,
    connected: bool,
}

pub fn run(_args: InfoArgs, target: &Target, format: OutputFormat) -> CliResult<i32> {
    let link = target.connect()?;
    let engine = link.show_version().map_err(vpp_error)?;
    let ping_latency_ms = link
        .ping()
        .ok()
        .map(|d| (d.as_secs_f64() * 1000.0 * 100.0).round() / 100.0);
    let (client_index, messages, peer_credentials) = link.with_channel(|channel| {
        (
            channel.client_index(),
            channel.catalogue().len(),
            channel.peer_credentials(),
        )
    });
    disconnect(link);

    let out = InfoOutput {
        socket: target.socket.display().to_string(),
        program: engine.program,
        version: engine.version,
        build_date: engine.build_date,
        client_index,
        messages,
        ping_latency_ms,
        peer_credentials: peer_credentials.map(|(uid, gid, pid)| PeerCreds { uid, gid, pid }),
        connected: true,
    };
    print_info(&out, format);
    Ok(SUCCESS)
}

fn print_info(out: &InfoOutput, format: OutputFormat) {
    match format {
        OutputFormat::Json => print_json(out),
        OutputFormat::Table | OutputFormat::Pretty => {
            println!("Engine Info:");
            println!("  Socket:           {}", out.socket);
            println!("  Program:          {} {}", out.program, out.version);
            println!("  Built:            {}", out.build_date);
            println!("  Client index:     {}", out.client_index);
            println!("  Messages known:   {}", out.messages);
            match out.ping_latency_ms {
                Some(ms) => println!("  Ping:             {ms:.2}ms"),
                None => println!("  Ping:             unavailable"),
            }
            match &out.peer_credentials {
                Some(c) => println!(
                    "  Peer credentials: uid={} gid={} pid={}",
                    c.uid, c.gid, c.pid
                ),
                None => println!("  Peer credentials: unavailable"),
            }
        }
    }
}
