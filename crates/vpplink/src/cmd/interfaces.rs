use serde::Serialize;
use vpplink::types::InterfaceDetails;

use crate::cmd::{disconnect, InterfacesArgs, Target};
use crate::exit::{vpp_error, CliResult, FAILURE, SUCCESS};
use crate::output::{print_json, print_rows, OutputFormat};

#[derive(Serialize)]
struct InterfaceOutput {
    sw_if_index: u32,
    name: String,
    tag: String,
    mac: String,
    admin_up: bool,
    link_up: bool,
    mtu: u16,
}

impl From<InterfaceDetails> for InterfaceOutput {
    fn from(iface: InterfaceDetails) -> Self {
        Self {
            sw_if_index: iface.sw_if_index,
            name: iface.name,
            tag: iface.tag,
            mac: iface.mac.to_string(),
            admin_up: iface.admin_up,
            link_up: iface.link_up,
            mtu: iface.mtu,
        }
    }
}

#[derive(Serialize)]
struct SearchOutput<'a> {
    field: &'static str,
    value: &'a str,
    sw_if_index: Option<u32>,
}

pub fn run(args: InterfacesArgs, target: &Target, format: OutputFormat) -> CliResult<i32> {
    let link = target.connect()?;
    let search = match (&args.name, &args.tag) {
        (Some(name), _) => Some(("name", name.as_str(), link.search_interface_with_name(name))),
        (None, Some(tag)) => Some(("tag", tag.as_str(), link.search_interface_with_tag(tag))),
        (None, None) => None,
    };

    let code = match search {
        Some((field, value, found)) => {
            let sw_if_index = found.map_err(vpp_error)?;
            print_search(
                &SearchOutput {
                    field,
                    value,
                    sw_if_index,
                },
                format,
            );
            if sw_if_index.is_some() {
                SUCCESS
            } else {
                FAILURE
            }
        }
        None => {
            let interfaces: Vec<InterfaceOutput> = link
                .dump_interfaces()
                .map_err(vpp_error)?
                .into_iter()
                .map(InterfaceOutput::from)
                .collect();
            print_interfaces(&interfaces, format);
            SUCCESS
        }
    };

    disconnect(link);
    Ok(code)
}

fn print_search(out: &SearchOutput<'_>, format: OutputFormat) {
    match (format, out.sw_if_index) {
        (OutputFormat::Json, _) => print_json(out),
        (_, Some(index)) => println!("{index}"),
        (_, None) => eprintln!("no interface with {} {:?}", out.field, out.value),
    }
}

fn print_interfaces(interfaces: &[InterfaceOutput], format: OutputFormat) {
    if let OutputFormat::Json = format {
        print_json(&interfaces);
        return;
    }
    let rows = interfaces
        .iter()
        .map(|iface| {
            vec![
                iface.sw_if_index.to_string(),
                iface.name.clone(),
                iface.tag.clone(),
                iface.mac.clone(),
                updown(iface.admin_up).to_string(),
                updown(iface.link_up).to_string(),
                iface.mtu.to_string(),
            ]
        })
        .collect();
    print_rows(
        &["INDEX", "NAME", "TAG", "MAC", "ADMIN", "LINK", "MTU"],
        rows,
        format,
    );
}

fn updown(up: bool) -> &'static str {
    if up {
        "up"
    } else {
        "down"
    }
}
