use serde::Serialize;
use vpplink::types::NeighborFlags;

use crate::cmd::{disconnect, AddressesArgs, NeighborsArgs, Target};
use crate::exit::{vpp_error, CliResult, SUCCESS};
use crate::output::{print_json, print_rows, OutputFormat};

#[derive(Serialize)]
struct NeighborOutput {
    sw_if_index: u32,
    ip: String,
    mac: String,
    is_static: bool,
}

#[derive(Serialize)]
struct AddressOutput {
    sw_if_index: u32,
    prefix: String,
}

pub fn run_neighbors(args: NeighborsArgs, target: &Target, format: OutputFormat) -> CliResult<i32> {
    let link = target.connect()?;
    let neighbors: Vec<NeighborOutput> = link
        .interface_neighbors(args.sw_if_index, args.ipv6)
        .map_err(vpp_error)?
        .into_iter()
        .map(|neighbor| NeighborOutput {
            sw_if_index: neighbor.sw_if_index,
            ip: neighbor.ip.to_string(),
            mac: neighbor.mac.to_string(),
            is_static: neighbor.flags.contains(NeighborFlags::STATIC),
        })
        .collect();
    disconnect(link);

    if let OutputFormat::Json = format {
        print_json(&neighbors);
        return Ok(SUCCESS);
    }
    let rows = neighbors
        .into_iter()
        .map(|n| {
            vec![
                n.sw_if_index.to_string(),
                n.ip,
                n.mac,
                if n.is_static { "static" } else { "dynamic" }.to_string(),
            ]
        })
        .collect();
    print_rows(&["SW_IF_INDEX", "IP", "MAC", "KIND"], rows, format);
    Ok(SUCCESS)
}

pub fn run_addresses(args: AddressesArgs, target: &Target, format: OutputFormat) -> CliResult<i32> {
    let link = target.connect()?;
    let addresses: Vec<AddressOutput> = link
        .interface_addresses(args.sw_if_index, args.ipv6)
        .map_err(vpp_error)?
        .into_iter()
        .map(|addr| AddressOutput {
            sw_if_index: addr.sw_if_index,
            prefix: addr.prefix.to_string(),
        })
        .collect();
    disconnect(link);

    if let OutputFormat::Json = format {
        print_json(&addresses);
        return Ok(SUCCESS);
    }
    let rows = addresses
        .into_iter()
        .map(|a| vec![a.sw_if_index.to_string(), a.prefix])
        .collect();
    print_rows(&["SW_IF_INDEX", "PREFIX"], rows, format);
    Ok(SUCCESS)
}
