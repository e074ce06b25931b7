use serde::Serialize;

use crate::cmd::{disconnect, RoutesArgs, Target};
use crate::exit::{vpp_error, CliResult, SUCCESS};
use crate::output::{print_json, print_rows, OutputFormat};

#[derive(Serialize)]
struct RouteOutput {
    dst: String,
    gw: Option<String>,
    table: u32,
    dst_table: u32,
    sw_if_index: u32,
}

pub fn run(args: RoutesArgs, target: &Target, format: OutputFormat) -> CliResult<i32> {
    let link = target.connect()?;
    let routes: Vec<RouteOutput> = link
        .get_routes(args.table, args.ipv6)
        .map_err(vpp_error)?
        .into_iter()
        .map(|route| RouteOutput {
            dst: route.dst.to_string(),
            gw: route.gw.map(|gw| gw.to_string()),
            table: route.table,
            dst_table: route.dst_table,
            sw_if_index: route.sw_if_index,
        })
        .collect();
    disconnect(link);

    if let OutputFormat::Json = format {
        print_json(&routes);
        return Ok(SUCCESS);
    }
    let rows = routes
        .into_iter()
        .map(|route| {
            vec![
                route.dst,
                route.gw.unwrap_or_else(|| "-".to_string()),
                route.table.to_string(),
                route.dst_table.to_string(),
                route.sw_if_index.to_string(),
            ]
        })
        .collect();
    print_rows(&["DST", "GW", "TABLE", "DST_TABLE", "SW_IF_INDEX"], rows, format);
    Ok(SUCCESS)
}
