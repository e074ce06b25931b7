use serde::Serialize;
use vpplink::compat::{ApiRegistry, Constraint};

use crate::cmd::{disconnect, CheckArgs, Target};
use crate::exit::{compat_error, vpp_error, CliResult, FAILURE, SUCCESS};
use crate::output::{print_json, OutputFormat};

#[derive(Serialize)]
struct CheckOutput {
    module: String,
    constraint: String,
    found: Option<String>,
    satisfied: bool,
    source: String,
}

pub fn run(args: CheckArgs, target: &Target, format: OutputFormat) -> CliResult<i32> {
    let constraint =
        Constraint::parse(&args.constraint).map_err(|err| compat_error("check", err))?;

    let (registry, source) = match &args.api_dir {
        Some(dir) => (
            ApiRegistry::from_directory(dir).map_err(|err| compat_error("check", err))?,
            dir.display().to_string(),
        ),
        None => {
            let link = target.connect()?;
            let registry = link.api_versions().map_err(vpp_error)?;
            disconnect(link);
            (registry, target.socket.display().to_string())
        }
    };

    let found = registry.version(&args.module);
    let satisfied = registry.requirement_satisfied(&args.module, &constraint);
    let out = CheckOutput {
        module: args.module,
        constraint: constraint.to_string(),
        found: found.map(|v| v.to_string()),
        satisfied,
        source,
    };
    print_check(&out, format);

    Ok(if satisfied { SUCCESS } else { FAILURE })
}

fn print_check(out: &CheckOutput, format: OutputFormat) {
    match format {
        OutputFormat::Json => print_json(out),
        OutputFormat::Table | OutputFormat::Pretty => {
            let found = out.found.as_deref().unwrap_or("absent");
            let verdict = if out.satisfied { "ok" } else { "unsatisfied" };
            println!(
                "{} {found} {} {verdict} ({})",
                out.module, out.constraint, out.source
            );
        }
    }
}
