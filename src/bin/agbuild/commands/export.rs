//! `agbuild export` command

use anyhow::Result;

use crate::cli::ExportArgs;
use agbuild::ops::{export_project, ExportOptions, ExportOutcome};
use agbuild::util::GlobalContext;

pub fn execute(args: ExportArgs, verbose: bool) -> Result<()> {
    let mut ctx = GlobalContext::new()?;
    ctx.set_verbose(verbose);

    let graph_path = ctx.graph_path(args.graph.as_deref())?;
    let config = ctx.config(&graph_path);

    let opts = ExportOptions {
        pretty: config.export.pretty() && !args.compact,
        skip_unsupported_generators: config.export.skip_unsupported_generators(),
    };

    match export_project(&graph_path, &opts)? {
        ExportOutcome::Written { path, libraries } => {
            println!(
                "    Exported {} {} to {}",
                libraries,
                if libraries == 1 { "library" } else { "libraries" },
                path.display()
            );
        }
        ExportOutcome::Skipped(reason) => {
            println!("    Skipped export: {}", reason);
        }
    }

    Ok(())
}
