//! `agbuild flags` command

use anyhow::Result;

use crate::cli::FlagsArgs;
use agbuild::ops::source_flags;
use agbuild::util::GlobalContext;

pub fn execute(args: FlagsArgs, verbose: bool) -> Result<()> {
    let mut ctx = GlobalContext::new()?;
    ctx.set_verbose(verbose);

    let graph_path = ctx.graph_path(args.graph.as_deref())?;
    let files = source_flags(&graph_path, &args.target)?;

    if files.is_empty() {
        println!("# `{}` has no C or C++ sources", args.target);
        return Ok(());
    }

    println!("# Compile flags for `{}`:", args.target);
    for file in &files {
        println!("{}", file.src);
        if ctx.is_verbose() {
            println!("  # working directory: {}", file.working_directory);
        }
        println!("  {}", file.flags);
    }

    Ok(())
}
