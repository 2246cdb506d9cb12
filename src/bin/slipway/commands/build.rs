//! `slipway build` command

use anyhow::Result;

use crate::cli::BuildArgs;
use slipway::ops::build::{build, BuildOptions};
use slipway::util::shell::Shell;

pub fn execute(args: BuildArgs, shell: &Shell) -> Result<()> {
    let root = super::invocation_root()?;

    let opts = BuildOptions {
        force: args.force,
        keep_work: args.keep_work,
        recipe_path: args.recipe,
    };

    build(&root, shell, &opts)?;
    Ok(())
}
