//! `slipway clean` command

use anyhow::Result;

use crate::cli::CleanArgs;
use slipway::ops::clean::{clean, CleanOptions};
use slipway::util::shell::Shell;

pub fn execute(args: CleanArgs, shell: &Shell) -> Result<()> {
    let root = super::invocation_root()?;
    clean(&root, shell, &CleanOptions { all: args.all })
}
