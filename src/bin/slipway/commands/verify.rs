//! `slipway verify` command

use anyhow::Result;

use slipway::ops::verify::verify;
use slipway::util::shell::Shell;

pub fn execute(shell: &Shell) -> Result<()> {
    let root = super::invocation_root()?;
    verify(&root, shell)?;
    Ok(())
}
