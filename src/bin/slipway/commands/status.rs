//! `slipway status` command

use anyhow::Result;

use slipway::ops::status::status;
use slipway::util::shell::Shell;

pub fn execute(shell: &Shell) -> Result<()> {
    let root = super::invocation_root()?;
    status(&root, shell)
}
