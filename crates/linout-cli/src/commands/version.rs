//! Front-end and engine versions.

use super::common::{GlobalArgs, invoker};

pub fn run(global: &GlobalArgs) -> anyhow::Result<()> {
    let settings = global.settings()?;
    let invoker = invoker(&settings)?;

    println!("linout {}", env!("CARGO_PKG_VERSION"));
    println!("{} {}", invoker.command().program, invoker.version()?);
    Ok(())
}
