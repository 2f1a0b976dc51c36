//! Engine port listing.

use super::common::{GlobalArgs, invoker};

/// Print the engine's port listing exactly as reported.
pub fn run(global: &GlobalArgs) -> anyhow::Result<()> {
    let settings = global.settings()?;
    let listing = invoker(&settings)?.list_ports()?;
    print!("{listing}");
    if !listing.is_empty() && !listing.ends_with('\n') {
        println!();
    }
    Ok(())
}
