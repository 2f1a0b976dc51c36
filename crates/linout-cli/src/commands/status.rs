//! Audio server liveness.

use super::common::GlobalArgs;
use linout_io::server_pid;

pub fn run(global: &GlobalArgs) -> anyhow::Result<()> {
    let settings = global.settings()?;
    let name = &settings.server_process;

    match server_pid(name) {
        Some(pid) => println!("{name} is running (pid {pid})"),
        None => println!("{name} is not running"),
    }
    Ok(())
}
