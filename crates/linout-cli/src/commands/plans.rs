//! Saved batch plans.

use linout_config::{list_plans, user_plans_dir};

pub fn run() -> anyhow::Result<()> {
    let plans = list_plans();
    if plans.is_empty() {
        println!("No saved plans in {}", user_plans_dir().display());
        return Ok(());
    }

    println!("Saved plans ({}):", user_plans_dir().display());
    for path in plans {
        if let Some(name) = path.file_stem() {
            println!("  {}", name.to_string_lossy());
        }
    }
    Ok(())
}
