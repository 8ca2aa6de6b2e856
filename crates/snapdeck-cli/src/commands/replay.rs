use std::path::Path;

use anyhow::{Context, Result};

use snapdeck_core::trace::{self, WheelTrace};
use snapdeck_core::AppConfig;

pub fn run(config: &AppConfig, path: &Path) -> Result<()> {
    let wheel_trace = WheelTrace::load(path)
        .with_context(|| format!("loading trace {}", path.display()))?;

    println!(
        "Replaying {} events over {} sections ({})\n",
        wheel_trace.events.len(),
        wheel_trace.total,
        wheel_trace.axis.as_str()
    );

    let lines = trace::replay(&wheel_trace, config);
    for line in &lines {
        println!("{}", line);
    }

    let accepted = lines.iter().filter(|line| line.is_accepted()).count();
    let final_index = lines.last().map(|line| line.index).unwrap_or(0);
    println!(
        "\n{} events, {} accepted, final section {}/{}",
        lines.len(),
        accepted,
        final_index + 1,
        wheel_trace.total
    );

    Ok(())
}
