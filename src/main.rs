use anyhow::{Context, Result};
use clap::Parser;

use panelstack::cli::CliArgs;
use panelstack::scenario;

fn main() -> Result<()> {
    let args = CliArgs::parse();
    panelstack::tracing::init(args.log);

    let config = args.load_config()?;

    if args.dump_config {
        let yaml = serde_yaml::to_string(&config).context("Failed to serialize config")?;
        print!("{}", yaml);
        return Ok(());
    }

    let steps = scenario::run(config, &args.group);

    if args.json {
        let json = serde_json::to_string_pretty(&steps).context("Failed to serialize report")?;
        println!("{}", json);
        return Ok(());
    }

    for step in &steps {
        println!("== {}", step.label);
        for panel in &step.panels {
            let depth = panel
                .depth
                .map(|d| d.to_string())
                .unwrap_or_else(|| "-".to_string());
            println!(
                "  panel#{:<3} {:<8} ratio {:>5.2}  depth {:<2} alpha {:.3}",
                panel.id, panel.position, panel.ratio, depth, panel.backdrop_alpha
            );
        }
    }

    Ok(())
}
