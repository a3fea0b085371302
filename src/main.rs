use orbsim::{ScenarioConfig, Scenario};
use orbsim::run_2d;
use orbsim::{bench_forces, bench_tick};

use clap::Parser;
use anyhow::{Context, Result};

use std::fs::File;
use std::io::BufReader;
use std::path::PathBuf;

#[derive(Parser, Debug)]
struct Args {
    /// Scenario file under scenarios/
    #[arg(short, default_value = "default.yaml")]
    file_name: String,

    /// Run this many ticks without a window and print a summary
    #[arg(long)]
    ticks: Option<u64>,

    /// Time the force models instead of running a scenario
    #[arg(long)]
    bench: bool,
}

// load here to keep main clean
fn load_scenario_from_yaml(file_name: &str) -> Result<ScenarioConfig> {
    let config_path = PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("scenarios").join(file_name);
    let file = File::open(&config_path).with_context(|| format!("opening {}", config_path.display()))?;
    let reader = BufReader::new(file);
    let scenario_cfg: ScenarioConfig = serde_yaml::from_reader(reader)?;

    Ok(scenario_cfg)
}

fn main() -> Result<()> {
    let args = Args::parse();

    if args.bench {
        bench_forces();
        bench_tick();
        return Ok(());
    }

    let scenario_cfg = load_scenario_from_yaml(&args.file_name)?;
    let mut scenario = Scenario::build_scenario(scenario_cfg)?;

    match args.ticks {
        Some(n) => {
            let mut last = None;
            for _ in 0..n {
                last = Some(scenario.tick());
            }
            if let Some(report) = last {
                println!(
                    "{} ticks: {} orbs, {} gas, alpha = {:.4}, max speed = {:.4}",
                    report.tick,
                    scenario.system.num_orbs,
                    scenario.system.num_gas(),
                    report.alpha,
                    report.max_speed
                );
            }
        }
        None => run_2d(scenario),
    }

    Ok(())
}
