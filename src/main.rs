mod app;
mod cli;
mod host;

use anyhow::{Context, Result};
use clap::Parser;
use rand::SeedableRng;
use rand::rngs::StdRng;
use std::fs;
use vsearch_experiment::{ExperimentConfig, ParticipantInfo, Session};
use vsearch_scenario::{Generator, GeneratorConfig, read_scenario_file, scenario_path, write_scenario_file};

use app::App;
use cli::{Cli, Commands, GenerateArgs};

fn seeded_rng(seed: Option<u64>) -> StdRng {
    match seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_os_rng(),
    }
}

fn generate(config: &ExperimentConfig, args: &GenerateArgs) -> Result<()> {
    let generator_config: GeneratorConfig = match &args.from {
        Some(path) => {
            let text = fs::read_to_string(path)
                .with_context(|| format!("reading {}", path.display()))?;
            serde_json::from_str(&text).with_context(|| format!("parsing {}", path.display()))?
        }
        None => args.generator_config(),
    };

    let scenario = Generator::new(generator_config, seeded_rng(args.seed))?.generate();
    let path = scenario_path(&config.scenario_dir, &args.name);
    write_scenario_file(&path, &scenario)?;
    println!(
        "Wrote {} ({} objects, target {}, {} search)",
        path.display(),
        scenario.len(),
        scenario.presence_str(),
        scenario.search_type,
    );
    Ok(())
}

fn show(config: &ExperimentConfig, name: &str) -> Result<()> {
    let path = scenario_path(&config.scenario_dir, name);
    let scenario = read_scenario_file(&path, |kind, pos| {
        println!("{:<12} ({:>7.2}, {:>7.2}, {:>7.2})", format!("{kind:?}"), pos.x, pos.y, pos.z);
    })?;
    println!(
        "{}: target {}, {} search, {:?} layout, {} objects",
        path.display(),
        scenario.presence_str(),
        scenario.search_type,
        scenario.layout,
        scenario.len(),
    );
    Ok(())
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let cli = Cli::parse();
    let config = match &cli.config {
        Some(path) => ExperimentConfig::from_file(path)?,
        None => ExperimentConfig::default(),
    };

    match cli.command {
        Commands::Generate(args) => generate(&config, &args),
        Commands::Show { name } => show(&config, &name),
        Commands::Run {
            participant,
            experimenter,
            start_time,
            seed,
        } => {
            let participant = ParticipantInfo::new(participant, experimenter, start_time)?;
            let session = Session::create(config, participant, &mut seeded_rng(seed))
                .context("cannot start session")?;
            App::new(session).run()
        }
    }
}
