mod cli;

use anyhow::Context;
use clap::Parser;
use tracing::error;

use qentangle::config::Settings;
use qentangle::experiment::{ExperimentStore, JsonFileStore, MemoryStore, run_experiment};
use qentangle::logging::init_tracing;

use crate::cli::Cli;

fn main() -> anyhow::Result<()> {
    let args = Cli::parse();

    let mut settings = Settings::resolve(args.config.as_deref()).context("Load config")?;
    if let Some(dir) = args.store.clone() {
        settings.store.directory = Some(dir);
    }
    if let Some(directive) = args.log.clone() {
        settings.logging.directive = directive;
    }

    init_tracing(Some(&settings.logging.directive));

    let mut store: Box<dyn ExperimentStore> = match &settings.store.directory {
        Some(dir) => Box::new(
            JsonFileStore::open(dir)
                .with_context(|| format!("Open experiment store {}", dir.display()))?,
        ),
        None => Box::new(MemoryStore::new()),
    };

    let family = args.cmd.family();
    let run = match run_experiment(&family, &settings.analysis, Some(store.as_mut())) {
        Ok(run) => run,
        Err(err) => {
            error!(%err, family = family.tag(), "analysis failed");
            return Err(err).context("Analysis failed");
        }
    };

    if args.json {
        println!("{}", serde_json::to_string_pretty(&run.report)?);
    } else {
        println!("{}", run.report);
        if let Some(id) = run.id {
            println!("Experiment id: {id}");
        }
    }

    Ok(())
}
