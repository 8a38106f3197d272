mod board_view;
mod runner_config;
mod session;

use std::path::PathBuf;
use std::time::Duration;

use clap::Parser;
use serde::Serialize;
use snake_engine::config::{ConfigManager, Validate};
use snake_engine::{log, logger, SessionRng, SnakeEngine};

use runner_config::RunnerConfig;
use session::{run_round, RoundSummary};

#[derive(Parser)]
#[command(name = "snake_runner", about = "Headless snake simulation driven by an autopilot")]
struct Args {
    /// YAML config; defaults are used when the file does not exist.
    #[arg(long, default_value = "snake_runner.yaml")]
    config: PathBuf,
    #[arg(long)]
    seed: Option<u64>,
    #[arg(long)]
    rounds: Option<u32>,
    /// Print the board after every tick.
    #[arg(long)]
    render: bool,
    /// Write the default config to `--config` and exit.
    #[arg(long)]
    write_default_config: bool,
    #[arg(long)]
    use_log_prefix: bool,
    #[arg(long)]
    verbose: bool,
}

#[derive(Serialize)]
struct RunSummary {
    seed: u64,
    rounds: Vec<RoundSummary>,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();

    let prefix = if args.use_log_prefix {
        Some("Runner".to_string())
    } else {
        None
    };
    logger::init_logger(prefix, args.verbose);

    let config_manager: ConfigManager<_, RunnerConfig> = ConfigManager::from_yaml_file(args.config.clone());

    if args.write_default_config {
        config_manager.set_config(&RunnerConfig::default())?;
        log!("Default config written to {}", args.config.display());
        return Ok(());
    }

    let mut config = config_manager.get_config()?;
    if let Some(rounds) = args.rounds {
        config.rounds = rounds;
    }
    if args.render {
        config.render = true;
    }
    config.validate()?;

    let engine_rng = args.seed.map(SessionRng::new).unwrap_or_else(SessionRng::from_random);
    let mut engine = SnakeEngine::new(config.engine.clone(), engine_rng)?;
    let seed = engine.seed();
    log!(
        "Snake runner: {}x{} field, {:?} autopilot, {} round(s), seed {}",
        config.engine.field_width,
        config.engine.field_height,
        config.bot_type,
        config.rounds,
        seed
    );

    let mut summaries = Vec::with_capacity(config.rounds as usize);
    let play = play_rounds(&mut engine, &config, seed, &mut summaries);

    tokio::select! {
        _ = play => {}
        _ = tokio::signal::ctrl_c() => {
            log!("Interrupted, reporting finished rounds");
        }
    }

    let summary = RunSummary {
        seed,
        rounds: summaries,
    };
    print!("{}", serde_yaml_ng::to_string(&summary)?);

    Ok(())
}

async fn play_rounds(
    engine: &mut SnakeEngine,
    config: &RunnerConfig,
    seed: u64,
    summaries: &mut Vec<RoundSummary>,
) {
    for round in 1..=config.rounds {
        if round > 1 {
            tokio::time::sleep(Duration::from_millis(config.restart_delay_ms)).await;
            engine.reset();
        }

        let bot_rng = SessionRng::new(seed.wrapping_add(round as u64));
        let summary = run_round(engine, round, config, bot_rng).await;
        log!(
            "[round:{}] finished: score {}, length {}, {} ticks, {:?}",
            summary.round,
            summary.score,
            summary.length,
            summary.ticks,
            summary.end_reason
        );
        summaries.push(summary);
    }
}
