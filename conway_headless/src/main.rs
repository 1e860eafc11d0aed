//! Headless runner - steps the simulation on a timer and prints each
//! generation to the terminal.

use std::path::PathBuf;
use std::time::Instant;

use clap::Parser;
use tracing::info;
use tracing_subscriber::EnvFilter;

use conway::patterns;
use conway::{Driver, Life, LifeConfig, Result, Viewport};

#[derive(Parser, Debug)]
#[command(name = "conway_headless", about = "Run Conway's Game of Life in the terminal")]
struct Args {
    /// TOML config file
    #[arg(long)]
    config: Option<PathBuf>,

    /// Viewport width in pixels
    #[arg(long, default_value_t = 800.0)]
    width: f64,

    /// Viewport height in pixels
    #[arg(long, default_value_t = 600.0)]
    height: f64,

    /// Height taken by controls, subtracted from the viewport height
    #[arg(long, default_value_t = 0.0)]
    chrome: f64,

    /// Explicit grid size, e.g. "40x30"
    #[arg(long)]
    resolution: Option<String>,

    /// Pattern to start from instead of a random field
    #[arg(long)]
    pattern: Option<String>,

    /// Step interval in milliseconds
    #[arg(long)]
    interval: Option<String>,

    /// Generations to run; 0 runs until Ctrl-C
    #[arg(long, default_value_t = 50)]
    generations: u64,

    #[arg(long)]
    seed: Option<u64>,

    /// Print only the final generation
    #[arg(long)]
    quiet: bool,

    /// List the pattern names and exit
    #[arg(long)]
    list_patterns: bool,
}

fn render(life: &Life) {
    println!(
        "Generation {} | population {} | {}x{}",
        life.generation(),
        life.population(),
        life.grid().width(),
        life.grid().height()
    );
    print!("{}", life.grid());
    println!();
}

fn build(args: &Args) -> Result<Life> {
    let mut config = match &args.config {
        Some(path) => LifeConfig::load(path)?,
        None => LifeConfig::default(),
    };
    if args.seed.is_some() {
        config.seed = args.seed;
    }

    let viewport = Viewport::new(args.width, args.height, args.chrome);
    let mut life = Life::new(config, viewport)?;

    if let Some(text) = &args.resolution {
        life.apply_resolution_text(text)?;
    }
    if let Some(name) = &args.pattern {
        patterns::lookup(name)?;
        life.place_pattern(name);
    }
    if let Some(text) = &args.interval {
        life.set_interval_text(text, Instant::now());
    }
    if let Some(notice) = life.take_notice() {
        info!("{}", notice);
    }
    Ok(life)
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("conway=info")),
        )
        .init();

    let args = Args::parse();
    if args.list_patterns {
        for name in patterns::names() {
            println!("{}", name);
        }
        return Ok(());
    }

    let mut driver = Driver::new(build(&args)?);
    if !args.quiet {
        render(driver.life());
    }

    driver.start(Instant::now());
    let ctrl_c = tokio::signal::ctrl_c();
    tokio::pin!(ctrl_c);

    while let Some(deadline) = driver.next_deadline() {
        tokio::select! {
            _ = tokio::time::sleep_until(tokio::time::Instant::from_std(deadline)) => {
                let tick = driver.poll(Instant::now())?;
                if tick.stepped && !args.quiet {
                    render(driver.life());
                }
                if args.generations > 0 && driver.life().generation() >= args.generations {
                    driver.stop();
                }
            }
            _ = &mut ctrl_c => {
                info!("Interrupted");
                driver.stop();
            }
        }
    }

    let life = driver.life();
    if args.quiet {
        render(life);
    }
    info!(
        "Finished at generation {} with {} live cells{}",
        life.generation(),
        life.population(),
        if life.cycle_detected() { " (cycle detected)" } else { "" }
    );
    Ok(())
}
