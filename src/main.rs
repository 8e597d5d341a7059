//! Command line driver for the Game of Life engine

use anyhow::{Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use life_engine::{
    config::{CliOverrides, OutputFormat, Settings},
    game_of_life::{
        create_example_patterns, load_pattern_auto, load_pattern_from_file,
        load_patterns_from_directory, save_pattern_to_file, GameOfLifeRules, Grid, SimulationEngine,
    },
    utils::{ColorOutput, GridFormatter},
    Driver, StopHandle,
};
use std::io::BufRead;
use std::ops::ControlFlow;
use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};
use tracing::info;
use tracing_subscriber::{EnvFilter, FmtSubscriber};

#[derive(Parser)]
#[command(name = "life")]
#[command(about = "Conway's Game of Life simulator")]
#[command(version = "0.1.0")]
struct Cli {
    /// Verbose logging (overridden by RUST_LOG)
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Clone, Copy, ValueEnum)]
enum FormatArg {
    Text,
    Pattern,
    Json,
}

impl From<FormatArg> for OutputFormat {
    fn from(arg: FormatArg) -> Self {
        match arg {
            FormatArg::Text => OutputFormat::Text,
            FormatArg::Pattern => OutputFormat::Pattern,
            FormatArg::Json => OutputFormat::Json,
        }
    }
}

#[derive(Subcommand)]
enum Commands {
    /// Run a simulation from a pattern file or a random grid
    Run {
        /// Configuration file path
        #[arg(short, long, default_value = "config/default.yaml")]
        config: PathBuf,

        /// Starting pattern (overrides config)
        #[arg(short, long)]
        pattern: Option<PathBuf>,

        /// Grid height (overrides config)
        #[arg(long)]
        height: Option<usize>,

        /// Grid width (overrides config)
        #[arg(long)]
        width: Option<usize>,

        /// Number of generations (overrides config)
        #[arg(short, long, conflicts_with = "forever")]
        generations: Option<usize>,

        /// Run until stopped
        #[arg(long)]
        forever: bool,

        /// Delay between generations in milliseconds (overrides config)
        #[arg(short, long)]
        interval_ms: Option<u64>,

        /// Seed for the random starting grid (overrides config)
        #[arg(short, long)]
        seed: Option<u64>,

        /// Compute generations on all cores
        #[arg(long)]
        parallel: bool,

        /// Output format (overrides config)
        #[arg(short, long, value_enum)]
        format: Option<FormatArg>,

        /// Print every n-th generation (overrides config)
        #[arg(long)]
        show_every: Option<usize>,

        /// Read commands from stdin: Enter or `p` toggles pause, `q` quits
        #[arg(long)]
        interactive: bool,
    },

    /// Advance a pattern a fixed number of generations and print the result
    Step {
        /// Pattern file
        #[arg(short, long)]
        pattern: PathBuf,

        /// Number of generations
        #[arg(short, long, default_value = "1")]
        generations: usize,

        /// Grid height; defaults to the pattern's line count
        #[arg(long, requires = "width")]
        height: Option<usize>,

        /// Grid width; defaults to the pattern's longest line
        #[arg(long, requires = "height")]
        width: Option<usize>,

        /// Output format
        #[arg(short, long, value_enum, default_value = "text")]
        format: FormatArg,

        /// Save the final generation as a pattern file
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Print the live neighbour count of every cell in a pattern
    Neighbours {
        /// Pattern file
        #[arg(short, long)]
        pattern: PathBuf,
    },

    /// List the patterns in the configured pattern directory
    Patterns {
        /// Configuration file path
        #[arg(short, long, default_value = "config/default.yaml")]
        config: PathBuf,
    },

    /// Create a default configuration and example patterns
    Setup {
        /// Directory to create files in
        #[arg(short, long, default_value = ".")]
        directory: PathBuf,

        /// Force overwrite existing files
        #[arg(short, long)]
        force: bool,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose)?;

    match cli.command {
        Commands::Run {
            config,
            pattern,
            height,
            width,
            generations,
            forever,
            interval_ms,
            seed,
            parallel,
            format,
            show_every,
            interactive,
        } => {
            let overrides = CliOverrides {
                height,
                width,
                generations,
                forever,
                interval_ms,
                seed,
                parallel,
                pattern_file: pattern,
                format: format.map(OutputFormat::from),
                show_every,
            };
            run_command(config, overrides, interactive)
        }
        Commands::Step {
            pattern,
            generations,
            height,
            width,
            format,
            output,
        } => step_command(pattern, generations, height.zip(width), format.into(), output),
        Commands::Neighbours { pattern } => neighbours_command(pattern),
        Commands::Patterns { config } => patterns_command(config),
        Commands::Setup { directory, force } => setup_command(directory, force),
    }
}

fn init_logging(verbose: bool) -> Result<()> {
    let default_level = if verbose { "debug" } else { "warn" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    let subscriber = FmtSubscriber::builder()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .finish();
    tracing::subscriber::set_global_default(subscriber)
        .context("Failed to set tracing subscriber")?;
    Ok(())
}

/// Build the starting engine from the settings
fn build_engine(settings: &Settings) -> Result<SimulationEngine> {
    let sim = &settings.simulation;

    let engine = match (settings.resolved_pattern_file(), sim.seed) {
        (Some(path), _) => {
            let grid = load_pattern_from_file(&path, sim.height, sim.width)
                .with_context(|| format!("Failed to load pattern from {}", path.display()))?;
            SimulationEngine::with_grid(sim.height, sim.width, grid)?
        }
        (None, Some(seed)) => SimulationEngine::with_seed(sim.height, sim.width, seed),
        (None, None) => SimulationEngine::new(sim.height, sim.width),
    };

    Ok(engine.parallel(sim.parallel))
}

/// Toggle pause / stop from lines typed on stdin
fn spawn_stdin_controls(handle: StopHandle) {
    std::thread::spawn(move || {
        for line in std::io::stdin().lock().lines() {
            let Ok(line) = line else { break };
            match line.trim() {
                "q" | "quit" => {
                    handle.stop();
                    break;
                }
                "" | "p" | "pause" => {
                    let paused = handle.toggle_pause();
                    info!(paused, "pause toggled");
                }
                other => eprintln!(
                    "{}",
                    ColorOutput::error(&format!(
                        "Unknown command '{}' (Enter/p: pause, q: quit)",
                        other
                    ))
                ),
            }
        }
    });
}

fn run_command(config_path: PathBuf, overrides: CliOverrides, interactive: bool) -> Result<()> {
    let mut settings = Settings::from_file_or_default(&config_path)
        .with_context(|| format!("Failed to load config from {}", config_path.display()))?;
    settings.merge_with_cli(&overrides);
    settings.validate().context("Configuration validation failed")?;

    let engine = build_engine(&settings)?;
    let format = settings.output.format;
    let show_every = settings.output.show_every;

    if format == OutputFormat::Text {
        println!(
            "{}",
            ColorOutput::info(&format!(
                "Simulating {}x{} grid",
                engine.height(),
                engine.width()
            ))
        );
    }
    println!("{}", GridFormatter::format_generation(0, engine.grid(), format)?);

    let mut driver = Driver::new(engine)
        .with_interval(Duration::from_millis(settings.simulation.interval_ms))
        .stop_when_extinct(settings.simulation.stop_when_extinct);

    if interactive {
        spawn_stdin_controls(driver.handle());
    }

    let start_time = Instant::now();
    let mut output_error = None;
    let summary = driver.run(settings.simulation.generations.into(), |generation, grid| {
        if generation % show_every != 0 {
            return ControlFlow::Continue(());
        }
        match GridFormatter::format_generation(generation, grid, format) {
            Ok(rendered) => {
                println!("{}", rendered);
                ControlFlow::Continue(())
            }
            Err(e) => {
                output_error = Some(e);
                ControlFlow::Break(())
            }
        }
    });

    if let Some(e) = output_error {
        return Err(e).context("Failed to format generation");
    }

    if format == OutputFormat::Text {
        let message = format!(
            "Ran {} generation(s) in {:.3}s, {} cell(s) alive",
            summary.generations,
            start_time.elapsed().as_secs_f64(),
            summary.final_population
        );
        if summary.extinct {
            println!("{}", ColorOutput::warning(&format!("{} (extinct)", message)));
        } else {
            println!("{}", ColorOutput::success(&message));
        }
    }

    Ok(())
}

fn load_for_step(pattern: &Path, shape: Option<(usize, usize)>) -> Result<Grid> {
    let grid = match shape {
        Some((height, width)) => load_pattern_from_file(pattern, height, width),
        None => load_pattern_auto(pattern),
    };
    grid.with_context(|| format!("Failed to load pattern from {}", pattern.display()))
}

fn step_command(
    pattern: PathBuf,
    generations: usize,
    shape: Option<(usize, usize)>,
    format: OutputFormat,
    output: Option<PathBuf>,
) -> Result<()> {
    let grid = load_for_step(&pattern, shape)?;
    let result = GameOfLifeRules::evolve_generations(grid, generations);

    println!("{}", GridFormatter::format_generation(generations, &result, format)?);

    if let Some(path) = output {
        save_pattern_to_file(&result, &path)
            .with_context(|| format!("Failed to save pattern to {}", path.display()))?;
        println!("{}", ColorOutput::success(&format!("Saved to {}", path.display())));
    }

    Ok(())
}

fn neighbours_command(pattern: PathBuf) -> Result<()> {
    let grid = load_for_step(&pattern, None)?;

    println!("Grid ({}x{}):", grid.height(), grid.width());
    println!("{}", GridFormatter::format_grid_with_coords(&grid));
    println!("Live neighbours:");
    print!("{}", GridFormatter::format_neighbour_map(&grid));

    Ok(())
}

fn patterns_command(config_path: PathBuf) -> Result<()> {
    let settings = Settings::from_file_or_default(&config_path)?;
    let dir = &settings.input.pattern_directory;

    let patterns = load_patterns_from_directory(dir)
        .with_context(|| format!("Failed to read pattern directory {}", dir.display()))?;

    if patterns.is_empty() {
        println!("{}", ColorOutput::warning(&format!("No patterns in {}", dir.display())));
        return Ok(());
    }

    println!("Patterns in {}:", dir.display());
    for (name, grid) in &patterns {
        println!(
            "  {:24} {:>4}x{:<4} {:>5} alive",
            name,
            grid.height(),
            grid.width(),
            grid.living_count()
        );
    }

    Ok(())
}

fn setup_command(directory: PathBuf, force: bool) -> Result<()> {
    println!("{}", ColorOutput::info("Setting up project structure..."));

    let config_path = directory.join("config/default.yaml");
    let pattern_dir = directory.join("patterns");

    if !config_path.exists() || force {
        let mut settings = Settings::default();
        settings.input.pattern_directory = PathBuf::from("patterns");
        settings
            .to_file(&config_path)
            .context("Failed to create default configuration")?;
        println!("Created: {}", config_path.display());
    } else {
        println!("Skipped: {} (already exists)", config_path.display());
    }

    let gun_config = directory.join("config/gosper_glider_gun.yaml");
    if !gun_config.exists() || force {
        let mut settings = Settings::default();
        settings.simulation.height = 40;
        settings.simulation.width = 80;
        settings.simulation.generations = None;
        settings.simulation.stop_when_extinct = false;
        settings.input.pattern_file = Some(PathBuf::from("patterns/gosper_glider_gun.txt"));
        settings.to_file(&gun_config)?;
        println!("Created: {}", gun_config.display());
    }

    create_example_patterns(&pattern_dir).context("Failed to create example patterns")?;
    println!("Created example patterns in: {}", pattern_dir.display());

    println!("\n{}", ColorOutput::success("Setup complete!"));
    println!("\nNext steps:");
    println!("1. Edit configuration files in {}", directory.join("config").display());
    println!("2. Run: life run --config config/gosper_glider_gun.yaml");

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_cli_parsing() {
        let cli = Cli::try_parse_from([
            "life", "run", "--config", "test.yaml", "--generations", "5", "--format", "json",
        ]);
        assert!(cli.is_ok());

        let cli = Cli::try_parse_from(["life", "run", "--generations", "5", "--forever"]);
        assert!(cli.is_err());

        let cli = Cli::try_parse_from(["life", "step", "--pattern", "p.txt", "--height", "3"]);
        assert!(cli.is_err());
    }

    #[test]
    fn test_setup_command() {
        let temp_dir = tempdir().unwrap();
        let result = setup_command(temp_dir.path().to_path_buf(), false);

        assert!(result.is_ok());
        assert!(temp_dir.path().join("config/default.yaml").exists());
        assert!(temp_dir.path().join("config/gosper_glider_gun.yaml").exists());
        assert!(temp_dir.path().join("patterns/glider.txt").exists());
    }

    #[test]
    fn test_build_engine_from_pattern() {
        let temp_dir = tempdir().unwrap();
        let pattern = temp_dir.path().join("blinker.txt");
        std::fs::write(&pattern, "000\n111\n").unwrap();

        let mut settings = Settings::default();
        settings.simulation.height = 4;
        settings.simulation.width = 5;
        settings.input.pattern_file = Some(pattern);

        let engine = build_engine(&settings).unwrap();
        assert_eq!(engine.grid().shape(), (4, 5));
        assert_eq!(engine.grid().living_cells(), vec![(1, 0), (1, 1), (1, 2)]);
    }

    #[test]
    fn test_build_engine_seeded() {
        let mut settings = Settings::default();
        settings.simulation.seed = Some(3);

        let a = build_engine(&settings).unwrap();
        let b = build_engine(&settings).unwrap();
        assert_eq!(a.grid(), b.grid());
    }
}
