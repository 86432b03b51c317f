mod config;
mod render;
#[cfg(feature = "tui")]
mod tui;

use std::path::PathBuf;

use anyhow::{bail, Result};
use clap::{Args, Parser, Subcommand};
use serde_json::json;
use tracing::debug;

use covar_core::{
    build_prompt, calculate_statistics, parse_input_data, Analyst, StatisticsResult,
    DEFAULT_INPUT_X, DEFAULT_INPUT_Y,
};
use covar_gemini::{GeminiAnalyst, API_KEY_VARS};

use crate::config::Config;

#[derive(Parser)]
#[command(
    name = "covar",
    version,
    about = "Covariance calculator for paired numeric data, with optional AI interpretation"
)]
struct Cli {
    /// Path to a config file (overrides $COVAR_CONFIG)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Args)]
struct InputArgs {
    /// X values, separated by commas and/or whitespace
    #[arg(short, long, allow_hyphen_values = true)]
    x: String,

    /// Y values, separated by commas and/or whitespace
    #[arg(short, long, allow_hyphen_values = true)]
    y: String,
}

#[derive(Subcommand)]
enum Commands {
    /// Compute means and covariance
    Calc {
        #[command(flatten)]
        input: InputArgs,

        /// Print the result as JSON
        #[arg(long)]
        json: bool,

        /// Also draw a scatter plot
        #[arg(long)]
        plot: bool,

        /// Also request an AI interpretation
        #[arg(long)]
        analyze: bool,
    },

    /// Draw a scatter plot of the paired data
    Plot {
        #[command(flatten)]
        input: InputArgs,

        /// Plot width in characters
        #[arg(long)]
        width: Option<usize>,

        /// Plot height in characters
        #[arg(long)]
        height: Option<usize>,
    },

    /// Compute and ask the AI service to interpret the result
    Analyze {
        #[command(flatten)]
        input: InputArgs,
    },

    /// Print the analysis request without sending it
    Prompt {
        #[command(flatten)]
        input: InputArgs,
    },

    /// Interactive terminal editor
    Tui {
        /// Initial X values
        #[arg(short, long, allow_hyphen_values = true, default_value = DEFAULT_INPUT_X)]
        x: String,

        /// Initial Y values
        #[arg(short, long, allow_hyphen_values = true, default_value = DEFAULT_INPUT_Y)]
        y: String,
    },

    /// Show the active configuration
    Config,
}

fn load(path: Option<PathBuf>) -> Result<Config> {
    match path {
        Some(p) => config::load_config_from(&p),
        None => config::load_config(),
    }
}

/// Parse and compute. Malformed input surfaces as the command's error.
fn compute(input: &InputArgs) -> Result<StatisticsResult> {
    let data = parse_input_data(&input.x, &input.y)?;
    debug!(n = data.len(), "parsed dataset");
    Ok(calculate_statistics(data))
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // The TUI owns the terminal; log lines would corrupt the screen.
    if !matches!(cli.command, Commands::Tui { .. }) {
        tracing_subscriber::fmt()
            .with_writer(std::io::stderr)
            .with_env_filter(
                tracing_subscriber::EnvFilter::from_default_env()
                    .add_directive(tracing_subscriber::filter::LevelFilter::WARN.into()),
            )
            .init();
    }

    let cfg = load(cli.config)?;

    match cli.command {
        Commands::Calc {
            input,
            json,
            plot,
            analyze,
        } => cmd_calc(&cfg, &input, json, plot, analyze),
        Commands::Plot {
            input,
            width,
            height,
        } => cmd_plot(&cfg, &input, width, height),
        Commands::Analyze { input } => cmd_analyze(&cfg, &input),
        Commands::Prompt { input } => cmd_prompt(&input),
        Commands::Tui { x, y } => {
            #[cfg(feature = "tui")]
            {
                let analyst = GeminiAnalyst::new(cfg.gemini.settings());
                tui::run(
                    &analyst,
                    covar_core::AppState::new(x, y),
                    cfg.display.precision,
                )
            }
            #[cfg(not(feature = "tui"))]
            {
                let _ = (x, y);
                bail!("tui feature not enabled: rebuild with `--features tui`")
            }
        }
        Commands::Config => cmd_config(&cfg),
    }
}

// ---------------------------------------------------------------------------
// Commands
// ---------------------------------------------------------------------------

fn cmd_calc(cfg: &Config, input: &InputArgs, json: bool, plot: bool, analyze: bool) -> Result<()> {
    let stats = compute(input)?;
    let analysis = if analyze {
        Some(GeminiAnalyst::new(cfg.gemini.settings()).summarize(&stats))
    } else {
        None
    };

    if json {
        let mut out = json!({ "statistics": stats });
        if let Some(result) = &analysis {
            out["analysis"] = match result {
                Ok(text) => json!({ "text": text }),
                Err(e) => json!({ "error": e.to_string() }),
            };
        }
        println!("{}", serde_json::to_string_pretty(&out)?);
        return Ok(());
    }

    print!("{}", render::render_statistics(&stats, cfg.display.precision));
    if plot {
        println!();
        print!(
            "{}",
            render::render_scatter(
                &stats.data,
                cfg.plot.width,
                cfg.plot.height,
                cfg.display.precision
            )
        );
    }
    if let Some(result) = analysis {
        println!();
        match result {
            Ok(text) => println!("{text}"),
            Err(e) => eprintln!("Analysis failed: {e}"),
        }
    }
    Ok(())
}

fn cmd_plot(
    cfg: &Config,
    input: &InputArgs,
    width: Option<usize>,
    height: Option<usize>,
) -> Result<()> {
    let stats = compute(input)?;
    let width = width.unwrap_or(cfg.plot.width);
    let height = height.unwrap_or(cfg.plot.height);
    if width < 2 || height < 2 {
        bail!("plot must be at least 2x2 characters");
    }
    print!(
        "{}",
        render::render_scatter(&stats.data, width, height, cfg.display.precision)
    );
    Ok(())
}

fn cmd_analyze(cfg: &Config, input: &InputArgs) -> Result<()> {
    let stats = compute(input)?;
    let analyst = GeminiAnalyst::new(cfg.gemini.settings());
    debug!(model = analyst.model(), "requesting analysis");
    let text = analyst.summarize(&stats)?;
    println!("{text}");
    Ok(())
}

fn cmd_prompt(input: &InputArgs) -> Result<()> {
    let stats = compute(input)?;
    print!("{}", build_prompt(&stats));
    Ok(())
}

fn cmd_config(cfg: &Config) -> Result<()> {
    let has_key = GeminiAnalyst::new(cfg.gemini.settings()).has_credential();
    println!("Config: {}", config::show_config_path());
    println!();
    println!("[gemini]");
    println!("  model = {}", cfg.gemini.model);
    println!("  temperature = {}", cfg.gemini.temperature);
    println!("  endpoint = {}", cfg.gemini.endpoint);
    println!("  timeout_secs = {}", cfg.gemini.timeout_secs);
    println!(
        "  api_key = {}",
        if has_key {
            "(set)".to_string()
        } else {
            format!("(missing: set gemini.api_key or {})", API_KEY_VARS.join(" / "))
        }
    );
    println!();
    println!("[display]");
    println!("  precision = {}", cfg.display.precision);
    println!();
    println!("[plot]");
    println!("  width = {}", cfg.plot.width);
    println!("  height = {}", cfg.plot.height);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_calc_args_parse() {
        let cli = Cli::try_parse_from(["covar", "calc", "-x", "1,2,3", "-y", "-1 -2 -3", "--json"])
            .unwrap();
        match cli.command {
            Commands::Calc { input, json, .. } => {
                assert!(json);
                let stats = compute(&input).unwrap();
                assert_eq!(stats.n, 3);
                // products of deviations sum to -2; divided by n - 1 = 2
                assert_eq!(stats.sample_covariance, -1.0);
                assert_eq!(stats.population_covariance, -2.0 / 3.0);
            }
            _ => panic!("expected calc"),
        }
    }

    #[test]
    fn test_compute_reports_input_error() {
        let input = InputArgs {
            x: "1,a,3".into(),
            y: "1,2,3".into(),
        };
        let err = compute(&input).unwrap_err();
        assert!(err
            .to_string()
            .starts_with("Inputs must contain only numbers"));
    }

    #[test]
    fn test_tui_defaults() {
        let cli = Cli::try_parse_from(["covar", "tui"]).unwrap();
        match cli.command {
            Commands::Tui { x, y } => {
                assert_eq!(x, DEFAULT_INPUT_X);
                assert_eq!(y, DEFAULT_INPUT_Y);
            }
            _ => panic!("expected tui"),
        }
    }
}
