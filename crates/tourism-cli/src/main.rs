use std::io::{self, Read};
use std::path::PathBuf;

use anyhow::{anyhow, bail, Context, Result};
use bat::PrettyPrinter;
use clap::Parser;
use cliclack::spinner;
use console::style;
use tracing_subscriber::EnvFilter;

use tourism::{Agent, Plan};

mod configuration;
mod error;

use configuration::{Overrides, Settings};

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Travel request, e.g. "3-day trip to Paris, art and food focus." (read from stdin when omitted or "-")
    request: Option<String>,

    /// OpenAI API Key (can also be set via TOURISM_API_KEY or OPENAI_API_KEY)
    #[arg(long)]
    api_key: Option<String>,

    /// Model to use
    #[arg(short, long)]
    model: Option<String>,

    /// Sampling temperature
    #[arg(short, long)]
    temperature: Option<f32>,

    /// Base URL of an OpenAI compatible API
    #[arg(long)]
    host: Option<String>,

    /// Upper bound on tokens generated per completion
    #[arg(long)]
    max_tokens: Option<i32>,

    /// TOML file with settings
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Fail when the coordinates are not a valid JSON coordinate set
    #[arg(long)]
    strict: bool,

    /// Print the plan as a JSON object instead of rendering it
    #[arg(long)]
    json: bool,

    /// Log progress to stderr
    #[arg(short, long)]
    verbose: bool,
}

impl Cli {
    fn overrides(&self) -> Overrides {
        Overrides {
            api_key: self.api_key.clone(),
            host: self.host.clone(),
            model: self.model.clone(),
            temperature: self.temperature,
            max_tokens: self.max_tokens,
            strict: self.strict.then_some(true),
        }
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // .env may carry RUST_LOG, so load it before the subscriber
    dotenv::dotenv().ok();
    init_tracing(cli.verbose);

    let request = resolve_request(cli.request.as_deref(), io::stdin())?;
    let settings =
        Settings::load(cli.config.as_deref(), &cli.overrides()).context("Failed to load settings")?;

    let agent = Agent::from_config(settings.provider_config())?
        .with_strict_coordinates(settings.strict);

    let show_progress = !cli.json && console::user_attended_stderr();
    let spin = spinner();
    if show_progress {
        spin.start("planning your trip");
    }

    let result = agent.plan(&request).await;

    if show_progress {
        spin.stop("");
    }
    let plan = result?;

    if cli.json {
        println!("{}", serde_json::to_string_pretty(&plan)?);
    } else {
        print_plan(&plan)?;
    }
    Ok(())
}

/// The library only emits events; the subscriber is installed once, here
fn init_tracing(verbose: bool) {
    let default_filter = if verbose { "warn,tourism=info" } else { "warn" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();
}

fn resolve_request(arg: Option<&str>, mut stdin: impl Read) -> Result<String> {
    let request = match arg {
        Some(text) if text != "-" => text.to_string(),
        _ => {
            let mut buffer = String::new();
            stdin
                .read_to_string(&mut buffer)
                .context("Failed to read travel request from stdin")?;
            buffer
        }
    };

    let request = request.trim();
    if request.is_empty() {
        bail!("A travel request must be provided as an argument or on stdin");
    }
    Ok(request.to_string())
}

fn print_plan(plan: &Plan) -> Result<()> {
    println!("{}", style("Itinerary").bold());
    render(&plan.itinerary, "markdown")?;
    println!("\n");

    println!("{}", style("Coordinates").bold());
    match plan.coordinate_set() {
        Ok(set) => render(&serde_json::to_string_pretty(&set)?, "json")?,
        Err(e) => {
            tracing::warn!("coordinates are not a valid coordinate set: {}", e);
            println!("{}", plan.coordinates);
        }
    }
    println!();
    Ok(())
}

fn render(content: &str, language: &str) -> Result<()> {
    PrettyPrinter::new()
        .input_from_bytes(content.as_bytes())
        .language(language)
        .print()
        .map_err(|e| anyhow!("Failed to render output: {}", e))?;
    Ok(())
}
