use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use docpod_maker::{
    OpenAiCompatibleConfig, OpenAiCompatibleGenerator, PodcastConfig, generate_script,
    load_document, parse_script, truncate_to_context, write_script,
};
use docpod_speech::ModelRegistry;
use std::io::Write;
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "docpod")]
#[command(about = "docpod - Turn documents into podcast scripts", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List the registered text-to-speech models
    Models,
    /// Load and clean a document, printing the text
    Clean {
        /// Local document or http(s) URL
        #[arg(short, long)]
        input: String,
    },
    /// Generate a podcast script from the configured document
    Script {
        /// Path to the podcast TOML configuration
        #[arg(short, long)]
        config: PathBuf,

        /// Base URL of an OpenAI-compatible chat server
        #[arg(short, long, default_value = "http://127.0.0.1:8080")]
        endpoint: String,

        /// Model name sent to the server (defaults to text_to_text_model)
        #[arg(short, long)]
        model: Option<String>,

        /// Context length of the script model, in tokens
        #[arg(long, default_value = "4096")]
        n_ctx: usize,
    },
    /// Print the speaker turns of a script file
    Turns {
        /// Path to a generated script
        #[arg(short, long)]
        script: PathBuf,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    env_logger::init();

    let cli = Cli::parse();
    let registry = ModelRegistry::builtin();

    match cli.command {
        Commands::Models => list_models(&registry),
        Commands::Clean { input } => {
            let document = load_document(&input)
                .await
                .with_context(|| format!("Failed to load {input}"))?;
            println!("{}", document.clean());
        }
        Commands::Script {
            config,
            endpoint,
            model,
            n_ctx,
        } => {
            run_script(&registry, config, endpoint, model, n_ctx).await?;
        }
        Commands::Turns { script } => {
            let raw = std::fs::read_to_string(&script)
                .with_context(|| format!("Failed to read {}", script.display()))?;
            for turn in parse_script(&raw) {
                println!("Speaker {}: {}", turn.speaker_id, turn.text);
            }
        }
    }

    Ok(())
}

fn list_models(registry: &ModelRegistry) {
    for entry in registry.entries() {
        println!("{:<60} {}", entry.model_id(), entry.family());
    }
}

async fn run_script(
    registry: &ModelRegistry,
    config_path: PathBuf,
    endpoint: String,
    model: Option<String>,
    n_ctx: usize,
) -> Result<()> {
    log::info!("Loading configuration from {:?}", config_path);
    let config = PodcastConfig::load(&config_path, registry)
        .with_context(|| format!("Invalid configuration {}", config_path.display()))?;

    let document = load_document(&config.input_file)
        .await
        .with_context(|| format!("Failed to load {}", config.input_file))?;
    let clean_text = document.clean();
    let input = truncate_to_context(&clean_text, n_ctx);

    let mut generator_config = OpenAiCompatibleConfig::new(endpoint);
    generator_config.model = Some(model.unwrap_or_else(|| config.text_to_text_model.clone()));
    let generator = OpenAiCompatibleGenerator::new(generator_config)?;

    let mut stdout = std::io::stdout();
    let script = generate_script(&generator, &config.system_prompt(), input, |line| {
        let _ = write!(stdout, "{line}");
        let _ = stdout.flush();
    })
    .await
    .context("Script generation failed")?;
    println!();

    let turns = parse_script(&script);
    if turns.is_empty() {
        log::warn!("The generated script contains no speaker turns");
    }

    let path = write_script(&config.output_folder, &script)?;
    log::info!("Wrote {} turns to {}", turns.len(), path.display());
    Ok(())
}
