//! Spell Pronunciation Scoring CLI

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use tracing::{info, warn, Level};
use tracing_subscriber::EnvFilter;

use spellcast_rs::{
    CommandRecognizer, Config, EvaluationRequest, EvaluationResponse, Evaluator,
    OutputFormat, OutputWriter, PhonemeRecognizer, PhonemeSequence, RecognizerConfig,
    SerializedRecognizer, SpellRegistry, UnavailableRecognizer, UnknownSpellPolicy,
};

/// Spell pronunciation scoring
#[derive(Parser)]
#[command(name = "spellcast")]
#[command(about = "Score spoken spells against their reference pronunciation", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Configuration file path
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Extra spellbook TOML file
    #[arg(long, global = true)]
    spellbook: Option<PathBuf>,

    /// Success threshold (a score must be strictly above it)
    #[arg(short, long, global = true)]
    threshold: Option<f64>,

    /// Fail evaluations of spells missing from the spellbook
    #[arg(long, global = true)]
    reject_unknown: bool,

    /// Output format (json, text)
    #[arg(short, long, global = true)]
    format: Option<String>,

    /// Verbosity level (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,
}

#[derive(Subcommand)]
enum Commands {
    /// Recognize a recording and score it against a spell
    Evaluate {
        /// Recorded audio file
        audio: PathBuf,

        /// Spell name (case-insensitive)
        #[arg(short, long)]
        spell: String,

        /// Recognizer program (overrides config)
        #[arg(long)]
        recognizer: Option<String>,

        /// Language identifier passed to the recognizer
        #[arg(short, long)]
        language: Option<String>,

        /// Append responses to this file
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Score phonemes recognized elsewhere against a spell
    Score {
        /// Spell name (case-insensitive)
        #[arg(short, long)]
        spell: String,

        /// Recognized phonemes, space separated
        phonemes: String,
    },

    /// Compare two phoneme strings directly
    Compare {
        /// Recognized phonemes
        user: String,

        /// Reference phonemes
        target: String,
    },

    /// Show the reference phonemes of a spell
    Lookup {
        /// Spell name (case-insensitive)
        spell: String,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Setup logging - quiet by default, use -v for more
    let log_level = match cli.verbose {
        0 => Level::WARN,
        1 => Level::INFO,
        2 => Level::DEBUG,
        _ => Level::TRACE,
    };

    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(EnvFilter::from_default_env().add_directive(log_level.into()))
        .init();

    // Load configuration
    let mut config = if let Some(ref config_path) = cli.config {
        Config::from_file(config_path)
            .with_context(|| format!("Failed to load config from {}", config_path.display()))?
    } else {
        Config::default()
    };

    // Apply CLI overrides
    if let Some(spellbook) = cli.spellbook {
        config.registry.spellbook = Some(spellbook);
    }
    if let Some(threshold) = cli.threshold {
        config.scoring.success_threshold = threshold;
    }
    if cli.reject_unknown {
        config.scoring.unknown_spell = UnknownSpellPolicy::Reject;
    }
    if let Some(ref format) = cli.format {
        config.output.format = format.parse::<OutputFormat>()?;
    }

    match cli.command {
        Commands::Evaluate {
            audio,
            spell,
            recognizer,
            language,
            output,
        } => {
            if let Some(program) = recognizer {
                config.recognizer.program = program;
            }
            if let Some(language) = language {
                config.recognizer.language = language;
            }
            if let Some(output) = output {
                config.output.output_path = Some(output);
            }
            config.validate()?;

            let recognizer = build_recognizer(&config.recognizer);
            let evaluator = build_evaluator(&config, Some(recognizer))?;
            evaluate_file(&config, &evaluator, EvaluationRequest::new(spell, audio))
        }
        Commands::Score { spell, phonemes } => {
            config.validate()?;
            let evaluator = build_evaluator(&config, None)?;
            let response = match evaluator.evaluate_phonemes(&spell, PhonemeSequence::from(phonemes)) {
                Ok(result) => EvaluationResponse::from(result),
                Err(e) => EvaluationResponse::failure(&e),
            };
            write_response(&config, &response)
        }
        Commands::Compare { user, target } => {
            config.validate()?;
            compare(&config, &user, &target);
            Ok(())
        }
        Commands::Lookup { spell } => {
            let registry = SpellRegistry::from_config(&config.registry)
                .context("Failed to load spellbook")?;
            match registry.get(&spell) {
                Some(phonemes) => println!("{}", phonemes),
                None => anyhow::bail!("Unknown spell '{}'", spell),
            }
            Ok(())
        }
    }
}

/// Build the recognizer once for the whole process.
///
/// A recognizer that cannot be loaded is replaced by one that reports it as
/// unavailable on every call, so the failure reaches each caller.
fn build_recognizer(config: &RecognizerConfig) -> Arc<dyn PhonemeRecognizer> {
    match CommandRecognizer::new(config.clone()) {
        Ok(recognizer) if config.serialize => Arc::new(SerializedRecognizer::new(recognizer)),
        Ok(recognizer) => Arc::new(recognizer),
        Err(e) => {
            warn!("Phoneme recognizer not loaded: {}", e);
            Arc::new(UnavailableRecognizer::new(e.to_string()))
        }
    }
}

fn build_evaluator(
    config: &Config,
    recognizer: Option<Arc<dyn PhonemeRecognizer>>,
) -> Result<Evaluator> {
    let registry =
        SpellRegistry::from_config(&config.registry).context("Failed to load spellbook")?;
    info!(
        "Spellbook ready: {} spells (unknown spells: {}, threshold: {})",
        registry.len(),
        config.scoring.unknown_spell,
        config.scoring.success_threshold
    );

    let registry = Arc::new(registry);
    let evaluator = match recognizer {
        Some(recognizer) => Evaluator::new(recognizer, registry),
        None => Evaluator::without_recognizer(registry),
    };
    Ok(evaluator.with_scoring(&config.scoring))
}

/// Evaluate one recording and write the response
fn evaluate_file(config: &Config, evaluator: &Evaluator, request: EvaluationRequest) -> Result<()> {
    info!(
        "Evaluating '{}' from {}",
        request.spell_name,
        request.audio.display()
    );

    let response = evaluator.respond(&request);
    write_response(config, &response)?;

    if let EvaluationResponse::Failure { ref error, .. } = response {
        anyhow::bail!("Evaluation failed: {}", error);
    }
    Ok(())
}

fn compare(config: &Config, user: &str, target: &str) {
    let user = PhonemeSequence::from(user);
    let target = PhonemeSequence::from(target);
    let scorer = spellcast_rs::Scorer::new(config.scoring.success_threshold);

    let raw = scorer.score(&user, &target);
    println!(
        "score: {:.1} ({})",
        spellcast_rs::round_score(raw),
        if scorer.is_success(raw) { "pass" } else { "fail" }
    );
}

fn write_response(config: &Config, response: &EvaluationResponse) -> Result<()> {
    let mut writer =
        OutputWriter::new(config.output.clone()).context("Failed to create output writer")?;
    writer.write(response)?;
    Ok(())
}
