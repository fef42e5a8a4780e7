use std::path::{Path, PathBuf};

use anyhow::{Context, Result, bail};
use clap::{Parser, Subcommand};
use ht_bridge::{
    BackendKind, ClassifierBackend, OutputClaims, OutputKind, Settings, collect_inputs,
    process_document,
};
use ht_core::{ClassifierError, EmotionCategory, Pipeline, Tables};
use serde_json::json;

#[derive(Parser)]
#[command(name = "ht", about = "Compile narrative text into haptic actuator commands")]
struct Cli {
    /// Settings file (defaults to $HT_CONFIG, then built-in defaults)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Skip the classifier and score with rules only
    #[arg(long, global = true)]
    rules_only: bool,

    /// Replay classifier output recorded in a JSON file
    #[arg(long, global = true, conflicts_with = "rules_only")]
    fixture: Option<PathBuf>,

    /// Enable verbose debug output
    #[arg(long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Compile text documents into per-sentence haptic commands
    Compile {
        /// Text file(s) to compile
        #[arg(required_unless_present = "dir")]
        files: Vec<PathBuf>,

        /// Compile every .txt file in a directory
        #[arg(long)]
        dir: Option<PathBuf>,

        /// Output directory
        #[arg(long, default_value = "haptics")]
        out: PathBuf,
    },

    /// Write blended pre-normalization scores for plotting
    Raw {
        /// Text file(s) to score
        #[arg(required_unless_present = "dir")]
        files: Vec<PathBuf>,

        /// Score every .txt file in a directory
        #[arg(long)]
        dir: Option<PathBuf>,

        /// Output directory
        #[arg(long, default_value = "scores")]
        out: PathBuf,
    },

    /// Compile a single sentence and print the record
    Score {
        /// Sentence text
        sentence: String,

        /// Print blended scores instead of commands
        #[arg(long)]
        raw: bool,
    },

    /// Print the lookup tables as JSON
    Tables,
}

fn init_tracing(verbose: bool) {
    use tracing_subscriber::EnvFilter;

    let filter = if verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::from_default_env().add_directive(tracing::Level::WARN.into())
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_ansi(false)
        .init();
}

fn load_settings(cli: &Cli) -> Result<Settings> {
    let mut settings = Settings::load(cli.config.as_deref()).context("failed to load settings")?;
    if cli.rules_only {
        settings.classifier.backend = BackendKind::RulesOnly;
    } else if let Some(fixture) = &cli.fixture {
        settings.classifier.backend = BackendKind::Fixture;
        settings.classifier.fixture = Some(fixture.clone());
    }
    Ok(settings)
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    match &cli.command {
        Commands::Compile { files, dir, out } => {
            cmd_compile(&cli, files, dir.as_deref(), out, OutputKind::Haptic).await
        }
        Commands::Raw { files, dir, out } => {
            cmd_compile(&cli, files, dir.as_deref(), out, OutputKind::Raw).await
        }
        Commands::Score { sentence, raw } => cmd_score(&cli, sentence, *raw).await,
        Commands::Tables => cmd_tables(),
    }
}

async fn open(cli: &Cli) -> Result<(Pipeline<'static>, ClassifierBackend)> {
    let settings = load_settings(cli)?;
    let pipeline = Pipeline::new(Tables::standard(), settings.pipeline)
        .context("invalid pipeline settings")?;
    let backend = ClassifierBackend::from_settings(&settings.classifier)
        .await
        .context("failed to start classifier (use --rules-only to run without it)")?;
    Ok((pipeline, backend))
}

// ---------------------------------------------------------------------------
// Commands
// ---------------------------------------------------------------------------

async fn cmd_compile(
    cli: &Cli,
    files: &[PathBuf],
    dir: Option<&Path>,
    out: &Path,
    kind: OutputKind,
) -> Result<()> {
    let paths = collect_inputs(files, dir).with_context(|| match dir {
        Some(dir) => format!("failed to read dir {}", dir.display()),
        None => "failed to collect inputs".to_string(),
    })?;
    if paths.is_empty() {
        bail!("no input documents");
    }

    let (pipeline, backend) = open(cli).await?;

    let mut claims = OutputClaims::default();
    let mut failed = 0usize;
    for path in &paths {
        let outcome = match claims.check(path, &kind.output_path(path, out)) {
            Ok(()) => process_document(&pipeline, &backend, path, out, kind).await,
            Err(e) => Err(e),
        };
        match outcome {
            Ok(report) => {
                claims.record(&report);
                println!(
                    "compiled {} → {} ({} sentences)",
                    path.display(),
                    report.output.display(),
                    report.sentences
                );
                if report.fallbacks > 0 {
                    println!("  {} sentences scored by rules only", report.fallbacks);
                }
            }
            Err(e) => {
                failed += 1;
                tracing::error!(path = %path.display(), "failed to compile: {e}");
                eprintln!("failed {}: {e}", path.display());
            }
        }
    }

    if failed > 0 {
        bail!("{failed} of {} documents failed", paths.len());
    }
    println!("done. {} documents", paths.len());
    Ok(())
}

async fn cmd_score(cli: &Cli, sentence: &str, raw: bool) -> Result<()> {
    let (pipeline, backend) = open(cli).await?;
    let sentence = sentence.trim().to_string();
    let classified = backend
        .classify_all(std::slice::from_ref(&sentence))
        .await
        .pop()
        .unwrap_or(Err(ClassifierError::Missing));

    let json = if raw {
        serde_json::to_string_pretty(&pipeline.raw_sentence(1, &sentence, &classified))?
    } else {
        serde_json::to_string_pretty(&pipeline.compile_sentence(1, &sentence, &classified))?
    };
    println!("{json}");
    Ok(())
}

fn cmd_tables() -> Result<()> {
    let tables = Tables::standard();
    let categories: Vec<_> = EmotionCategory::ALL
        .iter()
        .map(|&category| {
            let phrases: Vec<&str> = tables
                .phrases()
                .filter(|(c, _)| *c == category)
                .map(|(_, p)| p)
                .collect();
            let resolved = tables.profile(category).map(|p| {
                json!({
                    "waveform": tables.resolve_waveform(p.vibration.pattern),
                    "rgb": tables.resolve_color(p.light.color),
                })
            });
            json!({
                "category": category,
                "keywords": tables.keywords(category),
                "phrases": phrases,
                "profile": tables.profile(category),
                "resolved": resolved,
            })
        })
        .collect();

    let fanout: serde_json::Map<String, serde_json::Value> = tables
        .fanout_labels()
        .map(|(label, targets)| {
            let weights: serde_json::Map<String, serde_json::Value> = targets
                .iter()
                .map(|(c, w)| (c.to_string(), json!(w)))
                .collect();
            (label.to_string(), serde_json::Value::Object(weights))
        })
        .collect();

    let doc = json!({ "categories": categories, "classifier_fanout": fanout });
    println!("{}", serde_json::to_string_pretty(&doc)?);
    Ok(())
}
