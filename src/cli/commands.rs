//! Command implementations for the collegebot CLI.

use std::io::{self, BufRead, Write};
use std::path::Path;
use std::sync::Arc;
use std::thread;
use std::time::{Duration, Instant};

use rand::SeedableRng;
use rand::rngs::StdRng;

use crate::analysis::TextNormalizer;
use crate::catalog::IntentCatalog;
use crate::cli::args::*;
use crate::cli::output::*;
use crate::config::{BotConfig, ChatConfig};
use crate::engine::{ChatEngine, ChatEngineBuilder};
use crate::error::{BotError, Result};
use crate::ml::{IntentClassifier, IntentTrainer, ModelArtifact};
use crate::session::Transcript;

/// Chat input that wipes the transcript instead of being answered.
pub const CLEAR_COMMAND: &str = "/clear";

/// Execute a CLI command.
pub fn execute_command(args: BotArgs) -> Result<()> {
    let config = load_config(&args)?;
    match &args.command {
        Command::Chat(chat_args) => chat(chat_args, &config, &args),
        Command::Ask(ask_args) => ask(ask_args, &config, &args),
        Command::Train(train_args) => train(train_args, &config, &args),
        Command::Validate => validate(&args),
    }
}

/// Load the configuration file, or the defaults.
pub fn load_config(args: &BotArgs) -> Result<BotConfig> {
    match &args.config {
        Some(path) => BotConfig::load(path),
        None => Ok(BotConfig::default()),
    }
}

/// Load the catalog file, or the built-in catalog.
pub fn load_catalog(args: &BotArgs) -> Result<IntentCatalog> {
    match &args.catalog {
        Some(path) => IntentCatalog::load(path),
        None => IntentCatalog::builtin(),
    }
}

fn trainer(config: &BotConfig, normalizer: TextNormalizer) -> IntentTrainer {
    IntentTrainer::new(normalizer)
        .with_vectorizer_config(config.vectorizer.clone())
        .with_training_config(config.training.clone())
}

/// Assemble the engine, loading or training the classifier.
pub fn build_engine(
    catalog: IntentCatalog,
    config: &BotConfig,
    model: Option<&Path>,
) -> Result<ChatEngine> {
    let normalizer = TextNormalizer::new();

    let classifier: Arc<dyn IntentClassifier> = match model {
        Some(path) => Arc::new(ModelArtifact::load(path)?.into_classifier(&normalizer)?),
        None => {
            log::info!("no model file given, training in memory");
            let (classifier, _) = trainer(config, normalizer.clone()).train(&catalog)?;
            Arc::new(classifier)
        }
    };

    ChatEngineBuilder::new(Arc::new(catalog))
        .normalizer(normalizer)
        .classifier(classifier)
        .config(config.engine.clone())
        .build()
}

fn make_rng(seed: Option<u64>) -> StdRng {
    match seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_os_rng(),
    }
}

/// Answer a single question.
fn ask(args: &AskArgs, config: &BotConfig, cli_args: &BotArgs) -> Result<()> {
    let engine = build_engine(
        load_catalog(cli_args)?,
        config,
        args.model.model.as_deref(),
    )?;
    let mut rng = make_rng(args.model.seed);

    let question = args.text();
    let reply = engine.respond(&question, &mut rng);
    log::info!("{}", describe_source(&reply.source));

    match cli_args.output_format {
        OutputFormat::Human => {
            println!("{}", reply.text);
            Ok(())
        }
        OutputFormat::Json => output_result(
            "",
            &AskResult {
                question,
                reply,
            },
            cli_args,
        ),
    }
}

/// Run an interactive session on stdin/stdout.
fn chat(args: &ChatArgs, config: &BotConfig, cli_args: &BotArgs) -> Result<()> {
    let engine = build_engine(
        load_catalog(cli_args)?,
        config,
        args.model.model.as_deref(),
    )?;
    let mut rng = make_rng(args.model.seed);
    let mut transcript = Transcript::new();

    if cli_args.output_format == OutputFormat::Human {
        println!(
            "College help desk. Type {} to leave.",
            config.chat.exit_keywords.join(", ")
        );
    }

    let stdin = io::stdin();
    let stdout = io::stdout();
    run_chat(
        &engine,
        &config.chat,
        cli_args.output_format,
        stdin.lock(),
        stdout.lock(),
        &mut rng,
        &mut transcript,
    )?;

    let saved = match &args.transcript {
        Some(path) => {
            transcript.save(path)?;
            Some(path.to_string_lossy().to_string())
        }
        None => None,
    };

    if cli_args.verbosity() > 1 {
        output_result(
            "Session ended",
            &SessionSummary {
                turns: transcript.len(),
                transcript: saved,
            },
            cli_args,
        )?;
    }
    Ok(())
}

/// The chat loop, generic over its input and output.
///
/// Ends on an exit keyword or end of input. Every exchange is recorded in
/// `transcript`.
pub fn run_chat<R, W>(
    engine: &ChatEngine,
    chat: &ChatConfig,
    format: OutputFormat,
    input: R,
    mut output: W,
    rng: &mut StdRng,
    transcript: &mut Transcript,
) -> Result<()>
where
    R: BufRead,
    W: Write,
{
    let mut lines = input.lines();
    loop {
        if format == OutputFormat::Human {
            write!(output, "You: ")?;
            output.flush()?;
        }

        let Some(line) = lines.next() else {
            if format == OutputFormat::Human {
                writeln!(output)?;
            }
            break;
        };
        let line = line?;
        let text = line.trim();

        if text.is_empty() {
            continue;
        }
        if text == CLEAR_COMMAND {
            transcript.clear();
            log::debug!("transcript cleared");
            continue;
        }

        transcript.push_user(text);

        if chat.is_exit(text) {
            transcript.push_bot(chat.farewell.as_str());
            match format {
                OutputFormat::Human => writeln!(output, "Bot: {}", chat.farewell)?,
                OutputFormat::Json => writeln!(
                    output,
                    "{}",
                    serde_json::json!({ "question": text, "text": chat.farewell, "source": { "kind": "exit" } })
                )?,
            }
            break;
        }

        if chat.typing_delay_ms > 0 {
            thread::sleep(Duration::from_millis(chat.typing_delay_ms));
        }

        let reply = engine.respond(text, rng);
        log::info!("{}", describe_source(&reply.source));
        transcript.push_bot(reply.text.as_str());

        match format {
            OutputFormat::Human => writeln!(output, "Bot: {}", reply.text)?,
            OutputFormat::Json => {
                let result = AskResult {
                    question: text.to_string(),
                    reply,
                };
                writeln!(output, "{}", serde_json::to_string(&result)?)?;
            }
        }
    }
    Ok(())
}

/// Train the classifier and write the model file.
fn train(args: &TrainArgs, config: &BotConfig, cli_args: &BotArgs) -> Result<()> {
    if args.output.exists() && !args.force {
        return Err(BotError::invalid_argument(format!(
            "{} already exists. Use --force to overwrite.",
            args.output.display()
        )));
    }

    let catalog = load_catalog(cli_args)?;
    let normalizer = TextNormalizer::new();

    let start = Instant::now();
    let (classifier, summary) = trainer(config, normalizer.clone()).train(&catalog)?;
    ModelArtifact::new(classifier, &normalizer).save(&args.output)?;
    let duration_ms = start.elapsed().as_millis() as u64;

    output_result(
        "Model trained successfully",
        &TrainResult {
            output: args.output.to_string_lossy().to_string(),
            samples: summary.samples,
            classes: summary.classes,
            vocabulary_size: summary.vocabulary_size,
            iterations: summary.fit.iterations,
            converged: summary.fit.converged,
            loss: summary.fit.loss,
            duration_ms,
        },
        cli_args,
    )
}

/// Load the catalog and report its contents.
fn validate(cli_args: &BotArgs) -> Result<()> {
    let catalog = load_catalog(cli_args)?;
    let source = match &cli_args.catalog {
        Some(path) => path.to_string_lossy().to_string(),
        None => "built-in".to_string(),
    };

    output_result(
        "Catalog is valid",
        &catalog_report(&catalog, source),
        cli_args,
    )
}

/// Summarize a validated catalog.
pub fn catalog_report(catalog: &IntentCatalog, source: String) -> CatalogReport {
    let intents = catalog
        .iter()
        .map(|intent| IntentSummary {
            tag: intent.tag.clone(),
            patterns: intent.patterns.len(),
            responses: intent.responses.len(),
            categories: intent
                .responses
                .category_names()
                .into_iter()
                .map(str::to_string)
                .collect(),
            routes: intent.routes.len(),
        })
        .collect();

    CatalogReport {
        source,
        intents,
        total_patterns: catalog.pattern_count(),
    }
}

#[cfg(test)]
mod tests {
    use std::io::Cursor;

    use super::*;
    use crate::session::Speaker;

    fn engine() -> ChatEngine {
        build_engine(
            IntentCatalog::builtin().unwrap(),
            &BotConfig::default(),
            None,
        )
        .unwrap()
    }

    #[test]
    fn test_run_chat_until_exit() {
        let engine = engine();
        let mut rng = StdRng::seed_from_u64(1);
        let mut transcript = Transcript::new();
        let mut output = Vec::new();

        run_chat(
            &engine,
            &ChatConfig::default(),
            OutputFormat::Human,
            Cursor::new("cgpa formula\n\nquit\nlibrary timings\n"),
            &mut output,
            &mut rng,
            &mut transcript,
        )
        .unwrap();

        let output = String::from_utf8(output).unwrap();
        assert!(output.contains("Bot: CGPA = Total Grade Points ÷ Total Credits."));
        assert!(output.contains("Bot: Goodbye!"));

        // the line after the exit keyword is never read
        assert_eq!(transcript.len(), 4);
        assert_eq!(transcript.turns()[3].speaker, Speaker::Bot);
        assert_eq!(transcript.turns()[3].text, "Goodbye!");
    }

    #[test]
    fn test_run_chat_clear_and_json() {
        let engine = engine();
        let mut rng = StdRng::seed_from_u64(1);
        let mut transcript = Transcript::new();
        let mut output = Vec::new();

        run_chat(
            &engine,
            &ChatConfig::default(),
            OutputFormat::Json,
            Cursor::new("what sports clubs are there\n/clear\ncgpa formula\n"),
            &mut output,
            &mut rng,
            &mut transcript,
        )
        .unwrap();

        let output = String::from_utf8(output).unwrap();
        let lines: Vec<serde_json::Value> = output
            .lines()
            .map(|line| serde_json::from_str(line).unwrap())
            .collect();
        assert_eq!(lines.len(), 2);
        assert_eq!(lines[0]["source"]["name"], "sports_clubs");

        // only the exchange after /clear remains
        assert_eq!(transcript.len(), 2);
        assert_eq!(transcript.turns()[0].text, "cgpa formula");
    }

    #[test]
    fn test_catalog_report() {
        let catalog = IntentCatalog::builtin().unwrap();
        let report = catalog_report(&catalog, "built-in".to_string());

        assert_eq!(report.intents.len(), catalog.len());
        let exams = report
            .intents
            .iter()
            .find(|intent| intent.tag == "exam_timetable")
            .unwrap();
        assert!(exams.categories.contains(&"midsem".to_string()));
        assert_eq!(exams.routes, 4);
    }
}
