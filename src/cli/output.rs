//! Output formatting for CLI commands.

use serde::{Deserialize, Serialize};

use crate::cli::args::{BotArgs, OutputFormat};
use crate::engine::{Reply, ReplySource};
use crate::error::Result;

/// Result structure for a single question.
#[derive(Debug, Serialize, Deserialize)]
pub struct AskResult {
    pub question: String,
    #[serde(flatten)]
    pub reply: Reply,
}

/// Result structure for training.
#[derive(Debug, Serialize, Deserialize)]
pub struct TrainResult {
    pub output: String,
    pub samples: usize,
    pub classes: usize,
    pub vocabulary_size: usize,
    pub iterations: usize,
    pub converged: bool,
    pub loss: f64,
    pub duration_ms: u64,
}

/// Per-intent line of the catalog summary.
#[derive(Debug, Serialize, Deserialize)]
pub struct IntentSummary {
    pub tag: String,
    pub patterns: usize,
    pub responses: usize,
    pub categories: Vec<String>,
    pub routes: usize,
}

/// Result structure for catalog validation.
#[derive(Debug, Serialize, Deserialize)]
pub struct CatalogReport {
    pub source: String,
    pub intents: Vec<IntentSummary>,
    pub total_patterns: usize,
}

/// Result structure for a finished chat session.
#[derive(Debug, Serialize, Deserialize)]
pub struct SessionSummary {
    pub turns: usize,
    pub transcript: Option<String>,
}

/// Output a result in the specified format.
pub fn output_result<T: Serialize>(message: &str, result: &T, args: &BotArgs) -> Result<()> {
    match args.output_format {
        OutputFormat::Human => output_human(message, result, args),
        OutputFormat::Json => output_json(result, args),
    }
}

/// Output in human-readable format.
fn output_human<T: Serialize>(message: &str, result: &T, args: &BotArgs) -> Result<()> {
    if args.verbosity() > 0 && !message.is_empty() {
        println!("{message}");
        println!();
    }

    let value = serde_json::to_value(result)?;
    output_generic_human(&value);
    Ok(())
}

/// Output generic data in human format.
fn output_generic_human(value: &serde_json::Value) {
    match value {
        serde_json::Value::Object(obj) => {
            for (key, val) in obj {
                match val {
                    serde_json::Value::Array(items)
                        if items.iter().any(serde_json::Value::is_object) =>
                    {
                        println!("{key}:");
                        for item in items {
                            println!("  - {}", format_value(item));
                        }
                    }
                    _ => println!("{key}: {}", format_value(val)),
                }
            }
        }
        _ => println!("{}", format_value(value)),
    }
}

/// Output in JSON format.
fn output_json<T: Serialize>(result: &T, args: &BotArgs) -> Result<()> {
    let json = if args.pretty {
        serde_json::to_string_pretty(result)?
    } else {
        serde_json::to_string(result)?
    };

    println!("{json}");
    Ok(())
}

/// One-line description of where a reply came from, shown in verbose mode.
pub fn describe_source(source: &ReplySource) -> String {
    match source {
        ReplySource::Rule { name } => format!("quick rule '{name}'"),
        ReplySource::Intent {
            tag,
            confidence,
            category: Some(category),
        } => format!("intent '{tag}/{category}' ({confidence:.2})"),
        ReplySource::Intent {
            tag, confidence, ..
        } => format!("intent '{tag}' ({confidence:.2})"),
        ReplySource::LowConfidence { tag, confidence } => {
            format!("low confidence, best was '{tag}' ({confidence:.2})")
        }
        ReplySource::UnknownTag { tag } => format!("unknown tag '{tag}'"),
        ReplySource::Empty => "nothing to classify".to_string(),
        ReplySource::Failed { reason } => format!("failed: {reason}"),
    }
}

/// Format a JSON value for display.
fn format_value(value: &serde_json::Value) -> String {
    match value {
        serde_json::Value::String(s) => s.clone(),
        serde_json::Value::Number(n) => n.to_string(),
        serde_json::Value::Bool(b) => b.to_string(),
        serde_json::Value::Array(arr) => {
            let formatted_values = arr.iter().map(format_value).collect::<Vec<_>>().join(", ");
            format!("[{formatted_values}]")
        }
        serde_json::Value::Object(obj) => obj
            .iter()
            .map(|(k, v)| format!("{k}={}", format_value(v)))
            .collect::<Vec<_>>()
            .join(" "),
        serde_json::Value::Null => "null".to_string(),
    }
}
