//! Integration tests for loading catalogs, configurations and models from disk.

use std::fs;

use collegebot::analysis::TextNormalizer;
use collegebot::catalog::IntentCatalog;
use collegebot::cli::commands::build_engine;
use collegebot::config::BotConfig;
use collegebot::engine::ReplySource;
use collegebot::error::{BotError, Result};
use collegebot::ml::{IntentTrainer, ModelArtifact};
use rand::SeedableRng;
use rand::rngs::StdRng;
use tempfile::TempDir;

const SMALL_CATALOG: &str = r#"{
  "intents": [
    {
      "tag": "hostel",
      "patterns": ["hostel rooms", "hostel fees", "hostel allotment"],
      "responses": {
        "general": ["Hostel details are on the portal."],
        "fees": ["Hostel fees are paid each semester."]
      },
      "routes": [{ "category": "fees", "any": ["fee", "cost"] }]
    },
    {
      "tag": "canteen",
      "patterns": ["canteen menu", "canteen timings", "food in the canteen"],
      "responses": ["The canteen is open from 8 AM to 9 PM."]
    }
  ]
}"#;

#[test]
fn test_load_catalog_file() -> Result<()> {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("intents.json");
    fs::write(&path, SMALL_CATALOG)?;

    let catalog = IntentCatalog::load(&path)?;

    assert_eq!(catalog.len(), 2);
    assert_eq!(catalog.tags().collect::<Vec<_>>(), vec!["hostel", "canteen"]);
    assert_eq!(catalog.pattern_count(), 6);

    Ok(())
}

#[test]
fn test_missing_catalog_file() {
    let temp_dir = TempDir::new().unwrap();
    let result = IntentCatalog::load(temp_dir.path().join("missing.json"));

    assert!(matches!(result, Err(BotError::Io(_))));
}

#[test]
fn test_invalid_catalog_fails_loudly() -> Result<()> {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("intents.json");
    fs::write(
        &path,
        r#"{"intents": [{"tag": "hostel", "patterns": ["hostel"], "responses": []}]}"#,
    )?;

    let err = IntentCatalog::load(&path).unwrap_err();
    assert!(err.is_configuration());
    assert!(err.to_string().contains("hostel"));

    Ok(())
}

#[test]
fn test_builtin_catalog_round_trips_through_file() -> Result<()> {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("builtin.json");

    let builtin = IntentCatalog::builtin()?;
    fs::write(&path, builtin.to_json(true)?)?;
    let reloaded = IntentCatalog::load(&path)?;

    assert_eq!(reloaded.len(), builtin.len());
    for intent in builtin.iter() {
        assert_eq!(reloaded.get(&intent.tag), Some(intent));
    }

    Ok(())
}

#[test]
fn test_engine_from_saved_model() -> Result<()> {
    let temp_dir = TempDir::new().unwrap();
    let model_path = temp_dir.path().join("model.bin");

    let catalog = IntentCatalog::from_json_str(SMALL_CATALOG)?;
    let normalizer = TextNormalizer::new();
    let (classifier, summary) = IntentTrainer::new(normalizer.clone()).train(&catalog)?;
    assert_eq!(summary.samples, 6);
    assert_eq!(summary.classes, 2);

    ModelArtifact::new(classifier, &normalizer).save(&model_path)?;

    let engine = build_engine(catalog, &BotConfig::default(), Some(model_path.as_path()))?;
    let mut rng = StdRng::seed_from_u64(3);

    let reply = engine.respond("what are the hostel fees", &mut rng);
    assert_eq!(reply.text, "Hostel fees are paid each semester.");
    assert!(matches!(
        reply.source,
        ReplySource::Intent { ref tag, category: Some(ref c), .. } if tag == "hostel" && c == "fees"
    ));

    let reply = engine.respond("canteen menu", &mut rng);
    assert_eq!(reply.text, "The canteen is open from 8 AM to 9 PM.");

    Ok(())
}

#[test]
fn test_config_file_changes_engine() -> Result<()> {
    let temp_dir = TempDir::new().unwrap();
    let config_path = temp_dir.path().join("config.json");
    fs::write(
        &config_path,
        r#"{"engine": {"confidence_threshold": 1.0, "fallback_response": "Please ask the office."}}"#,
    )?;

    let config = BotConfig::load(&config_path)?;
    let catalog = IntentCatalog::from_json_str(SMALL_CATALOG)?;
    let engine = build_engine(catalog, &config, None)?;
    let mut rng = StdRng::seed_from_u64(3);

    // a threshold of 1.0 rejects every classification
    let reply = engine.respond("canteen menu", &mut rng);
    assert_eq!(reply.text, "Please ask the office.");
    assert!(matches!(reply.source, ReplySource::LowConfidence { .. }));

    Ok(())
}
