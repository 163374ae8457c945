//! On-disk model artifact.
//!
//! An artifact bundles the fitted vectorizer and model with the name of the
//! analyzer that produced the training tokens. Loading an artifact under a
//! different analyzer is rejected: the vocabulary would silently stop
//! matching the request stems.

use std::fs::File;
use std::io::{BufReader, BufWriter, Read, Write};
use std::path::Path;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::analysis::TextNormalizer;
use crate::error::{BotError, Result};
use crate::ml::intent_classifier::TfIdfIntentClassifier;

/// Format version written into every artifact.
pub const ARTIFACT_VERSION: u32 = 1;

/// Serialized classifier plus the metadata needed to reuse it safely.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ModelArtifact {
    version: u32,
    analyzer: String,
    created_at: DateTime<Utc>,
    classifier: TfIdfIntentClassifier,
}

impl ModelArtifact {
    /// Wrap a classifier trained with `normalizer`.
    pub fn new(classifier: TfIdfIntentClassifier, normalizer: &TextNormalizer) -> Self {
        ModelArtifact {
            version: ARTIFACT_VERSION,
            analyzer: normalizer.analyzer_name().to_string(),
            created_at: Utc::now(),
            classifier,
        }
    }

    pub fn write_to<W: Write>(&self, writer: W) -> Result<()> {
        bincode::serialize_into(writer, self)?;
        Ok(())
    }

    pub fn read_from<R: Read>(reader: R) -> Result<Self> {
        let artifact: ModelArtifact = bincode::deserialize_from(reader)?;
        if artifact.version != ARTIFACT_VERSION {
            return Err(BotError::model(format!(
                "unsupported artifact version {} (expected {ARTIFACT_VERSION})",
                artifact.version
            )));
        }
        Ok(artifact)
    }

    /// Write the artifact to a file.
    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let path = path.as_ref();
        let mut writer = BufWriter::new(File::create(path)?);
        self.write_to(&mut writer)?;
        writer.flush()?;
        log::info!("saved model artifact to {}", path.display());
        Ok(())
    }

    /// Read an artifact from a file.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        log::info!("loading model artifact from {}", path.display());
        Self::read_from(BufReader::new(File::open(path)?))
    }

    /// Unwrap the classifier after checking it was trained with the same
    /// analyzer as `normalizer`.
    pub fn into_classifier(self, normalizer: &TextNormalizer) -> Result<TfIdfIntentClassifier> {
        if self.analyzer != normalizer.analyzer_name() {
            return Err(BotError::model(format!(
                "model was trained with the '{}' analyzer but the normalizer uses '{}'",
                self.analyzer,
                normalizer.analyzer_name()
            )));
        }
        Ok(self.classifier)
    }

    pub fn analyzer(&self) -> &str {
        &self.analyzer
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    pub fn classifier(&self) -> &TfIdfIntentClassifier {
        &self.classifier
    }
}
