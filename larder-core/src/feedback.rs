//! Thumbs up/down feedback: records, the append-only CSV log, and statistics.

use std::fmt;
use std::fs::{self, File, OpenOptions};
use std::io;
use std::path::{Path, PathBuf};
use std::str::FromStr;
use std::sync::Arc;

use chrono::{DateTime, Utc};
use fs2::FileExt;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{info, warn};

use crate::config::FeedbackConfig;

/// Recipe name recorded when the recipe has no title.
pub const UNKNOWN_RECIPE: &str = "Unknown";

#[derive(Error, Debug)]
pub enum FeedbackError {
    #[error("Unknown feedback type: {0:?} (expected thumbs_up or thumbs_down)")]
    InvalidCategory(String),

    #[error("Feedback log I/O failed: {0}")]
    Io(#[from] std::io::Error),

    #[error("Feedback log CSV error: {0}")]
    Csv(#[from] csv::Error),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FeedbackCategory {
    ThumbsUp,
    ThumbsDown,
}

impl FeedbackCategory {
    pub fn as_str(&self) -> &'static str {
        match self {
            FeedbackCategory::ThumbsUp => "thumbs_up",
            FeedbackCategory::ThumbsDown => "thumbs_down",
        }
    }
}

impl fmt::Display for FeedbackCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for FeedbackCategory {
    type Err = FeedbackError;

    /// Exact match only: "Thumbs_Up" or " thumbs_up" are rejected.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "thumbs_up" => Ok(FeedbackCategory::ThumbsUp),
            "thumbs_down" => Ok(FeedbackCategory::ThumbsDown),
            other => Err(FeedbackError::InvalidCategory(other.to_string())),
        }
    }
}

/// One row of the feedback log. Column order is the field order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FeedbackRecord {
    pub timestamp: DateTime<Utc>,
    pub recipe_name: String,
    /// Ingredients joined with ", "
    pub ingredients: String,
    /// Dietary preferences joined with ", "
    pub dietary_preferences: String,
    /// Estimated minutes; empty in the file when there was no estimate
    pub total_time: Option<u32>,
    pub feedback_type: FeedbackCategory,
}

impl FeedbackRecord {
    pub fn new(
        feedback_type: FeedbackCategory,
        recipe_name: &str,
        ingredients: &[String],
        dietary_preferences: &[String],
        total_time: Option<u32>,
    ) -> Self {
        let recipe_name = if recipe_name.trim().is_empty() {
            UNKNOWN_RECIPE
        } else {
            recipe_name
        };

        Self {
            timestamp: Utc::now(),
            recipe_name: recipe_name.to_string(),
            ingredients: ingredients.join(", "),
            dietary_preferences: dietary_preferences.join(", "),
            total_time,
            feedback_type,
        }
    }
}

/// Append-only storage for feedback records.
///
/// Implementations must serialize concurrent appends.
pub trait FeedbackStore: Send + Sync + fmt::Debug {
    fn append(&self, record: &FeedbackRecord) -> Result<(), FeedbackError>;

    /// Every record in append order. A store that was never written is empty.
    fn read_all(&self) -> Result<Vec<FeedbackRecord>, FeedbackError>;
}

/// Feedback log kept as a CSV file with a header row.
///
/// Appends hold an exclusive lock on the file, so separate stores (or
/// processes) pointed at the same path never interleave rows or headers.
#[derive(Debug)]
pub struct CsvFeedbackStore {
    path: PathBuf,
}

impl CsvFeedbackStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn from_config(config: &FeedbackConfig) -> Self {
        Self::new(config.path.clone())
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl FeedbackStore for CsvFeedbackStore {
    fn append(&self, record: &FeedbackRecord) -> Result<(), FeedbackError> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }

        let file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)?;
        // Held until `file` is closed at the end of this call.
        file.lock_exclusive()?;

        let write_header = file.metadata()?.len() == 0;
        let mut writer = csv::WriterBuilder::new()
            .has_headers(write_header)
            .from_writer(&file);
        writer.serialize(record)?;
        writer.flush()?;

        if write_header {
            info!(path = %self.path.display(), "Created feedback log");
        }
        Ok(())
    }

    fn read_all(&self) -> Result<Vec<FeedbackRecord>, FeedbackError> {
        let file = match File::open(&self.path) {
            Ok(file) => file,
            Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(Vec::new()),
            Err(e) => return Err(e.into()),
        };
        FileExt::lock_shared(&file)?;
        if file.metadata()?.len() == 0 {
            return Ok(Vec::new());
        }

        let mut reader = csv::Reader::from_reader(&file);
        reader
            .deserialize::<FeedbackRecord>()
            .map(|row| row.map_err(FeedbackError::from))
            .collect()
    }
}

/// Aggregate counts over the feedback log.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FeedbackStats {
    pub total_feedback: usize,
    pub thumbs_up: usize,
    pub thumbs_down: usize,
    /// Percentage of thumbs up, rounded to two decimals
    pub satisfaction_rate: f64,
}

impl FeedbackStats {
    pub fn from_records(records: &[FeedbackRecord]) -> Self {
        let total_feedback = records.len();
        if total_feedback == 0 {
            return Self {
                total_feedback: 0,
                thumbs_up: 0,
                thumbs_down: 0,
                satisfaction_rate: 0.0,
            };
        }

        let thumbs_up = records
            .iter()
            .filter(|r| r.feedback_type == FeedbackCategory::ThumbsUp)
            .count();
        let thumbs_down = total_feedback - thumbs_up;
        let rate = thumbs_up as f64 / total_feedback as f64 * 100.0;

        Self {
            total_feedback,
            thumbs_up,
            thumbs_down,
            satisfaction_rate: (rate * 100.0).round() / 100.0,
        }
    }
}

/// Validates feedback and appends it to a store.
///
/// Logging never fails the caller: an unknown category or a store error is
/// reported as "not logged".
#[derive(Debug, Clone)]
pub struct FeedbackLogger {
    store: Arc<dyn FeedbackStore>,
}

impl FeedbackLogger {
    pub fn new(store: Arc<dyn FeedbackStore>) -> Self {
        Self { store }
    }

    /// Append a record when `feedback_type` is a known category.
    ///
    /// Returns the appended record, or `None` when nothing was written.
    pub fn log(
        &self,
        feedback_type: &str,
        recipe_name: &str,
        ingredients: &[String],
        dietary_preferences: &[String],
        total_time: Option<u32>,
    ) -> Option<FeedbackRecord> {
        let category = match feedback_type.parse::<FeedbackCategory>() {
            Ok(c) => c,
            Err(e) => {
                warn!("Skipping feedback log: {}", e);
                return None;
            }
        };

        let record = FeedbackRecord::new(
            category,
            recipe_name,
            ingredients,
            dietary_preferences,
            total_time,
        );

        match self.store.append(&record) {
            Ok(()) => {
                info!(recipe = %record.recipe_name, feedback = %category, "Feedback logged");
                Some(record)
            }
            Err(e) => {
                warn!("Failed to log feedback: {}", e);
                None
            }
        }
    }

    pub fn stats(&self) -> Result<FeedbackStats, FeedbackError> {
        Ok(FeedbackStats::from_records(&self.store.read_all()?))
    }
}
