use std::path::PathBuf;

use thiserror::Error;

/// 분석 파이프라인 에러 타입
#[derive(Error, Debug)]
pub enum AnalysisError {
    #[error("File not found: {0:?}")]
    FileNotFound(PathBuf),

    #[error("Failed to parse {path:?}: {reason}")]
    Parse { path: PathBuf, reason: String },

    #[error("Filter word config not found: {0:?}")]
    ConfigMissing(PathBuf),

    #[error("Invalid filter word config {path:?}: {source}")]
    Config {
        path: PathBuf,
        #[source]
        source: serde_yaml::Error,
    },

    #[error("Chat log has no data rows: {0:?}")]
    EmptyLog(PathBuf),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("{context}: {source}")]
    Io {
        context: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to render {path:?}: {reason}")]
    Plot { path: PathBuf, reason: String },
}

impl AnalysisError {
    pub fn io(context: impl Into<String>, source: std::io::Error) -> Self {
        Self::Io {
            context: context.into(),
            source,
        }
    }
}

pub type AnalysisResult<T> = Result<T, AnalysisError>;
