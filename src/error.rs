use thiserror::Error;

/// Which remote submission of a save sequence failed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SavePhase {
    /// The only submission of a single-phase save.
    Single,
    /// Phase 1 of a two-phase save: persisting steps to obtain permanent ids.
    StepPersistence,
    /// Phase 2 of a two-phase save: persisting connections between steps.
    ConnectionPersistence,
}

impl std::fmt::Display for SavePhase {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            SavePhase::Single => "single-phase submission",
            SavePhase::StepPersistence => "step persistence (phase 1)",
            SavePhase::ConnectionPersistence => "connection persistence (phase 2)",
        };
        write!(f, "{}", name)
    }
}

#[derive(Debug, Error)]
pub enum Error {
    #[error("File not found or could not be read: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Failed to parse JSON: {0}")]
    DeserializationError(#[from] serde_json::Error),

    #[error("Flow has no id; a graph cannot be attached to an unpersisted flow")]
    MissingFlowId,

    #[error("Request to backend failed: {0}")]
    HttpError(#[from] reqwest::Error),

    #[error("Backend returned status {status}: {message}")]
    BackendError { status: u16, message: String },

    #[error("Integration metadata reported a failure: {0}")]
    IntegrationMetadataError(String),

    #[error("A save is already in progress for this flow")]
    SaveInProgress,

    #[error("Flow has unsaved changes; save before validating")]
    UnsavedChanges,

    #[error("Save failed during {phase}: {source}")]
    SaveFailed {
        phase: SavePhase,
        #[source]
        source: Box<Error>,
    },
}

pub type Result<T> = std::result::Result<T, Error>;
