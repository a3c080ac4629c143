use thiserror::Error;

/// Errors raised by the program/release state model.
#[derive(Debug, Error)]
pub enum PanelError {
    #[error("program {0} is listed more than once")]
    DuplicateProgram(String),
    #[error("unknown program {0}")]
    UnknownProgram(String),
    #[error("program {0} does not have an install toggle")]
    NotAToggleProgram(String),
    #[error("program {0} does not offer releases")]
    NotAReleaseProgram(String),
    #[error("failed to fetch releases for {program}")]
    Fetch {
        program: String,
        #[source]
        source: anyhow::Error,
    },
}
