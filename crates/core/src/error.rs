use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CompassError {
    #[error("invalid argument: {0}")]
    InvalidArgument(String),
    #[error("cannot resolve against an empty candidate set")]
    EmptyCandidateSet,
    #[error("unknown {kind}: '{value}'")]
    UnknownValue { kind: &'static str, value: String },
    #[error("index {index} out of range for {len} entries")]
    IndexOutOfRange { index: usize, len: usize },
    #[error("no entries match the pool for {0}")]
    EmptyPool(String),
    #[error("team of {per_team} needs at least {required} members, got {actual}")]
    NotEnoughMembers {
        per_team: usize,
        required: usize,
        actual: usize,
    },
    #[error("team size must be between 1 and 10, got {0}")]
    InvalidTeamSize(usize),
}

impl CompassError {
    pub(crate) fn unknown(kind: &'static str, value: impl Into<String>) -> Self {
        Self::UnknownValue {
            kind,
            value: value.into(),
        }
    }
}
