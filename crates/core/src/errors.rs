use thiserror::Error;

#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum DomainError {
    #[error("profile is incomplete: `{field}` has not been answered")]
    IncompleteProfile { field: &'static str },
    #[error("scale answer for `{field}` must be in 1..=5, got {value}")]
    InvalidScaleAnswer { field: &'static str, value: u8 },
    #[error("unknown training frequency `{0}`")]
    UnknownTrainingFrequency(String),
    #[error("catalog already contains a product named `{0}`")]
    DuplicateCanonicalName(String),
}

#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum ApplicationError {
    #[error(transparent)]
    Domain(#[from] DomainError),
    #[error("configuration failure: {0}")]
    Configuration(String),
}

impl ApplicationError {
    /// Stable machine-readable class used in CLI payloads.
    pub fn error_class(&self) -> &'static str {
        match self {
            Self::Domain(DomainError::IncompleteProfile { .. })
            | Self::Domain(DomainError::InvalidScaleAnswer { .. })
            | Self::Domain(DomainError::UnknownTrainingFrequency(_)) => "invalid_profile",
            Self::Domain(_) => "domain_invariant",
            Self::Configuration(_) => "config_validation",
        }
    }
}
