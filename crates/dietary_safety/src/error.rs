use thiserror::Error;

/// Non-fatal degradation events raised while filtering.
///
/// None of these propagate to callers as failures: the pipeline degrades
/// by narrowing its output and logging, never by returning `Err`. The
/// variants classify the diagnostic events so operators can tell ordinary
/// filtering from genuine gaps.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum FilterAnomaly {
    #[error("items payload is not an array-like sequence")]
    InvalidInput,

    #[error("item \"{0}\" carries no safety tag metadata")]
    MissingSafetyMetadata(String),

    #[error("restriction \"{0}\" matches no known rule")]
    UnknownRestriction(String),

    #[error("synthetic {0} item failed its own safety filter")]
    FallbackExhausted(String),
}
