use thiserror::Error;

#[derive(Debug, Error, PartialEq)]
pub enum HydraulicsError {
    #[error("pump rated flow must be positive, got {0}")]
    NonPositiveRatedFlow(f64),
    #[error("accumulator discharge time must be positive, got {0}")]
    NonPositiveDischargeTime(f64),
    #[error("accumulator volume must be non-negative, got {0}")]
    NegativeVolume(f64),
    #[error("a pump group needs at least one pump unit")]
    EmptyPumpGroup,
}
