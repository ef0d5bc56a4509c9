use thiserror::Error;

/// Errors raised by the simulation core.
#[derive(Debug, Error, PartialEq)]
pub enum SimError {
    #[error("cannot splice genomes of different lengths ({left} vs {right})")]
    GenomeLengthMismatch { left: usize, right: usize },
    #[error("no agents available to breed from")]
    EmptyPopulation,
    #[error("generation {generation} still had live agents after {ticks} ticks")]
    TickLimitExceeded { generation: u32, ticks: u32 },
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),
    #[error("cannot normalize a zero-length vector")]
    ZeroLengthVector,
}
