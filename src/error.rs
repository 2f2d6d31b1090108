//! Error taxonomy for the solver core. Every variant documents the recovery policy a
//! caller is expected to follow — some are retryable at a smaller scope, most are fatal
//! because they indicate a corrupted table file or a contract violation in the
//! evaluator's own precomputed data.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum SolverError {
    #[error("hand-rank table file not found at {path}")]
    TableFileMissing { path: String },

    #[error("hand-rank table file at {path} is malformed: {reason}")]
    TableFileMalformed { path: String, reason: String },

    #[error("could not parse range specification {spec:?}: {reason}")]
    RangeParseError { spec: String, reason: String },

    #[error("card overlap: a card appears more than once across hole cards and board")]
    CardOverlap,

    #[error("rank map lookup failed for a canonical hand the table builder should have covered — this indicates a bug in table construction, not bad input")]
    RankMapMiss,

    #[error("infoset table exhausted its {capacity} slots during CFR traversal")]
    InfosetTableFull { capacity: usize },
}
