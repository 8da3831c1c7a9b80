use std::path::PathBuf;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("cannot list {path}: {source}")]
    Enumeration {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("{path}: {source}")]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("neither energy nor charge prefix exists for {battery}/{attribute}")]
    UnresolvedAttribute { battery: String, attribute: String },

    #[error("not an integer: {raw:?}")]
    Parse { raw: String },

    #[error("no batteries found")]
    NoBatteries,

    #[error("total full capacity is zero across {batteries} battery(s)")]
    ZeroCapacity { batteries: usize },

    #[error("charge totals overflow when adding {battery}")]
    TotalsOverflow { battery: String },

    #[error("percentage out of range for now={now} full={full}")]
    PercentageOverflow { now: i64, full: i64 },
}

pub type Result<T> = std::result::Result<T, Error>;
