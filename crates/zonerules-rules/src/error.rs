use std::path::PathBuf;

use thiserror::Error;

use crate::zone::codec::CodecError;
use crate::zone::core::ValidationError;

/// Zone lookup and loading errors
#[derive(Error, Debug)]
pub enum RulesError {
    #[error("Unknown zone: {0}")]
    UnknownZone(String),

    #[error("Unknown version {version} for zone {zone}")]
    UnknownVersion { zone: String, version: String },

    #[error("I/O error reading {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error(transparent)]
    Codec(#[from] CodecError),

    #[error(transparent)]
    Validation(#[from] ValidationError),
}

pub type RulesResult<T> = std::result::Result<T, RulesError>;
