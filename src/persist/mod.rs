//! Binary model artifacts.
//!
//! An artifact is a 32-byte [`ArtifactHeader`] followed by a postcard-encoded
//! [`Artifact`]. The header carries a CRC32 of the payload so that truncated
//! or corrupted files are rejected before decoding.

use std::fs;
use std::io::Write;
use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;
use time::format_description::well_known::Rfc3339;
use time::OffsetDateTime;

use crate::estimators::{FittedModel, Predict};

mod header;

pub use header::{ArtifactHeader, FORMAT_VERSION_MAJOR, FORMAT_VERSION_MINOR, HEADER_SIZE, MAGIC};


#[derive(Debug, Error)]
pub enum PersistError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    #[error("encoding error: {0}")]
    Encoding(#[from] postcard::Error),
    #[error("not a model artifact")]
    NotAnArtifact,
    #[error("unsupported artifact format {major}.{minor}")]
    UnsupportedVersion { major: u8, minor: u8 },
    #[error("artifact truncated: expected {expected} bytes, got {actual}")]
    Truncated { expected: usize, actual: usize },
    #[error("checksum mismatch: expected {expected:#010x}, got {actual:#010x}")]
    ChecksumMismatch { expected: u32, actual: u32 },
    #[error("payload of {0} bytes is too large")]
    PayloadTooLarge(usize),
    #[error("model has {0} features, more than the header can record")]
    TooManyFeatures(usize),
    #[error("failed to format training timestamp: {0}")]
    Timestamp(#[from] time::error::Format),
}

/// Describes how and when the persisted model was produced.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ArtifactMetadata {
    pub model_name: String,
    /// Held-out R² of the model.
    pub score: f64,
    pub n_features: usize,
    pub crate_version: String,
    /// RFC 3339, UTC.
    pub trained_at: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Artifact {
    pub metadata: ArtifactMetadata,
    pub model: FittedModel<f64>,
}

impl Artifact {
    /// Wraps a fitted model, stamping it with the current time and crate
    /// version.
    pub fn new<S: Into<String>>(
        model_name: S,
        score: f64,
        model: FittedModel<f64>,
    ) -> Result<Self, PersistError> {
        let trained_at = OffsetDateTime::now_utc().format(&Rfc3339)?;
        Ok(Artifact {
            metadata: ArtifactMetadata {
                model_name: model_name.into(),
                score,
                n_features: model.n_features(),
                crate_version: env!("CARGO_PKG_VERSION").to_string(),
                trained_at,
            },
            model,
        })
    }
}

/// Serializes an artifact to header + payload bytes.
pub fn encode(artifact: &Artifact) -> Result<Vec<u8>, PersistError> {
    let payload = postcard::to_stdvec(artifact)?;
    let n_features = u32::try_from(artifact.metadata.n_features)
        .map_err(|_| PersistError::TooManyFeatures(artifact.metadata.n_features))?;
    let header = ArtifactHeader::for_payload(&payload, n_features)?;

    let mut bytes = Vec::with_capacity(HEADER_SIZE + payload.len());
    bytes.extend_from_slice(&header.to_bytes());
    bytes.extend_from_slice(&payload);
    Ok(bytes)
}

/// Validates the header and checksum, then decodes the payload.
pub fn decode(bytes: &[u8]) -> Result<Artifact, PersistError> {
    let header_bytes: &[u8; HEADER_SIZE] = bytes
        .get(..HEADER_SIZE)
        .and_then(|slice| slice.try_into().ok())
        .ok_or(PersistError::Truncated {
            expected: HEADER_SIZE,
            actual: bytes.len(),
        })?;
    let header = ArtifactHeader::from_bytes(header_bytes)?;

    let expected = HEADER_SIZE + header.payload_size as usize;
    if bytes.len() < expected {
        return Err(PersistError::Truncated {
            expected,
            actual: bytes.len(),
        });
    }
    let payload = &bytes[HEADER_SIZE..expected];
    let actual = crc32fast::hash(payload);
    if actual != header.checksum {
        return Err(PersistError::ChecksumMismatch {
            expected: header.checksum,
            actual,
        });
    }
    Ok(postcard::from_bytes(payload)?)
}

/// Writes the artifact to `path`, replacing any existing file atomically.
///
/// The bytes go to a temporary file in the destination directory which is
/// then renamed over `path`, so readers never observe a partial artifact.
pub fn save_artifact<P: AsRef<Path>>(path: P, artifact: &Artifact) -> Result<(), PersistError> {
    let path = path.as_ref();
    let bytes = encode(artifact)?;

    let dir = match path.parent() {
        Some(dir) if !dir.as_os_str().is_empty() => dir,
        _ => Path::new("."),
    };
    fs::create_dir_all(dir)?;

    let mut temp = tempfile::Builder::new()
        .prefix(".artifact")
        .tempfile_in(dir)?;
    temp.write_all(&bytes)?;
    temp.as_file().sync_all()?;
    temp.persist(path).map_err(|err| err.error)?;

    tracing::debug!(path = %path.display(), bytes = bytes.len(), "artifact written");
    Ok(())
}

pub fn load_artifact<P: AsRef<Path>>(path: P) -> Result<Artifact, PersistError> {
    let bytes = fs::read(path.as_ref())?;
    decode(&bytes)
}
