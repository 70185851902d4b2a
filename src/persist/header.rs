use super::PersistError;

/// Magic bytes identifying a model artifact.
pub const MAGIC: &[u8; 4] = b"RGSL";

pub const FORMAT_VERSION_MAJOR: u8 = 1;
pub const FORMAT_VERSION_MINOR: u8 = 0;

pub const HEADER_SIZE: usize = 32;

/// Fixed-size header written in front of every artifact payload.
///
/// ```text
/// Offset  Size  Field
/// ------  ----  -----
/// 0       4     Magic ("RGSL")
/// 4       1     Version major
/// 5       1     Version minor
/// 6       2     Reserved
/// 8       4     Payload size (bytes)
/// 12      4     CRC32 checksum of payload
/// 16      4     Number of features
/// 20      12    Reserved
/// ```
///
/// Integers are little-endian.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ArtifactHeader {
    pub version_major: u8,
    pub version_minor: u8,
    pub payload_size: u32,
    pub checksum: u32,
    pub n_features: u32,
}

impl ArtifactHeader {
    /// Header of the current version describing `payload`.
    pub fn for_payload(payload: &[u8], n_features: u32) -> Result<Self, PersistError> {
        let payload_size =
            u32::try_from(payload.len()).map_err(|_| PersistError::PayloadTooLarge(payload.len()))?;
        Ok(ArtifactHeader {
            version_major: FORMAT_VERSION_MAJOR,
            version_minor: FORMAT_VERSION_MINOR,
            payload_size,
            checksum: crc32fast::hash(payload),
            n_features,
        })
    }

    pub fn to_bytes(&self) -> [u8; HEADER_SIZE] {
        let mut buf = [0u8; HEADER_SIZE];
        buf[0..4].copy_from_slice(MAGIC);
        buf[4] = self.version_major;
        buf[5] = self.version_minor;
        buf[8..12].copy_from_slice(&self.payload_size.to_le_bytes());
        buf[12..16].copy_from_slice(&self.checksum.to_le_bytes());
        buf[16..20].copy_from_slice(&self.n_features.to_le_bytes());
        buf
    }

    pub fn from_bytes(buf: &[u8; HEADER_SIZE]) -> Result<Self, PersistError> {
        if &buf[0..4] != MAGIC {
            return Err(PersistError::NotAnArtifact);
        }
        let (version_major, version_minor) = (buf[4], buf[5]);
        if version_major != FORMAT_VERSION_MAJOR {
            return Err(PersistError::UnsupportedVersion {
                major: version_major,
                minor: version_minor,
            });
        }
        Ok(ArtifactHeader {
            version_major,
            version_minor,
            payload_size: read_u32(buf, 8),
            checksum: read_u32(buf, 12),
            n_features: read_u32(buf, 16),
        })
    }
}

fn read_u32(buf: &[u8; HEADER_SIZE], offset: usize) -> u32 {
    u32::from_le_bytes([buf[offset], buf[offset + 1], buf[offset + 2], buf[offset + 3]])
}
