use crate::errors::CoreError;

/// Magic bytes identifying a TXKV (Travel Explorer key-value) snapshot.
pub const MAGIC: &[u8; 4] = b"TXKV";

/// Current snapshot format version.
pub const CURRENT_VERSION: u16 = 1;

/// Header size in bytes: magic(4) + version(2) + payload_len(8) = 14
pub const MIN_HEADER_SIZE: usize = 14;

/// Header read from a store snapshot.
#[derive(Debug)]
pub struct SnapshotHeader {
    pub version: u16,
    pub payload_len: u64,
}

/// Write a complete snapshot to bytes.
///
/// Layout:
/// ```text
/// [TXKV: 4B] [version: 2B LE] [payload_len: 8B LE] [payload: variable]
/// ```
pub fn write_snapshot(version: u16, payload: &[u8]) -> Vec<u8> {
    let mut buf = Vec::with_capacity(MIN_HEADER_SIZE + payload.len());
    buf.extend_from_slice(MAGIC);
    buf.extend_from_slice(&version.to_le_bytes());
    buf.extend_from_slice(&(payload.len() as u64).to_le_bytes());
    buf.extend_from_slice(payload);
    buf
}

/// Parse the header from raw snapshot bytes.
/// Returns the header and the payload slice.
pub fn read_snapshot(data: &[u8]) -> Result<(SnapshotHeader, &[u8]), CoreError> {
    if data.len() < MIN_HEADER_SIZE {
        return Err(CoreError::InvalidStoreFormat(
            "Data too small to be a valid TXKV snapshot".into(),
        ));
    }

    if &data[0..4] != MAGIC {
        return Err(CoreError::InvalidStoreFormat(
            "Invalid magic bytes, not a TXKV snapshot".into(),
        ));
    }

    let version = u16::from_le_bytes([data[4], data[5]]);
    if version == 0 || version > CURRENT_VERSION {
        return Err(CoreError::UnsupportedVersion(version));
    }

    let payload_len = u64::from_le_bytes(data[6..14].try_into().map_err(|_| {
        CoreError::InvalidStoreFormat("Failed to read payload length".into())
    })?);

    let available = (data.len() - MIN_HEADER_SIZE) as u64;
    if available < payload_len {
        return Err(CoreError::InvalidStoreFormat(format!(
            "Snapshot truncated: expected {payload_len} bytes of payload, got {available}"
        )));
    }

    let payload = &data[MIN_HEADER_SIZE..MIN_HEADER_SIZE + payload_len as usize];
    Ok((
        SnapshotHeader {
            version,
            payload_len,
        },
        payload,
    ))
}
