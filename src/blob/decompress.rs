use flate2::read::GzDecoder;
use std::borrow::Cow;
use std::io::Read;
use thiserror::Error;
use tracing::debug;

/// Gzip stream magic prefix.
const GZIP_MAGIC: [u8; 2] = [0x1F, 0x8B];

#[derive(Debug, Error)]
pub enum DecompressError {
    #[error("failed to decompress gzipped blob '{name}': {source}")]
    Gzip {
        name: String,
        #[source]
        source: std::io::Error,
    },
}

/// Check whether a blob is gzipped, by name suffix or magic bytes.
/// Either condition alone is enough.
pub fn is_gzip(name: &str, data: &[u8]) -> bool {
    name.ends_with(".gz") || data.starts_with(&GZIP_MAGIC)
}

/// Transparently decompress a gzipped blob.
///
/// Blobs that are not gzipped are returned unchanged without copying.
/// A corrupt or truncated gzip stream is an error for the whole blob;
/// there is no partial-output recovery.
pub fn decompress<'a>(name: &str, data: &'a [u8]) -> Result<Cow<'a, [u8]>, DecompressError> {
    if !is_gzip(name, data) {
        return Ok(Cow::Borrowed(data));
    }

    let mut decoder = GzDecoder::new(data);
    let mut inflated = Vec::new();
    decoder
        .read_to_end(&mut inflated)
        .map_err(|source| DecompressError::Gzip {
            name: name.to_string(),
            source,
        })?;

    debug!(
        blob = %name,
        compressed = data.len(),
        inflated = inflated.len(),
        "Decompressed gzipped blob"
    );

    Ok(Cow::Owned(inflated))
}

#[cfg(test)]
mod tests {
    use super::*;
    use flate2::write::GzEncoder;
    use flate2::Compression;
    use std::io::Write;

    fn gzip_bytes(payload: &[u8]) -> Vec<u8> {
        let mut encoder = GzEncoder::new(Vec::new(), Compression::default());
        encoder.write_all(payload).unwrap();
        encoder.finish().unwrap()
    }

    #[test]
    fn test_passthrough_for_plain_blob() {
        let data = br#"{"records":[]}"#;
        let result = decompress("flow.json", data).unwrap();
        assert!(matches!(result, Cow::Borrowed(_)));
        assert_eq!(result.as_ref(), data);
    }

    #[test]
    fn test_detects_gzip_by_name_suffix() {
        let compressed = gzip_bytes(b"hello flow logs");
        let result = decompress("flow.json.gz", &compressed).unwrap();
        assert_eq!(result.as_ref(), b"hello flow logs");
    }

    #[test]
    fn test_detects_gzip_by_magic_bytes() {
        let compressed = gzip_bytes(b"magic detected");
        // Name gives no hint, magic bytes must carry the detection.
        let result = decompress("flow.json", &compressed).unwrap();
        assert_eq!(result.as_ref(), b"magic detected");
    }

    #[test]
    fn test_corrupt_gzip_is_an_error() {
        let mut compressed = gzip_bytes(b"soon to be mangled");
        let mid = compressed.len() / 2;
        compressed.truncate(mid);
        let result = decompress("flow.json.gz", &compressed);
        assert!(matches!(result, Err(DecompressError::Gzip { .. })));
    }

    #[test]
    fn test_gz_name_with_plain_payload_is_an_error() {
        // The name says gzip, the bytes do not. Treat as corrupt.
        let result = decompress("flow.json.gz", b"not actually gzipped");
        assert!(result.is_err());
    }

    #[test]
    fn test_empty_blob_passes_through() {
        let result = decompress("flow.json", b"").unwrap();
        assert!(result.is_empty());
    }
}
