//! Record Codec Module
//!
//! Binary framing of one stored value inside the ring buffer.
//!
//! # Layout
//! ```text
//! +------------+-------------+--------+-----------------+--------+
//! | digest u64 | length u32  | %REC%  | payload bytes   | %REC%  |
//! +------------+-------------+--------+-----------------+--------+
//!   8 bytes      4 bytes       5        `length` bytes    5
//! ```
//!
//! Integers are little-endian. The length is authoritative; the markers are
//! corruption sentinels only and may legitimately appear inside payloads.

use std::ops::Range;

/// Sentinel written before and after every payload.
pub const MARKER: &[u8] = b"%REC%";
pub const MARKER_LEN: usize = MARKER.len();

pub const DIGEST_LEN: usize = 8;
pub const LENGTH_LEN: usize = 4;
pub const HEADER_LEN: usize = DIGEST_LEN + LENGTH_LEN;

/// Framed size of a record with an empty payload.
pub const MIN_RECORD_LEN: usize = HEADER_LEN + 2 * MARKER_LEN;

// == Sizes ==
/// Total framed size of a record carrying `payload_len` bytes.
///
/// Saturates instead of overflowing so oversized values still compare as
/// larger than any capacity.
#[inline]
pub fn framed_len(payload_len: usize) -> usize {
    payload_len.saturating_add(MIN_RECORD_LEN)
}

// == Encode ==
/// Frames `value` under `digest`.
///
/// Callers must have checked that `value.len()` fits the 4-byte length field.
pub fn encode(digest: u64, value: &[u8]) -> Vec<u8> {
    debug_assert!(u32::try_from(value.len()).is_ok());

    let mut record = Vec::with_capacity(framed_len(value.len()));
    record.extend_from_slice(&digest.to_le_bytes());
    record.extend_from_slice(&(value.len() as u32).to_le_bytes());
    record.extend_from_slice(MARKER);
    record.extend_from_slice(value);
    record.extend_from_slice(MARKER);
    record
}

// == Header ==
/// Fixed-size prefix of a record as found at some offset.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RecordHeader {
    pub digest: u64,
    pub payload_len: u32,
}

impl RecordHeader {
    /// Reads the header at `offset`, or `None` if it would run past `buf`.
    pub fn decode(buf: &[u8], offset: usize) -> Option<Self> {
        let end = offset.checked_add(HEADER_LEN)?;
        let header = buf.get(offset..end)?;
        let (digest, length) = header.split_at(DIGEST_LEN);

        Some(Self {
            digest: u64::from_le_bytes(digest.try_into().ok()?),
            payload_len: u32::from_le_bytes(length.try_into().ok()?),
        })
    }

    /// Length of the marker-payload-marker span that follows the header.
    #[inline]
    pub fn span_len(&self) -> usize {
        self.payload_len as usize + 2 * MARKER_LEN
    }

    /// Byte range of the span for a record whose header starts at `offset`.
    pub fn span_range(&self, offset: usize) -> Option<Range<usize>> {
        let start = offset.checked_add(HEADER_LEN)?;
        let end = start.checked_add(self.span_len())?;
        Some(start..end)
    }
}

// == Validate ==
/// Checks both markers of a copied span and returns the payload between them.
pub fn unframe(span: &[u8]) -> Option<&[u8]> {
    if span.len() < 2 * MARKER_LEN {
        return None;
    }

    let (leading, rest) = span.split_at(MARKER_LEN);
    let (payload, trailing) = rest.split_at(rest.len() - MARKER_LEN);

    if leading != MARKER || trailing != MARKER {
        return None;
    }

    Some(payload)
}

// == Unit Tests ==
#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_min_record_len() {
        assert_eq!(MIN_RECORD_LEN, 22);
        assert_eq!(framed_len(5), 27);
        assert_eq!(framed_len(usize::MAX), usize::MAX);
    }

    #[test]
    fn test_encode_layout() {
        let record = encode(0x0102_0304_0506_0708, b"hi");

        assert_eq!(record.len(), framed_len(2));
        assert_eq!(&record[..8], &[8, 7, 6, 5, 4, 3, 2, 1]);
        assert_eq!(&record[8..12], &[2, 0, 0, 0]);
        assert_eq!(&record[12..17], b"%REC%");
        assert_eq!(&record[17..19], b"hi");
        assert_eq!(&record[19..], b"%REC%");
    }

    #[test]
    fn test_decode_header_at_offset() {
        let mut buf = vec![0u8; 3];
        buf.extend_from_slice(&encode(42, b"value"));

        let header = RecordHeader::decode(&buf, 3).unwrap();
        assert_eq!(header.digest, 42);
        assert_eq!(header.payload_len, 5);
        assert_eq!(header.span_range(3), Some(15..30));
        assert_eq!(buf.len(), 30);
    }

    #[test]
    fn test_decode_header_past_end() {
        let buf = [0u8; 16];
        assert!(RecordHeader::decode(&buf, 5).is_none());
        assert!(RecordHeader::decode(&buf, usize::MAX).is_none());
    }

    #[test]
    fn test_unframe_returns_payload() {
        let record = encode(1, b"world");
        assert_eq!(unframe(&record[HEADER_LEN..]), Some(&b"world"[..]));
    }

    #[test]
    fn test_unframe_empty_payload() {
        let record = encode(1, b"");
        assert_eq!(unframe(&record[HEADER_LEN..]), Some(&b""[..]));
    }

    #[test]
    fn test_unframe_payload_containing_marker() {
        let record = encode(1, b"a%REC%b");
        assert_eq!(unframe(&record[HEADER_LEN..]), Some(&b"a%REC%b"[..]));
    }

    #[test]
    fn test_unframe_rejects_damaged_markers() {
        let mut record = encode(1, b"payload");
        let last = record.len() - 1;
        record[last] = b'!';
        assert!(unframe(&record[HEADER_LEN..]).is_none());

        let mut record = encode(1, b"payload");
        record[HEADER_LEN] = b'#';
        assert!(unframe(&record[HEADER_LEN..]).is_none());
    }

    #[test]
    fn test_unframe_rejects_short_span() {
        assert!(unframe(b"%REC%").is_none());
    }
}
