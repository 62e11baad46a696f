//! Newline-delimited frame codec
//!
//! Wraps [`tokio_util::codec::LinesCodec`] with a maximum line length so a
//! misbehaving server cannot make the client buffer an unbounded line.
//!
//! Bytes are accumulated until a `\n` arrives, however the server chunked its
//! writes. Several lines delivered in one write are yielded one at a time and
//! the remainder stays buffered. A trailing `\r` is stripped.

use bytes::BytesMut;
use tokio_util::codec::{Decoder, Encoder, LinesCodec, LinesCodecError};

use crate::error::{McpClientError, Result};

use super::subprocess::config::DEFAULT_MAX_LINE_BYTES;

/// One inbound line, or the reason it was dropped
///
/// Rejected lines have already been consumed from the buffer, so the stream
/// stays usable after one.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InboundLine {
    /// A complete line without its terminator
    Text(String),
    /// A line that was discarded (too long or not UTF-8)
    Rejected(String),
}

/// Line codec for JSON frames
#[derive(Debug)]
pub struct FrameCodec {
    lines: LinesCodec,
    max_line_bytes: usize,
}

impl FrameCodec {
    /// Create a codec with the default 1 MiB line limit
    #[must_use]
    pub fn new() -> Self {
        Self::with_max_line_bytes(DEFAULT_MAX_LINE_BYTES)
    }

    /// Create a codec with a custom line limit
    #[must_use]
    pub fn with_max_line_bytes(max_line_bytes: usize) -> Self {
        Self {
            lines: LinesCodec::new_with_max_length(max_line_bytes),
            max_line_bytes,
        }
    }

    /// Maximum accepted line length in bytes
    #[must_use]
    pub const fn max_line_bytes(&self) -> usize {
        self.max_line_bytes
    }

    fn map_decoded(
        &self,
        decoded: std::result::Result<Option<String>, LinesCodecError>,
    ) -> Result<Option<InboundLine>> {
        match decoded {
            Ok(line) => Ok(line.map(InboundLine::Text)),
            Err(LinesCodecError::MaxLineLengthExceeded) => Ok(Some(InboundLine::Rejected(format!(
                "line exceeds {} bytes",
                self.max_line_bytes
            )))),
            // LinesCodec consumes the line before checking UTF-8
            Err(LinesCodecError::Io(e)) if e.kind() == std::io::ErrorKind::InvalidData => {
                Ok(Some(InboundLine::Rejected(format!("line is not valid UTF-8: {e}"))))
            }
            Err(LinesCodecError::Io(e)) => Err(McpClientError::Io(e)),
        }
    }
}

impl Default for FrameCodec {
    fn default() -> Self {
        Self::new()
    }
}

impl Decoder for FrameCodec {
    type Item = InboundLine;
    type Error = McpClientError;

    fn decode(&mut self, src: &mut BytesMut) -> Result<Option<Self::Item>> {
        let decoded = self.lines.decode(src);
        self.map_decoded(decoded)
    }

    fn decode_eof(&mut self, src: &mut BytesMut) -> Result<Option<Self::Item>> {
        let decoded = self.lines.decode_eof(src);
        self.map_decoded(decoded)
    }
}

impl Encoder<String> for FrameCodec {
    type Error = McpClientError;

    fn encode(&mut self, item: String, dst: &mut BytesMut) -> Result<()> {
        // The line limit only applies to decoding
        self.lines.encode(item, dst).map_err(|e| match e {
            LinesCodecError::Io(e) => McpClientError::Io(e),
            LinesCodecError::MaxLineLengthExceeded => {
                McpClientError::write("outbound line exceeds maximum length")
            }
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reassembles_split_line() {
        let mut codec = FrameCodec::new();
        let mut buf = BytesMut::from(&b"{\"id\":"[..]);
        assert_eq!(codec.decode(&mut buf).unwrap(), None);

        buf.extend_from_slice(b"1}\n");
        assert_eq!(
            codec.decode(&mut buf).unwrap(),
            Some(InboundLine::Text("{\"id\":1}".to_string()))
        );
    }

    #[test]
    fn yields_lines_one_at_a_time() {
        let mut codec = FrameCodec::new();
        let mut buf = BytesMut::from(&b"{\"a\":1}\r\n{\"b\":2}\n{\"c\""[..]);

        assert_eq!(
            codec.decode(&mut buf).unwrap(),
            Some(InboundLine::Text("{\"a\":1}".to_string()))
        );
        assert_eq!(
            codec.decode(&mut buf).unwrap(),
            Some(InboundLine::Text("{\"b\":2}".to_string()))
        );
        assert_eq!(codec.decode(&mut buf).unwrap(), None);
        assert_eq!(&buf[..], b"{\"c\"");
    }

    #[test]
    fn oversized_line_is_rejected_and_skipped() {
        let mut codec = FrameCodec::with_max_line_bytes(8);
        let mut buf = BytesMut::from(&b"0123456789abcdef\n{}\n"[..]);

        assert!(matches!(
            codec.decode(&mut buf).unwrap(),
            Some(InboundLine::Rejected(_))
        ));
        assert_eq!(
            codec.decode(&mut buf).unwrap(),
            Some(InboundLine::Text("{}".to_string()))
        );
    }

    #[test]
    fn encode_appends_newline() {
        let mut codec = FrameCodec::new();
        let mut dst = BytesMut::new();
        codec.encode("{}".to_string(), &mut dst).unwrap();
        assert_eq!(&dst[..], b"{}\n");
    }
}
