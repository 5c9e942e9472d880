//! Error types for iosniff.

use thiserror::Error;

/// Main error type for capture operations.
#[derive(Error, Debug)]
pub enum Error {
    /// Error on the device transport feeding the capture stream
    #[error("transport error: {0}")]
    Transport(#[from] TransportError),

    /// Error parsing a device capture frame
    #[error("frame parse error: {0}")]
    Parse(#[from] ParseError),

    /// I/O error on the output capture file
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Errors on the stream feeding raw capture frames.
#[derive(Error, Debug)]
pub enum TransportError {
    /// Connecting to the forwarded capture endpoint failed
    #[error("failed to connect to {endpoint}: {source}")]
    Connect {
        endpoint: String,
        source: std::io::Error,
    },

    /// The capture stream ended. pcapd has no end-of-stream signal,
    /// so even a clean EOF means the device side went away.
    #[error("capture stream closed by peer")]
    StreamClosed,

    /// Reading from the capture stream failed
    #[error("capture stream read failed: {0}")]
    Read(std::io::Error),

    /// A frame declared a length beyond what the decoder accepts
    #[error("frame length {length} exceeds limit {limit}")]
    OversizedFrame { length: u32, limit: u32 },

    /// The application catalog could not be loaded or was empty
    #[error("application catalog {path}: {reason}")]
    AppCatalog { path: String, reason: String },
}

/// Errors parsing the device packet-tap header.
#[derive(Error, Debug)]
pub enum ParseError {
    /// Frame shorter than the fixed header layout
    #[error("frame too short for packet-tap header: need {needed} bytes, have {have}")]
    Truncated { needed: usize, have: usize },

    /// The header's declared length points past the end of the frame
    #[error("declared header length {header_length} exceeds frame length {frame_length}")]
    HeaderOverrun {
        header_length: usize,
        frame_length: usize,
    },
}

/// Result type alias using our Error type.
pub type Result<T> = std::result::Result<T, Error>;
