//! Collaborator boundary: the capture transport and the app listing.
//!
//! Device discovery, the mux transport and the plist envelope around
//! pcapd frames all live in external tooling. This module defines the
//! seam the core consumes: a [`FrameSource`] producing raw capture
//! frames, plus the application metadata records the selection prompt
//! works from.

use std::fs;
use std::io::{ErrorKind, Read};
use std::net::TcpStream;
use std::path::Path;
use std::time::Duration;

use serde::Deserialize;

use crate::error::TransportError;

/// Read timeout on the capture socket. Bounds how long the pump can go
/// without rechecking its cancellation flag on an idle stream.
const READ_TIMEOUT: Duration = Duration::from_millis(500);

/// Upper bound on a declared frame length. pcapd frames are single
/// packets plus a small header; anything near this is a desynchronized
/// or corrupt stream, not data.
const MAX_FRAME_LEN: u32 = 4 * 1024 * 1024;

/// A source of raw capture frames, already unwrapped from the outer
/// serialization envelope.
///
/// `Ok(None)` is an idle tick: no frame arrived within the source's
/// polling bound, and the caller should recheck cancellation before
/// pulling again. Any `Err` is fatal to the session; the transport has
/// no natural end-of-stream.
pub trait FrameSource: Send {
    /// Pull the next raw frame.
    fn next_frame(&mut self) -> Result<Option<Vec<u8>>, TransportError>;
}

/// Length-delimited frame decoding over any byte stream.
///
/// Each frame is a big-endian `u32` byte count followed by that many
/// bytes of frame data. A timeout before the first byte of a frame is
/// reported as an idle tick; a timeout mid-frame keeps reading, so the
/// framing never desynchronizes.
pub struct LengthDelimitedReader<R: Read> {
    stream: R,
}

impl<R: Read> LengthDelimitedReader<R> {
    pub fn new(stream: R) -> Self {
        Self { stream }
    }

    /// Read the next frame, or `None` on an idle tick.
    pub fn read_frame(&mut self) -> Result<Option<Vec<u8>>, TransportError> {
        let mut len_buf = [0u8; 4];
        if !self.read_exact_or_idle(&mut len_buf)? {
            return Ok(None);
        }

        let len = u32::from_be_bytes(len_buf);
        if len > MAX_FRAME_LEN {
            return Err(TransportError::OversizedFrame {
                length: len,
                limit: MAX_FRAME_LEN,
            });
        }

        let mut frame = vec![0u8; len as usize];
        // The length prefix is committed; idle ticks here just mean the
        // rest of the frame is still in flight.
        while !self.read_exact_or_idle(&mut frame)? {}
        Ok(Some(frame))
    }

    /// Fill `buf` completely, or return `false` if the stream timed out
    /// before delivering a single byte.
    fn read_exact_or_idle(&mut self, buf: &mut [u8]) -> Result<bool, TransportError> {
        let mut filled = 0;
        while filled < buf.len() {
            match self.stream.read(&mut buf[filled..]) {
                Ok(0) => return Err(TransportError::StreamClosed),
                Ok(n) => filled += n,
                Err(e) if is_timeout(&e) => {
                    if filled == 0 {
                        return Ok(false);
                    }
                    // Mid-buffer: retry, more bytes are coming.
                }
                Err(e) if e.kind() == ErrorKind::Interrupted => {}
                Err(e) => return Err(TransportError::Read(e)),
            }
        }
        Ok(true)
    }
}

fn is_timeout(e: &std::io::Error) -> bool {
    matches!(e.kind(), ErrorKind::WouldBlock | ErrorKind::TimedOut)
}

/// Frame source over a TCP connection to a forwarded pcapd stream.
pub struct SocketFrameSource {
    reader: LengthDelimitedReader<TcpStream>,
}

impl SocketFrameSource {
    /// Connect to `endpoint` (`host:port`) and set the polling timeout.
    pub fn connect(endpoint: &str) -> Result<Self, TransportError> {
        let stream = TcpStream::connect(endpoint).map_err(|source| TransportError::Connect {
            endpoint: endpoint.to_string(),
            source,
        })?;
        stream
            .set_read_timeout(Some(READ_TIMEOUT))
            .map_err(TransportError::Read)?;
        Ok(Self {
            reader: LengthDelimitedReader::new(stream),
        })
    }
}

impl FrameSource for SocketFrameSource {
    fn next_frame(&mut self) -> Result<Option<Vec<u8>>, TransportError> {
        self.reader.read_frame()
    }
}

/// One installed application, as reported by the external process
/// listing. The core consumes only `executable` (the filter target) and
/// `display_name` (the default output file stem).
#[derive(Debug, Clone, Deserialize)]
pub struct AppInfo {
    /// Human-readable application name.
    #[serde(alias = "CFBundleDisplayName")]
    pub display_name: String,
    /// Bundle identifier.
    #[serde(alias = "CFBundleIdentifier")]
    pub bundle_id: String,
    /// Executable/process name as it appears in capture headers.
    #[serde(alias = "CFBundleExecutable")]
    pub executable: String,
}

/// Load an application catalog from a JSON listing exported by the
/// device tooling. The `CFBundle*` key spelling is accepted as-is.
pub fn load_app_catalog(path: &Path) -> Result<Vec<AppInfo>, TransportError> {
    let catalog_err = |reason: String| TransportError::AppCatalog {
        path: path.display().to_string(),
        reason,
    };

    let data = fs::read_to_string(path).map_err(|e| catalog_err(e.to_string()))?;
    let apps: Vec<AppInfo> =
        serde_json::from_str(&data).map_err(|e| catalog_err(e.to_string()))?;

    if apps.is_empty() {
        return Err(catalog_err("no applications listed".to_string()));
    }
    Ok(apps)
}
