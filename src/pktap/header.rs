//! Packet-tap header parser.

use crate::error::ParseError;

/// Width of the fixed interface-name field.
const IFNAME_LEN: usize = 16;

/// Width of the fixed process-name fields.
const PROC_NAME_LEN: usize = 17;

/// Byte length of the fixed packet-tap header layout.
///
/// The header's own `header_length` field is authoritative for where the
/// payload starts; newer devices may declare more than this.
pub const PKTAP_HEADER_MIN_LEN: usize = 95;

/// The packet-tap header prefixed to every frame from the capture service.
///
/// All multi-byte fields are big-endian on the wire, unlike the
/// little-endian pcap output format. Name fields are fixed-width and
/// NUL-padded; use [`PktapHeader::process_name`] and
/// [`PktapHeader::peer_process_name`] for comparable strings.
#[derive(Debug, Clone)]
pub struct PktapHeader {
    /// Declared byte length of this header; the payload starts here.
    pub header_length: u32,
    /// Header format version.
    pub version: u8,
    /// Device-declared payload length.
    pub payload_length: u32,
    /// Frame type.
    pub frame_type: u8,
    /// Logical unit the frame was captured on.
    pub unit: u16,
    /// Direction indicator (inbound/outbound).
    pub direction: u8,
    /// Link/protocol family of the payload.
    pub protocol_family: u32,
    /// Padding bytes before the frame proper.
    pub pre_padding: u32,
    /// Padding bytes after the frame proper.
    pub post_padding: u32,
    /// Capturing interface name, NUL-padded.
    pub interface_name: [u8; IFNAME_LEN],
    /// Owning process id.
    pub pid: u32,
    /// Owning process name, NUL-padded.
    pub process_name_raw: [u8; PROC_NAME_LEN],
    /// Reserved, preserved verbatim.
    pub reserved1: u32,
    /// Process id of the frame's peer endpoint.
    pub peer_pid: u32,
    /// Peer process name, NUL-padded.
    pub peer_process_name_raw: [u8; PROC_NAME_LEN],
    /// Reserved, preserved verbatim.
    pub reserved2: [u8; 8],
}

impl PktapHeader {
    /// Parse the header at the start of `frame`.
    ///
    /// Returns the header and the offset at which the payload begins.
    /// The offset comes from the header's declared `header_length`, not
    /// from the static layout size.
    pub fn parse(frame: &[u8]) -> Result<(Self, usize), ParseError> {
        if frame.len() < PKTAP_HEADER_MIN_LEN {
            return Err(ParseError::Truncated {
                needed: PKTAP_HEADER_MIN_LEN,
                have: frame.len(),
            });
        }

        let header = Self {
            header_length: be_u32(frame, 0),
            version: frame[4],
            payload_length: be_u32(frame, 5),
            frame_type: frame[9],
            unit: be_u16(frame, 10),
            direction: frame[12],
            protocol_family: be_u32(frame, 13),
            pre_padding: be_u32(frame, 17),
            post_padding: be_u32(frame, 21),
            interface_name: fixed(frame, 25),
            pid: be_u32(frame, 41),
            process_name_raw: fixed(frame, 45),
            reserved1: be_u32(frame, 62),
            peer_pid: be_u32(frame, 66),
            peer_process_name_raw: fixed(frame, 70),
            reserved2: fixed(frame, 87),
        };

        let payload_start = header.header_length as usize;
        if payload_start > frame.len() {
            return Err(ParseError::HeaderOverrun {
                header_length: payload_start,
                frame_length: frame.len(),
            });
        }

        Ok((header, payload_start))
    }

    /// Capturing interface name with trailing NUL padding removed.
    pub fn interface(&self) -> &str {
        trim_nul(&self.interface_name)
    }

    /// Owning process name with trailing NUL padding removed.
    pub fn process_name(&self) -> &str {
        trim_nul(&self.process_name_raw)
    }

    /// Peer process name with trailing NUL padding removed.
    pub fn peer_process_name(&self) -> &str {
        trim_nul(&self.peer_process_name_raw)
    }
}

fn be_u16(frame: &[u8], offset: usize) -> u16 {
    u16::from_be_bytes([frame[offset], frame[offset + 1]])
}

fn be_u32(frame: &[u8], offset: usize) -> u32 {
    u32::from_be_bytes([
        frame[offset],
        frame[offset + 1],
        frame[offset + 2],
        frame[offset + 3],
    ])
}

fn fixed<const N: usize>(frame: &[u8], offset: usize) -> [u8; N] {
    let mut buf = [0u8; N];
    buf.copy_from_slice(&frame[offset..offset + N]);
    buf
}

/// Decode a fixed-width NUL-padded name field, stopping at the first NUL.
///
/// Padding bytes must never leak into a prefix comparison; a name that is
/// not valid UTF-8 past the NUL is cut at the first invalid byte.
fn trim_nul(buf: &[u8]) -> &str {
    let end = buf.iter().position(|&b| b == 0).unwrap_or(buf.len());
    match std::str::from_utf8(&buf[..end]) {
        Ok(name) => name,
        Err(e) => {
            // Fall back to the longest valid prefix.
            std::str::from_utf8(&buf[..e.valid_up_to()]).unwrap_or("")
        }
    }
}
