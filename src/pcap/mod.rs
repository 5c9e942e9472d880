//! Classic pcap file writing.
//!
//! The legacy pcap format is one fixed global header followed by
//! length-tagged packet records, all little-endian on disk. It is simple
//! enough that writing it by hand beats linking libpcap.

mod writer;

pub use writer::PcapWriter;

/// Magic number identifying a little-endian classic pcap file.
pub const TCPDUMP_MAGIC: u32 = 0xa1b2_c3d4;

/// Format version written to the global header.
pub const VERSION_MAJOR: u16 = 2;
/// Format version written to the global header.
pub const VERSION_MINOR: u16 = 4;

/// Snapshot length advertised in the global header. No truncation is
/// applied to records, so this is the conventional maximum.
pub const SNAPLEN: u32 = 65535;

/// Link-layer type written to the global header (LINKTYPE_ETHERNET).
pub const LINKTYPE_ETHERNET: u32 = 1;
