//! iosniff - relay an iOS device's packet-capture stream into a pcap file.
//!
//! The `com.apple.pcapd` service emits every captured packet prefixed with
//! a packet-tap header naming the owning process. This crate parses that
//! header, keeps only the frames belonging to one process of interest, and
//! rewrites the payloads as a classic little-endian pcap file any standard
//! tooling can open.
//!
//! # Example
//!
//! ```no_run
//! use std::sync::atomic::AtomicBool;
//! use std::sync::Arc;
//!
//! use iosniff::device::SocketFrameSource;
//! use iosniff::pcap::PcapWriter;
//! use iosniff::pktap::ProcessFilter;
//!
//! fn main() -> iosniff::Result<()> {
//!     let source = SocketFrameSource::connect("127.0.0.1:49152")?;
//!     let writer = PcapWriter::create("App.pcap")?;
//!     let filter = ProcessFilter::new("com.example.App");
//!     let cancel = Arc::new(AtomicBool::new(false));
//!     let stats = iosniff::sniffer::run(source, writer, &filter, &cancel)?;
//!     eprintln!("{} packets captured", stats.packets_written);
//!     Ok(())
//! }
//! ```

pub mod cli;
pub mod device;
pub mod error;
pub mod pcap;
pub mod pktap;
pub mod sniffer;

pub use error::{Error, Result};
