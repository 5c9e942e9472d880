//! The frame pump: pulls frames, filters, writes.

use std::sync::atomic::{AtomicBool, Ordering};

use tracing::{debug, trace, warn};

use crate::device::FrameSource;
use crate::error::Result;
use crate::pcap::PcapWriter;
use crate::pktap::{PktapHeader, ProcessFilter};

/// Counters for one capture session.
#[derive(Debug, Default, Clone, Copy)]
pub struct CaptureStats {
    /// Frames pulled from the source.
    pub frames_seen: u64,
    /// Records written to the capture file.
    pub packets_written: u64,
    /// Malformed frames skipped.
    pub parse_errors: u64,
}

/// Run the capture loop until `cancel` is set or the transport fails.
///
/// Frames are processed strictly in delivery order. A malformed frame is
/// logged, counted and skipped; it never aborts the session. Transport
/// and output-file errors are fatal and propagate to the caller. The
/// writer is flushed per record and released on every exit path, so the
/// file on disk is valid up to the last complete record even when the
/// session ends abnormally.
pub fn run(
    mut source: impl FrameSource,
    mut writer: PcapWriter,
    filter: &ProcessFilter,
    cancel: &AtomicBool,
) -> Result<CaptureStats> {
    let mut stats = CaptureStats::default();

    while !cancel.load(Ordering::Relaxed) {
        let frame = match source.next_frame()? {
            Some(frame) => frame,
            None => continue, // idle tick, recheck cancellation
        };
        stats.frames_seen += 1;

        let (header, payload_start) = match PktapHeader::parse(&frame) {
            Ok(parsed) => parsed,
            Err(e) => {
                stats.parse_errors += 1;
                warn!(frame_len = frame.len(), error = %e, "skipping malformed frame");
                continue;
            }
        };

        if !filter.matches(&header) {
            trace!(
                process = header.process_name(),
                peer = header.peer_process_name(),
                "frame filtered out"
            );
            continue;
        }

        debug!(
            process = header.process_name(),
            pid = header.pid,
            interface = header.interface(),
            declared_len = header.payload_length,
            "writing packet"
        );
        writer.write_packet(&frame[payload_start..], header.payload_length)?;
        stats.packets_written = writer.packets_written();
    }

    writer.close()?;
    Ok(stats)
}
