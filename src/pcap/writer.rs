//! Pcap file writer.

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;
use std::time::{SystemTime, UNIX_EPOCH};

use crate::error::Result;

use super::{LINKTYPE_ETHERNET, SNAPLEN, TCPDUMP_MAGIC, VERSION_MAJOR, VERSION_MINOR};

/// Writer for classic little-endian pcap files.
///
/// The global header is written once on creation; every record is flushed
/// as it is written, so an interrupted capture still leaves a file that is
/// valid up to the last complete record.
pub struct PcapWriter {
    writer: BufWriter<File>,
    packets_written: u64,
}

impl PcapWriter {
    /// Create (or truncate) the capture file and write the global header.
    pub fn create<P: AsRef<Path>>(path: P) -> Result<Self> {
        let file = File::create(path)?;
        let mut writer = BufWriter::new(file);

        writer.write_all(&TCPDUMP_MAGIC.to_le_bytes())?;
        writer.write_all(&VERSION_MAJOR.to_le_bytes())?;
        writer.write_all(&VERSION_MINOR.to_le_bytes())?;
        writer.write_all(&0i32.to_le_bytes())?; // thiszone: UTC
        writer.write_all(&0u32.to_le_bytes())?; // sigfigs
        writer.write_all(&SNAPLEN.to_le_bytes())?;
        writer.write_all(&LINKTYPE_ETHERNET.to_le_bytes())?;
        writer.flush()?;

        Ok(Self {
            writer,
            packets_written: 0,
        })
    }

    /// Write one packet record: record header, then `payload` verbatim.
    ///
    /// Captured and original length are both set to `declared_len`, the
    /// device-reported payload length. The timestamp is write-time wall
    /// clock; the device header carries no capture timestamp.
    pub fn write_packet(&mut self, payload: &[u8], declared_len: u32) -> Result<()> {
        let (ts_sec, ts_msec) = wall_clock();

        self.writer.write_all(&ts_sec.to_le_bytes())?;
        self.writer.write_all(&ts_msec.to_le_bytes())?;
        self.writer.write_all(&declared_len.to_le_bytes())?; // caplen
        self.writer.write_all(&declared_len.to_le_bytes())?; // origlen
        self.writer.write_all(payload)?;
        self.writer.flush()?;

        self.packets_written += 1;
        Ok(())
    }

    /// Number of packet records written so far.
    pub fn packets_written(&self) -> u64 {
        self.packets_written
    }

    /// Flush any buffered bytes and release the file handle.
    ///
    /// Dropping the writer also releases the handle; `close` exists to
    /// surface the final flush error instead of swallowing it.
    pub fn close(mut self) -> Result<()> {
        self.writer.flush()?;
        Ok(())
    }
}

/// Current wall-clock time as (seconds since epoch, sub-second milliseconds).
fn wall_clock() -> (u32, u32) {
    let now = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap_or_default();
    (now.as_secs() as u32, now.subsec_millis())
}

#[cfg(test)]
mod tests {
    use super::*;
    use pcap_parser::{parse_pcap_frame, parse_pcap_header, Linktype};
    use tempfile::NamedTempFile;

    fn write_capture(payloads: &[&[u8]]) -> Vec<u8> {
        let temp = NamedTempFile::new().unwrap();
        let mut writer = PcapWriter::create(temp.path()).unwrap();
        for payload in payloads {
            writer.write_packet(payload, payload.len() as u32).unwrap();
        }
        writer.close().unwrap();
        std::fs::read(temp.path()).unwrap()
    }

    #[test]
    fn test_global_header_round_trip() {
        let data = write_capture(&[]);

        // An independent reader must agree on every header field.
        let (rem, header) = parse_pcap_header(&data).unwrap();
        assert_eq!(header.magic_number, TCPDUMP_MAGIC);
        assert_eq!(header.version_major, VERSION_MAJOR);
        assert_eq!(header.version_minor, VERSION_MINOR);
        assert_eq!(header.thiszone, 0);
        assert_eq!(header.sigfigs, 0);
        assert_eq!(header.snaplen, SNAPLEN);
        assert_eq!(header.network, Linktype::ETHERNET);
        assert!(rem.is_empty(), "no records expected after header");
    }

    #[test]
    fn test_record_round_trip() {
        let payload: Vec<u8> = (0..200u8).collect();
        let data = write_capture(&[&payload]);

        let (rem, _) = parse_pcap_header(&data).unwrap();
        let (rem, frame) = parse_pcap_frame(rem).unwrap();
        assert_eq!(frame.caplen, 200);
        assert_eq!(frame.origlen, 200);
        assert_eq!(frame.data, &payload[..]);
        assert!(rem.is_empty());
    }

    #[test]
    fn test_zero_length_record() {
        let data = write_capture(&[&[]]);

        let (rem, _) = parse_pcap_header(&data).unwrap();
        let (rem, frame) = parse_pcap_frame(rem).unwrap();
        assert_eq!(frame.caplen, 0);
        assert_eq!(frame.origlen, 0);
        assert!(frame.data.is_empty());
        assert!(rem.is_empty());
    }

    #[test]
    fn test_records_keep_write_order() {
        let data = write_capture(&[b"first", b"second!", b"third"]);

        let (mut rem, _) = parse_pcap_header(&data).unwrap();
        let mut seen = Vec::new();
        while !rem.is_empty() {
            let (next, frame) = parse_pcap_frame(rem).unwrap();
            seen.push(frame.data.to_vec());
            rem = next;
        }
        assert_eq!(seen, vec![b"first".to_vec(), b"second!".to_vec(), b"third".to_vec()]);
    }

    #[test]
    fn test_timestamp_is_write_time() {
        let before = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .unwrap()
            .as_secs() as u32;
        let data = write_capture(&[b"x"]);
        let after = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .unwrap()
            .as_secs() as u32;

        let (rem, _) = parse_pcap_header(&data).unwrap();
        let (_, frame) = parse_pcap_frame(rem).unwrap();
        assert!(frame.ts_sec >= before && frame.ts_sec <= after);
        assert!(frame.ts_usec < 1000, "sub-second field holds milliseconds");
    }

    #[test]
    fn test_create_fails_on_bad_path() {
        let err = PcapWriter::create("/nonexistent-dir/capture.pcap");
        assert!(err.is_err());
    }
}
