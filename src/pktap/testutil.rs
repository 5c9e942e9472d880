//! Synthetic frame construction for tests.

use super::PKTAP_HEADER_MIN_LEN;

/// Build a synthetic frame: packet-tap header followed by `payload`.
///
/// `header_length` is declared as `extra_header` bytes past the fixed
/// layout, with that many filler bytes inserted before the payload.
pub(crate) fn build_frame(
    process_name: &str,
    peer_process_name: &str,
    extra_header: usize,
    payload: &[u8],
) -> Vec<u8> {
    let header_length = (PKTAP_HEADER_MIN_LEN + extra_header) as u32;
    let mut frame = Vec::new();

    frame.extend_from_slice(&header_length.to_be_bytes());
    frame.push(2); // version
    frame.extend_from_slice(&(payload.len() as u32).to_be_bytes());
    frame.push(1); // frame type
    frame.extend_from_slice(&7u16.to_be_bytes()); // unit
    frame.push(1); // direction: outbound
    frame.extend_from_slice(&2u32.to_be_bytes()); // protocol family: AF_INET
    frame.extend_from_slice(&0u32.to_be_bytes()); // pre padding
    frame.extend_from_slice(&0u32.to_be_bytes()); // post padding

    let mut ifname = [0u8; 16];
    ifname[..3].copy_from_slice(b"en0");
    frame.extend_from_slice(&ifname);

    frame.extend_from_slice(&1234u32.to_be_bytes()); // pid
    frame.extend_from_slice(&padded_name(process_name));
    frame.extend_from_slice(&0u32.to_be_bytes()); // reserved1
    frame.extend_from_slice(&5678u32.to_be_bytes()); // peer pid
    frame.extend_from_slice(&padded_name(peer_process_name));
    frame.extend_from_slice(&[0u8; 8]); // reserved2

    frame.extend_from_slice(&vec![0xee; extra_header]);
    frame.extend_from_slice(payload);
    frame
}

fn padded_name(name: &str) -> [u8; 17] {
    let mut buf = [0u8; 17];
    buf[..name.len()].copy_from_slice(name.as_bytes());
    buf
}
