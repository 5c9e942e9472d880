//! Apple packet-tap header parsing and process filtering.
//!
//! Every frame delivered by the pcapd service starts with a big-endian
//! packet-tap header identifying the capturing interface and the owning
//! process. This module decodes that header and decides which frames
//! belong to the process of interest.

mod filter;
mod header;
#[cfg(test)]
pub(crate) mod testutil;

pub use filter::ProcessFilter;
pub use header::{PktapHeader, PKTAP_HEADER_MIN_LEN};
