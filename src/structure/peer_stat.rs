use serde::{Deserialize, Serialize};
use speedy::{Readable, Writable};

/// Load snapshot of a forwarding storage node, piggybacked on the
/// request as it is relayed. The originating client leaves this
/// zeroed; forwarding nodes overwrite it before re-relaying. The
/// surrounding transport must guarantee a single writer at a time.
#[derive(Debug, Default, Copy, Clone, PartialEq, Eq, Readable, Writable, Serialize, Deserialize)]
pub struct PeerStat {
  pub stamp_sec: u32,
  pub stamp_nsec: u32,
  pub queue_len: u32,
  pub recent_queue_len: u32,
}

impl PeerStat {
  pub fn new(stamp_sec: u32, stamp_nsec: u32, queue_len: u32, recent_queue_len: u32) -> PeerStat {
    PeerStat {
      stamp_sec,
      stamp_nsec,
      queue_len,
      recent_queue_len,
    }
  }
}
