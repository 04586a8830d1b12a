use std::fmt;

use serde::{Deserialize, Serialize};

use crate::structure::entity_name::EntityName;

/// Identity of a logical request: (client name, per-connection
/// instance counter, transaction id). Derived on demand from a
/// request header, never stored on the wire separately. Two requests
/// with equal identity are the same logical request for external
/// dedup, ordering and retry correlation.
#[derive(Copy, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct RequestId {
  pub client: EntityName,
  pub inc: u32,
  pub tid: u64,
}

impl RequestId {
  pub fn new(client: EntityName, inc: u32, tid: u64) -> RequestId {
    RequestId { client, inc, tid }
  }
}

impl fmt::Display for RequestId {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    write!(f, "{}.{}:{}", self.client, self.inc, self.tid)
  }
}

impl fmt::Debug for RequestId {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    fmt::Display::fmt(self, f)
  }
}
