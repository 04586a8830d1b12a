use std::fmt;

use serde::{Deserialize, Serialize};
use speedy::{Readable, Writable};

/// Version of an object under a given cluster-map epoch. Orders a
/// write against earlier writes to the same object: first by epoch,
/// then by the per-epoch version counter.
#[derive(
  Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Readable, Writable, Serialize, Deserialize,
)]
pub struct ObjectVersion {
  pub epoch: u32,
  pub version: u64,
}

impl ObjectVersion {
  pub const ZERO: ObjectVersion = ObjectVersion {
    epoch: 0,
    version: 0,
  };

  pub fn new(epoch: u32, version: u64) -> ObjectVersion {
    ObjectVersion { epoch, version }
  }
}

impl Default for ObjectVersion {
  fn default() -> ObjectVersion {
    ObjectVersion::ZERO
  }
}

impl fmt::Display for ObjectVersion {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    write!(f, "{}'{}", self.epoch, self.version)
  }
}

impl fmt::Debug for ObjectVersion {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    fmt::Display::fmt(self, f)
  }
}
