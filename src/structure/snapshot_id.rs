use std::fmt;

use serde::{Deserialize, Serialize};
use speedy::{Context, Readable, Reader, Writable, Writer};

/// Identifier of a snapshot relevant to an operation's consistency
/// semantics. Requests carry an ordered list of these; order is
/// significant and preserved through encode/decode.
#[derive(Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct SnapshotId(u64);

impl SnapshotId {
  pub const NONE: SnapshotId = SnapshotId(0);

  pub fn new(value: u64) -> SnapshotId {
    SnapshotId(value)
  }

  pub fn value(self) -> u64 {
    self.0
  }
}

impl From<u64> for SnapshotId {
  fn from(value: u64) -> SnapshotId {
    SnapshotId(value)
  }
}

impl From<SnapshotId> for u64 {
  fn from(snapshot_id: SnapshotId) -> u64 {
    snapshot_id.0
  }
}

impl<'a, C: Context> Readable<'a, C> for SnapshotId {
  #[inline]
  fn read_from<R: Reader<'a, C>>(reader: &mut R) -> Result<Self, C::Error> {
    Ok(SnapshotId(reader.read_u64()?))
  }

  #[inline]
  fn minimum_bytes_needed() -> usize {
    std::mem::size_of::<Self>()
  }
}

impl<C: Context> Writable<C> for SnapshotId {
  #[inline]
  fn write_to<T: ?Sized + Writer<C>>(&self, writer: &mut T) -> Result<(), C::Error> {
    writer.write_u64(self.0)
  }
}

// Bare-number formatting keeps snapshot lists rendering as [1, 4]
// in the request debug line.
impl fmt::Display for SnapshotId {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    write!(f, "{}", self.0)
  }
}

impl fmt::Debug for SnapshotId {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    fmt::Display::fmt(self, f)
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn snapshot_list_renders_bare_numbers() {
    let snaps = vec![SnapshotId::new(1), SnapshotId::new(4)];
    assert_eq!("[1, 4]", format!("{:?}", snaps));
  }

  serialization_test!( type = SnapshotId,
  {
      snapshot_id_none,
      SnapshotId::NONE,
      le = [0x00; 8],
      be = [0x00; 8]
  },
  {
      snapshot_id,
      SnapshotId::new(0x2A),
      le = [0x2A, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00],
      be = [0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x2A]
  });
}
