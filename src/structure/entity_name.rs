use std::fmt;

use serde::{Deserialize, Serialize};
use speedy::{Readable, Writable};

/// Name of a cluster entity: a daemon or a client process. The kind
/// tells what role the entity plays; the number distinguishes
/// entities of the same kind. Wire format is 8 bytes: kind then
/// number, both 32-bit.
#[derive(
  Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Readable, Writable, Serialize, Deserialize,
)]
pub struct EntityName {
  kind: u32,
  num: u32,
}

impl EntityName {
  pub const KIND_MON: u32 = 1;
  pub const KIND_MDS: u32 = 2;
  pub const KIND_OSD: u32 = 3;
  pub const KIND_CLIENT: u32 = 4;

  pub fn new(kind: u32, num: u32) -> EntityName {
    EntityName { kind, num }
  }

  pub fn mon(num: u32) -> EntityName {
    EntityName::new(Self::KIND_MON, num)
  }

  pub fn mds(num: u32) -> EntityName {
    EntityName::new(Self::KIND_MDS, num)
  }

  pub fn osd(num: u32) -> EntityName {
    EntityName::new(Self::KIND_OSD, num)
  }

  pub fn client(num: u32) -> EntityName {
    EntityName::new(Self::KIND_CLIENT, num)
  }

  pub fn kind(self) -> u32 {
    self.kind
  }

  pub fn num(self) -> u32 {
    self.num
  }

  pub fn kind_str(self) -> &'static str {
    match self.kind {
      Self::KIND_MON => "mon",
      Self::KIND_MDS => "mds",
      Self::KIND_OSD => "osd",
      Self::KIND_CLIENT => "client",
      _ => "unknown",
    }
  }
}

impl fmt::Display for EntityName {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    write!(f, "{}.{}", self.kind_str(), self.num)
  }
}

impl fmt::Debug for EntityName {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    fmt::Display::fmt(self, f)
  }
}
