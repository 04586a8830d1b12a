use std::fmt;

use serde::{Deserialize, Serialize};
use speedy::{Readable, Writable};

/// Placement-group identifier: the logical shard an object belongs
/// to for replication and placement purposes.
#[derive(
  Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Readable, Writable, Serialize, Deserialize,
)]
pub struct PgId {
  pub pool: u32,
  pub seed: u32,
}

impl PgId {
  pub fn new(pool: u32, seed: u32) -> PgId {
    PgId { pool, seed }
  }
}

impl fmt::Display for PgId {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    write!(f, "{}.{:x}", self.pool, self.seed)
  }
}

impl fmt::Debug for PgId {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    fmt::Display::fmt(self, f)
  }
}

/// Describes how an object maps onto its placement group. Opaque to
/// the message layer; the placement subsystem interprets it.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Readable, Writable, Serialize, Deserialize)]
pub struct ObjectLayout {
  pg_id: PgId,
  stripe_unit: u32,
}

impl ObjectLayout {
  pub fn new(pg_id: PgId, stripe_unit: u32) -> ObjectLayout {
    ObjectLayout { pg_id, stripe_unit }
  }

  pub fn pg_id(self) -> PgId {
    self.pg_id
  }

  pub fn stripe_unit(self) -> u32 {
    self.stripe_unit
  }
}
