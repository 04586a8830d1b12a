use std::fmt;

use speedy::{Readable, Writable};

/// One operation kind from the closed catalog. The numeric value is
/// load-bearing: values below 10 are read-only, everything else
/// mutates state or manages locks/replication. Extensions to the
/// catalog must preserve that boundary.
///
/// Values outside the catalog stay representable so that decode is
/// total over arbitrary wire input; only name lookup and the
/// read/write classification are catalog-sensitive.
#[derive(PartialEq, Eq, PartialOrd, Ord, Clone, Copy, Hash, Readable, Writable)]
pub struct Opcode {
  value: u32,
}

impl Opcode {
  // Read-only operations live below this value.
  const READ_WRITE_BOUNDARY: u32 = 10;

  pub const READ: Opcode = Opcode { value: 1 };
  pub const STAT: Opcode = Opcode { value: 2 };

  pub const WRNOOP: Opcode = Opcode { value: 10 };
  pub const WRITE: Opcode = Opcode { value: 11 };
  pub const ZERO: Opcode = Opcode { value: 12 };
  pub const DELETE: Opcode = Opcode { value: 13 };
  pub const TRUNCATE: Opcode = Opcode { value: 14 };

  pub const WRLOCK: Opcode = Opcode { value: 20 };
  pub const WRUNLOCK: Opcode = Opcode { value: 21 };
  pub const RDLOCK: Opcode = Opcode { value: 22 };
  pub const RDUNLOCK: Opcode = Opcode { value: 23 };
  pub const UPLOCK: Opcode = Opcode { value: 24 };
  pub const DNLOCK: Opcode = Opcode { value: 25 };

  pub const BALANCEREADS: Opcode = Opcode { value: 26 };
  pub const UNBALANCEREADS: Opcode = Opcode { value: 27 };

  pub const PULL: Opcode = Opcode { value: 30 };
  pub const PUSH: Opcode = Opcode { value: 31 };

  pub const ALL: [Opcode; 17] = [
    Opcode::READ,
    Opcode::STAT,
    Opcode::WRNOOP,
    Opcode::WRITE,
    Opcode::ZERO,
    Opcode::DELETE,
    Opcode::TRUNCATE,
    Opcode::WRLOCK,
    Opcode::WRUNLOCK,
    Opcode::RDLOCK,
    Opcode::RDUNLOCK,
    Opcode::UPLOCK,
    Opcode::DNLOCK,
    Opcode::BALANCEREADS,
    Opcode::UNBALANCEREADS,
    Opcode::PULL,
    Opcode::PUSH,
  ];

  pub fn value(self) -> u32 {
    self.value
  }

  /// True iff the operation only reads object state.
  pub fn is_read(self) -> bool {
    self.value < Self::READ_WRITE_BOUNDARY
  }

  /// Human name of the operation, or an error for values outside the
  /// catalog so callers can recover from protocol corruption.
  pub fn opname(self) -> Result<&'static str, UnknownOpcode> {
    let name = match self {
      Opcode::READ => "read",
      Opcode::STAT => "stat",
      Opcode::WRNOOP => "wrnoop",
      Opcode::WRITE => "write",
      Opcode::ZERO => "zero",
      Opcode::DELETE => "delete",
      Opcode::TRUNCATE => "truncate",
      Opcode::WRLOCK => "wrlock",
      Opcode::WRUNLOCK => "wrunlock",
      Opcode::RDLOCK => "rdlock",
      Opcode::RDUNLOCK => "rdunlock",
      Opcode::UPLOCK => "uplock",
      Opcode::DNLOCK => "dnlock",
      Opcode::BALANCEREADS => "balance-reads",
      Opcode::UNBALANCEREADS => "unbalance-reads",
      Opcode::PULL => "pull",
      Opcode::PUSH => "push",
      Opcode { value: other } => return Err(UnknownOpcode(other)),
    };
    Ok(name)
  }
}

impl fmt::Display for Opcode {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match self.opname() {
      Ok(name) => f.write_str(name),
      Err(_) => write!(f, "unknown-op({})", self.value),
    }
  }
}

impl fmt::Debug for Opcode {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match self.opname() {
      Ok(name) => f.write_str(name),
      Err(_) => write!(f, "Opcode {} (UNKNOWN!)", self.value),
    }
  }
}

/// Name lookup was attempted on a value outside the opcode catalog.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct UnknownOpcode(pub u32);

impl fmt::Display for UnknownOpcode {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    write!(f, "unknown opcode value {}", self.0)
  }
}

impl std::error::Error for UnknownOpcode {}
