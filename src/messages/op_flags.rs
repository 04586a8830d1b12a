use enumflags2::{bitflags, BitFlags};

/// Per-request behavior flags. Bits are additive and independent;
/// there is no "unset" sentinel. Wire representation is a 32-bit
/// bitmask with these positions.
#[bitflags]
#[repr(u32)]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OpFlag {
  /// Sender wants an acknowledgment once the operation is applied.
  WantAck = 0x1,
  /// Sender wants a durable-commit notification.
  WantCommit = 0x2,
  /// This transmission is a retry of an earlier attempt.
  RetryAttempt = 0x4,
}

pub type OpFlags = BitFlags<OpFlag>;
