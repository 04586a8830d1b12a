use bytes::Bytes;

/// Minimal stand-in for the transport-level message envelope.
///
/// Encoding a request fills `payload` with the serialized header and
/// snapshot list, and annotates `data_off` so the transport can
/// locate the data section that follows this header in the wider
/// message. Transport and dispatch themselves live outside this
/// crate.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct MessageEnvelope {
  pub payload: Bytes,
  pub data_off: u64,
}

impl MessageEnvelope {
  pub fn new() -> MessageEnvelope {
    MessageEnvelope::default()
  }
}
