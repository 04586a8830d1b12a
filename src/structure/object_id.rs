use std::fmt;

use serde::{Deserialize, Serialize};
use speedy::{Readable, Writable};

/// Identifier of a stored object. Opaque to the message layer; the
/// wire format is a 32-bit length followed by the UTF-8 name bytes.
#[derive(Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Readable, Writable, Serialize, Deserialize)]
pub struct ObjectId {
  name: String,
}

impl ObjectId {
  pub fn new<S: Into<String>>(name: S) -> ObjectId {
    ObjectId { name: name.into() }
  }

  pub fn name(&self) -> &str {
    &self.name
  }
}

impl From<&str> for ObjectId {
  fn from(name: &str) -> ObjectId {
    ObjectId::new(name)
  }
}

impl fmt::Display for ObjectId {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.write_str(&self.name)
  }
}

impl fmt::Debug for ObjectId {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.write_str(&self.name)
  }
}
