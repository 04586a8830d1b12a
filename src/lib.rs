//! Wire-level representation of a single client-to-storage-node
//! operation request in a distributed object-storage cluster: a
//! fixed-layout header plus a variable-length snapshot-context list,
//! with byte-exact encode/decode.
//!
//! The surrounding system (message transport, placement-group state
//! machines, the storage engine, cluster-map management) is an
//! external collaborator. This crate only defines the message's
//! shape, its field semantics, and its (de)serialization contract.


pub mod messages;
pub mod structure;

pub use crate::messages::{
  envelope::MessageEnvelope,
  op_flags::{OpFlag, OpFlags},
  op_request::{OpRequest, ReplyView},
  opcode::{Opcode, UnknownOpcode},
  request_id::RequestId,
};
pub use crate::structure::{
  entity_name::EntityName,
  object_id::ObjectId,
  object_layout::{ObjectLayout, PgId},
  object_version::ObjectVersion,
  peer_stat::PeerStat,
  snapshot_id::SnapshotId,
};
