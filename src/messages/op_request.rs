use std::{fmt, io};

use bytes::Bytes;
use enumflags2::BitFlags;
use log::error;
use speedy::{Context, Endianness, Readable, Reader, Writable, Writer};

use crate::{
  messages::{
    envelope::MessageEnvelope,
    op_flags::{OpFlag, OpFlags},
    opcode::Opcode,
    request_id::RequestId,
  },
  structure::{
    entity_name::EntityName,
    object_id::ObjectId,
    object_layout::{ObjectLayout, PgId},
    object_version::ObjectVersion,
    peer_stat::PeerStat,
    snapshot_id::SnapshotId,
  },
};

/// One client-to-storage-node operation request: a fixed-layout
/// header plus an ordered snapshot-context list.
///
/// A client constructs the request with its identity, target object,
/// layout, map epoch, opcode and flags; late-bound fields (layout,
/// flags, offset/length, reasserted version, lock epoch, peer stat on
/// forwarding) may be mutated before send. It is encoded exactly once
/// for transmission and decoded exactly once on the receiving side.
/// After decode it is read-only except for the peer-stat field, which
/// forwarding nodes overwrite before re-relaying.
///
/// Wire field order: client name, client instance counter,
/// transaction id, object id, layout, map epoch, opcode, flags,
/// offset, length, lock epoch, peer stat, shed count, reasserted
/// version, snapshot count, then the snapshot ids in list order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OpRequest {
  client_name: EntityName,
  client_inc: u32,
  tid: u64,
  oid: ObjectId,
  layout: ObjectLayout,
  osdmap_epoch: u64,
  op: Opcode,
  flags: OpFlags,
  offset: i64,
  length: i64,
  inc_lock: u32,
  peer_stat: PeerStat,
  shed_count: u32,
  reassert_version: ObjectVersion,
  snaps: Vec<SnapshotId>,
}

impl OpRequest {
  // The protocol family fixes the wire byte order.
  const WIRE_ENDIANNESS: Endianness = Endianness::LittleEndian;

  #[allow(clippy::too_many_arguments)]
  pub fn new(
    asker: EntityName,
    inc: u32,
    tid: u64,
    oid: ObjectId,
    layout: ObjectLayout,
    map_epoch: u64,
    op: Opcode,
    flags: OpFlags,
  ) -> OpRequest {
    OpRequest {
      client_name: asker,
      client_inc: inc,
      tid,
      oid,
      layout,
      osdmap_epoch: map_epoch,
      op,
      flags,
      offset: 0,
      length: 0,
      inc_lock: 0,
      peer_stat: PeerStat::default(),
      shed_count: 0,
      reassert_version: ObjectVersion::ZERO,
      snaps: Vec::new(),
    }
  }

  /// Identity of the logical request, derived on demand.
  pub fn request_id(&self) -> RequestId {
    RequestId::new(self.client_name, self.client_inc, self.tid)
  }

  pub fn client(&self) -> EntityName {
    self.client_name
  }

  pub fn client_inc(&self) -> u32 {
    self.client_inc
  }

  pub fn tid(&self) -> u64 {
    self.tid
  }

  pub fn oid(&self) -> &ObjectId {
    &self.oid
  }

  pub fn layout(&self) -> ObjectLayout {
    self.layout
  }

  pub fn set_layout(&mut self, layout: ObjectLayout) {
    self.layout = layout;
  }

  pub fn pg_id(&self) -> PgId {
    self.layout.pg_id()
  }

  pub fn map_epoch(&self) -> u64 {
    self.osdmap_epoch
  }

  pub fn op(&self) -> Opcode {
    self.op
  }

  pub fn set_op(&mut self, op: Opcode) {
    self.op = op;
  }

  /// True iff the opcode only reads object state (catalog values
  /// below 10).
  pub fn is_read(&self) -> bool {
    self.op.is_read()
  }

  pub fn offset(&self) -> i64 {
    self.offset
  }

  pub fn set_offset(&mut self, offset: i64) {
    self.offset = offset;
  }

  pub fn length(&self) -> i64 {
    self.length
  }

  pub fn set_length(&mut self, length: i64) {
    self.length = length;
  }

  pub fn inc_lock(&self) -> u32 {
    self.inc_lock
  }

  pub fn set_inc_lock(&mut self, inc_lock: u32) {
    self.inc_lock = inc_lock;
  }

  pub fn reassert_version(&self) -> ObjectVersion {
    self.reassert_version
  }

  pub fn set_version(&mut self, version: ObjectVersion) {
    self.reassert_version = version;
  }

  /// Overwritten by forwarding nodes before re-relaying. The
  /// transport must guarantee a single writer at a time.
  pub fn set_peer_stat(&mut self, stat: PeerStat) {
    self.peer_stat = stat;
  }

  pub fn peer_stat(&self) -> PeerStat {
    self.peer_stat
  }

  /// Bumped each time the request is redirected to another node.
  /// Single-writer access, like the peer stat.
  pub fn inc_shed_count(&mut self) {
    self.shed_count += 1;
  }

  pub fn shed_count(&self) -> u32 {
    self.shed_count
  }

  pub fn snaps(&self) -> &[SnapshotId] {
    &self.snaps
  }

  pub fn snaps_mut(&mut self) -> &mut Vec<SnapshotId> {
    &mut self.snaps
  }

  pub fn flags(&self) -> OpFlags {
    self.flags
  }

  pub fn wants_ack(&self) -> bool {
    self.flags.contains(OpFlag::WantAck)
  }

  pub fn wants_commit(&self) -> bool {
    self.flags.contains(OpFlag::WantCommit)
  }

  pub fn is_retry_attempt(&self) -> bool {
    self.flags.contains(OpFlag::RetryAttempt)
  }

  /// Sets or clears the ack-wanted flag according to `b`.
  pub fn set_want_ack(&mut self, b: bool) {
    self.set_flag(OpFlag::WantAck, b);
  }

  /// Sets or clears the durable-commit flag according to `b`.
  pub fn set_want_commit(&mut self, b: bool) {
    self.set_flag(OpFlag::WantCommit, b);
  }

  /// Sets or clears the retry marker according to `b`.
  pub fn set_retry_attempt(&mut self, b: bool) {
    self.set_flag(OpFlag::RetryAttempt, b);
  }

  fn set_flag(&mut self, flag: OpFlag, b: bool) {
    if b {
      self.flags.insert(flag);
    } else {
      self.flags.remove(flag);
    }
  }

  /// The read-only window a reply message is allowed to echo back.
  pub fn reply_view(&self) -> ReplyView<'_> {
    ReplyView { req: self }
  }

  pub fn type_name(&self) -> &'static str {
    "osd_op"
  }

  /// Serializes the header and snapshot list into the envelope
  /// payload and annotates the envelope with the payload offset of
  /// the data section following this header.
  pub fn encode_payload(&self, env: &mut MessageEnvelope) -> io::Result<()> {
    let bytes = self.write_to_vec_with_ctx(Self::WIRE_ENDIANNESS).map_err(|e| {
      error!(
        "Couldn't write op request {} to bytes. Error: {}",
        self.request_id(),
        e
      );
      io::Error::new(io::ErrorKind::Other, e)
    })?;
    env.payload = Bytes::from(bytes);
    env.data_off = self.offset as u64;
    Ok(())
  }

  pub fn decode_payload(env: &MessageEnvelope) -> io::Result<OpRequest> {
    Self::read_from_buffer(&env.payload)
  }

  /// Decodes a request from received bytes. Fails with a structured
  /// error if the buffer is truncated relative to the fixed header
  /// width or to the declared snapshot count.
  pub fn read_from_buffer(buffer: &Bytes) -> io::Result<OpRequest> {
    OpRequest::read_from_buffer_with_ctx(Self::WIRE_ENDIANNESS, &buffer[..])
      .map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))
  }
}

impl<C: Context> Writable<C> for OpRequest {
  fn write_to<T: ?Sized + Writer<C>>(&self, writer: &mut T) -> Result<(), C::Error> {
    writer.write_value(&self.client_name)?;
    writer.write_u32(self.client_inc)?;
    writer.write_u64(self.tid)?;
    writer.write_value(&self.oid)?;
    writer.write_value(&self.layout)?;
    writer.write_u64(self.osdmap_epoch)?;
    writer.write_value(&self.op)?;
    writer.write_u32(self.flags.bits())?;
    writer.write_i64(self.offset)?;
    writer.write_i64(self.length)?;
    writer.write_u32(self.inc_lock)?;
    writer.write_value(&self.peer_stat)?;
    writer.write_u32(self.shed_count)?;
    writer.write_value(&self.reassert_version)?;
    // Declared count always equals the attached list length.
    writer.write_u32(self.snaps.len() as u32)?;
    for snap in &self.snaps {
      writer.write_value(snap)?;
    }
    Ok(())
  }
}

impl<'a, C: Context> Readable<'a, C> for OpRequest {
  fn read_from<R: Reader<'a, C>>(reader: &mut R) -> Result<Self, C::Error> {
    let client_name = reader.read_value()?;
    let client_inc = reader.read_u32()?;
    let tid = reader.read_u64()?;
    let oid = reader.read_value()?;
    let layout = reader.read_value()?;
    let osdmap_epoch = reader.read_u64()?;
    let op = reader.read_value()?;
    let flags = BitFlags::from_bits_truncate(reader.read_u32()?);
    let offset = reader.read_i64()?;
    let length = reader.read_i64()?;
    let inc_lock = reader.read_u32()?;
    let peer_stat = reader.read_value()?;
    let shed_count = reader.read_u32()?;
    let reassert_version = reader.read_value()?;
    let snap_count = reader.read_u32()?;
    // The count is untrusted wire input; let element reads hit
    // end-of-stream instead of preallocating from it.
    let mut snaps = Vec::new();
    for _ in 0..snap_count {
      snaps.push(reader.read_value::<SnapshotId>()?);
    }
    Ok(OpRequest {
      client_name,
      client_inc,
      tid,
      oid,
      layout,
      osdmap_epoch,
      op,
      flags,
      offset,
      length,
      inc_lock,
      peer_stat,
      shed_count,
      reassert_version,
      snaps,
    })
  }
}

impl fmt::Display for OpRequest {
  /// One deterministic line for logs and snapshot-style tests.
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    write!(
      f,
      "{}({} {} {}",
      self.type_name(),
      self.request_id(),
      self.op,
      self.oid
    )?;
    if self.length != 0 {
      write!(f, " {}~{}", self.offset, self.length)?;
    }
    write!(f, " {}", self.pg_id())?;
    if self.is_retry_attempt() {
      write!(f, " RETRY")?;
    }
    if !self.snaps.is_empty() {
      write!(f, " snaps={:?}", self.snaps)?;
    }
    write!(f, ")")
  }
}

/// Narrow read-only view a reply message shares with its request.
/// Exposes exactly the header fields a reply echoes back, instead of
/// a general backdoor into the request's private state.
#[derive(Clone, Copy)]
pub struct ReplyView<'a> {
  req: &'a OpRequest,
}

impl ReplyView<'_> {
  pub fn request_id(&self) -> RequestId {
    self.req.request_id()
  }

  pub fn op(&self) -> Opcode {
    self.req.op
  }

  pub fn flags(&self) -> OpFlags {
    self.req.flags
  }

  pub fn layout(&self) -> ObjectLayout {
    self.req.layout
  }

  pub fn offset(&self) -> i64 {
    self.req.offset
  }

  pub fn length(&self) -> i64 {
    self.req.length
  }

  pub fn reassert_version(&self) -> ObjectVersion {
    self.req.reassert_version
  }

  pub fn map_epoch(&self) -> u64 {
    self.req.osdmap_epoch
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  fn basic_request(op: Opcode, flags: OpFlags) -> OpRequest {
    OpRequest::new(
      EntityName::client(42),
      3,
      100,
      ObjectId::new("foo"),
      ObjectLayout::new(PgId::new(2, 0x3F), 0x0001_0000),
      7,
      op,
      flags,
    )
  }

  #[test]
  fn flag_queries_reflect_set_and_clear() {
    let mut req = basic_request(Opcode::WRITE, OpFlags::empty());
    assert!(!req.wants_ack());
    assert!(!req.wants_commit());
    assert!(!req.is_retry_attempt());

    req.set_want_ack(true);
    req.set_retry_attempt(true);
    assert!(req.wants_ack());
    assert!(!req.wants_commit());
    assert!(req.is_retry_attempt());

    req.set_want_ack(false);
    assert!(!req.wants_ack());
    assert!(req.is_retry_attempt());
  }

  #[test]
  fn shed_count_increments() {
    let mut req = basic_request(Opcode::READ, OpFlags::empty());
    assert_eq!(0, req.shed_count());
    req.inc_shed_count();
    req.inc_shed_count();
    assert_eq!(2, req.shed_count());
  }

  #[test]
  fn render_omits_extent_when_length_is_zero() {
    let req = basic_request(Opcode::WRITE, OpFlags::empty());
    assert_eq!("osd_op(client.42.3:100 write foo 2.3f)", format!("{}", req));
  }

  #[test]
  fn render_includes_extent_when_length_is_nonzero() {
    let mut req = basic_request(Opcode::WRITE, OpFlags::empty());
    req.set_offset(100);
    req.set_length(50);
    assert_eq!(
      "osd_op(client.42.3:100 write foo 100~50 2.3f)",
      format!("{}", req)
    );
  }

  #[test]
  fn render_includes_retry_marker_and_snaps() {
    let mut req = basic_request(Opcode::WRITE, OpFlags::empty());
    req.set_retry_attempt(true);
    req.snaps_mut().push(SnapshotId::new(1));
    req.snaps_mut().push(SnapshotId::new(4));
    assert_eq!(
      "osd_op(client.42.3:100 write foo 2.3f RETRY snaps=[1, 4])",
      format!("{}", req)
    );
  }

  #[test]
  fn reply_view_exposes_the_reply_fields() {
    let mut req = basic_request(Opcode::WRITE, OpFlag::WantAck.into());
    req.set_offset(8);
    req.set_length(16);
    req.set_version(ObjectVersion::new(2, 5));

    let view = req.reply_view();
    assert_eq!(req.request_id(), view.request_id());
    assert_eq!(Opcode::WRITE, view.op());
    assert!(view.flags().contains(OpFlag::WantAck));
    assert_eq!(8, view.offset());
    assert_eq!(16, view.length());
    assert_eq!(ObjectVersion::new(2, 5), view.reassert_version());
    assert_eq!(7, view.map_epoch());
  }

  serialization_test!( type = OpRequest,
  {
      op_request_with_one_snap,
      {
        let mut req = OpRequest::new(
          EntityName::client(4),
          1,
          2,
          ObjectId::new("ab"),
          ObjectLayout::new(PgId::new(1, 0x0F), 0x0001_0000),
          3,
          Opcode::READ,
          OpFlag::WantAck.into(),
        );
        req.set_offset(16);
        req.set_length(32);
        req.snaps_mut().push(SnapshotId::new(5));
        req
      },
      le = [0x04, 0x00, 0x00, 0x00,                         // client kind
            0x04, 0x00, 0x00, 0x00,                         // client num
            0x01, 0x00, 0x00, 0x00,                         // client inc
            0x02, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, // tid
            0x02, 0x00, 0x00, 0x00, 0x61, 0x62,             // oid "ab"
            0x01, 0x00, 0x00, 0x00,                         // pg pool
            0x0F, 0x00, 0x00, 0x00,                         // pg seed
            0x00, 0x00, 0x01, 0x00,                         // stripe unit
            0x03, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, // map epoch
            0x01, 0x00, 0x00, 0x00,                         // opcode read
            0x01, 0x00, 0x00, 0x00,                         // flags ack
            0x10, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, // offset
            0x20, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, // length
            0x00, 0x00, 0x00, 0x00,                         // inc lock
            0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, // peer stat
            0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00,
            0x00, 0x00, 0x00, 0x00,                         // shed count
            0x00, 0x00, 0x00, 0x00,                         // reassert epoch
            0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, // reassert version
            0x01, 0x00, 0x00, 0x00,                         // snap count
            0x05, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00],// snap id
      be = [0x00, 0x00, 0x00, 0x04,
            0x00, 0x00, 0x00, 0x04,
            0x00, 0x00, 0x00, 0x01,
            0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x02,
            0x00, 0x00, 0x00, 0x02, 0x61, 0x62,
            0x00, 0x00, 0x00, 0x01,
            0x00, 0x00, 0x00, 0x0F,
            0x00, 0x01, 0x00, 0x00,
            0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x03,
            0x00, 0x00, 0x00, 0x01,
            0x00, 0x00, 0x00, 0x01,
            0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x10,
            0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x20,
            0x00, 0x00, 0x00, 0x00,
            0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00,
            0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00,
            0x00, 0x00, 0x00, 0x00,
            0x00, 0x00, 0x00, 0x00,
            0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00,
            0x00, 0x00, 0x00, 0x01,
            0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x05]
  });
}
