pub mod entity_name;
pub mod object_id;
pub mod object_layout;
pub mod object_version;
pub mod peer_stat;
pub mod snapshot_id;
