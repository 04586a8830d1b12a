pub mod envelope;
pub mod op_flags;
pub mod op_request;
pub mod opcode;
pub mod request_id;
