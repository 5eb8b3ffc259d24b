use thiserror::Error;

use crate::model::PacketName;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum CoreError {
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    #[error("Packet not found: {0}")]
    PacketNotFound(PacketName),

    #[error("Unknown packet name: {0}")]
    UnknownPacketName(String),
}

pub type Result<T> = std::result::Result<T, CoreError>;
