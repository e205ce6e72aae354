pub mod ecc;
pub mod error;

pub use ecc::{ChannelModel, DecodeTrace, Direction, Iteration, ParityCheckMatrix, Session};
pub use error::{Error, Result};
