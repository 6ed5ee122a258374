//! Character id spaces owned by the host roster

pub mod absolute;
pub mod mapper;

pub use absolute::AbsoluteTable;
pub use mapper::IdentifierMapper;
