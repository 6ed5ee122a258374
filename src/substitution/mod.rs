pub mod engine;
pub mod protocol;

pub use engine::{RewriteContext, SubstitutionEngine};
pub use protocol::unwrap_protocol;
