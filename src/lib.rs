//! Dialogue Customizer - runtime character name and nickname substitution

pub mod core;
pub mod host;
pub mod roster;
pub mod speaker;
pub mod substitution;
pub mod text;
