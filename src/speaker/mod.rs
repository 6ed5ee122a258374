pub mod tracker;

pub use tracker::{SpeakerSource, SpeakerTracker};
