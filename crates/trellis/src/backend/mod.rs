/// A surface that records draw calls for tests and headless hosts.
pub mod recording;

pub use recording::{DrawCommand, RecordingSurface};
