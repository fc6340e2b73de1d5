pub mod emitter;
pub mod format;
pub mod loader;

pub use emitter::{emit, EmitError};
pub use format::Document;
pub use loader::LoadError;
