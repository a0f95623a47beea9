mod input_processor;
mod multiplexer;
pub mod processor;

pub use input_processor::InputProcessor;
pub use multiplexer::InputMultiplexer;
