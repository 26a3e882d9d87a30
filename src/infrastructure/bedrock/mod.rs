mod document;
mod runtime;

pub use runtime::BedrockRuntime;
