//! Caption generation via the OpenAI chat-completions endpoint.

mod openai;

pub use openai::{OpenAiCaptionGenerator, OpenAiConfig};
