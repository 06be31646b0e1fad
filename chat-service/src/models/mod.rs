pub mod chat;
pub mod persona;

pub use chat::{ChatRequest, ChatResponse};
pub use persona::SYSTEM_PROMPT;
