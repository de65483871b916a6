//! Domain models shared by the ranker, the relay, and the HTTP layer.

pub mod chat;
pub mod material;

pub use chat::{ChatResult, ConversationTurn, ImageAttachment};
pub use material::{Difficulty, MaterialItem, MaterialType, ScoredMaterial};
