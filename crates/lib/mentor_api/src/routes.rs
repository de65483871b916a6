//! Route paths.

pub const POST_API_CHAT: &str = "/api/chat";
pub const POST_API_CHAT_IMAGE: &str = "/api/chat/image";
pub const GET_API_RECOMMENDATIONS: &str = "/api/recommendations";
pub const GET_API_HEALTH: &str = "/api/health";
