//! Tower layers applied to every Cloud Controller request.

mod access_token;
mod user_agent;

pub use access_token::{AccessTokenLayer, AccessTokenService};
pub use user_agent::{UserAgentLayer, UserAgentService};
