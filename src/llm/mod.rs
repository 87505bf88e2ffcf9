// LLM abstraction layer

pub mod gateway;
pub mod provider;

pub use gateway::ChatGatewayAdapter;
pub use provider::*;
