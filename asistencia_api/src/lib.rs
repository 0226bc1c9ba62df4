mod client;
mod errors;
pub mod types;
pub mod user_agent;
pub use self::client::Client;
pub use self::errors::Error;
