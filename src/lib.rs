mod common;
mod config;
mod logging;
pub mod protocol;
mod server;
mod session;
mod store;

pub use common::*;
pub use config::*;
pub use logging::init_logging;
pub use protocol::*;
pub use server::{create_router, Server, ServerConfig};
pub use session::{GameSession, GameStatus};
pub use store::SessionStore;
