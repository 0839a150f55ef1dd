//! Chrome DevTools Protocol transport: tab discovery, a single attached
//! session, snapshot capture and synthetic input injection.

mod client;
mod error;
mod live;
mod protocol;
mod session;

pub use client::CdpClient;
pub use error::CdpError;
pub use live::LivePage;
pub use protocol::PageInfo;
pub use session::GameSession;
