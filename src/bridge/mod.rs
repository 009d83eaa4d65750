//! Bridge between the hosted page and the shell.
//!
//! Both directions share one JSON envelope whose `type` field is the only
//! dispatch key. Inbound messages are posted by the page (through the script
//! in [`script`]); outbound messages are posted by the shell into the page.

pub mod message;
pub mod script;

pub use message::{parse_inbound, InboundMessage, OutboundMessage};
