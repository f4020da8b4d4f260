//! Message formatting and Discord delivery.
//!
//! Renders candidate deals into plain-text messages or rich embeds and
//! posts them through the Discord REST API. All user-visible text coming
//! from upstream (titles) is mention-sanitized before it leaves this
//! crate.

mod discord;
mod embed;
mod error;
mod format;

pub use discord::*;
pub use embed::*;
pub use error::*;
pub use format::*;
