//! Adapter implementations of the port traits.
//!
//! - `live`: talk to the real services over HTTP.
//! - `recording`: wrap another adapter and capture every interaction.
//! - `replaying`: serve interactions captured earlier from a cassette.

pub mod live;
pub mod recording;
pub mod replaying;
