//! livepost core.
//!
//! This crate holds the state behind the livepost GraphQL server:
//! - [`PostStore`]: append-only, insertion-ordered list of posts
//! - [`EventBus`]: topic-keyed publish/subscribe registry with fan-out delivery
//!
//! Neither component performs I/O; the server crate wires them to HTTP.

pub mod bus;
pub mod error;
pub mod post;
pub mod store;

pub use bus::{EventBus, Subscription, DEFAULT_LISTENER_CAPACITY};
pub use error::{Error, Result};
pub use post::Post;
pub use store::{PostStore, SharedPostStore};
