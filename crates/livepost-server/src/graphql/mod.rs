//! GraphQL API for the post board
//!
//! - [`QueryRoot`]: `posts`
//! - [`MutationRoot`]: `addPost`
//! - [`SubscriptionRoot`]: `postAdded`, streamed over WebSocket

mod mutation;
mod query;
mod subscription;
mod types;

pub use mutation::MutationRoot;
pub use query::QueryRoot;
pub use subscription::SubscriptionRoot;
pub use types::Post;

use async_graphql::{ErrorExtensions, Schema};
use livepost_core::{EventBus, SharedPostStore};

/// Topic carrying every newly added post.
pub const POST_ADDED: &str = "postAdded";

/// Bus carrying store posts between the mutation and subscription resolvers.
pub type PostBus = EventBus<livepost_core::Post>;

pub type LivepostSchema = Schema<QueryRoot, MutationRoot, SubscriptionRoot>;

/// Build the schema with the store and bus attached as schema data.
pub fn build_schema(store: SharedPostStore, bus: PostBus) -> LivepostSchema {
    Schema::build(QueryRoot, MutationRoot, SubscriptionRoot)
        .data(store)
        .data(bus)
        .finish()
}

/// Map a core error onto a GraphQL error with a machine readable code.
pub(crate) fn user_input_error(err: livepost_core::Error) -> async_graphql::Error {
    let field = err.field();
    async_graphql::Error::new(err.to_string()).extend_with(|_, ext| {
        ext.set("code", "BAD_USER_INPUT");
        ext.set("field", field);
    })
}
