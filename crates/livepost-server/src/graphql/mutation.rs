use async_graphql::{Context, Object, Result};
use livepost_core::SharedPostStore;

use super::types::Post;
use super::{user_input_error, PostBus, POST_ADDED};
use crate::context::RequestContext;

pub struct MutationRoot;

#[Object]
impl MutationRoot {
    /// Append a post and notify `postAdded` subscribers
    async fn add_post(&self, ctx: &Context<'_>, author: String, comment: String) -> Result<Post> {
        let store = ctx.data::<SharedPostStore>()?;
        let bus = ctx.data::<PostBus>()?;
        let request_id = ctx.data_opt::<RequestContext>().map(|c| c.request_id);

        // Publishing under the store lock keeps event order equal to store order.
        let (post, delivered) = store
            .add_post_with(author, comment, |post| bus.publish(POST_ADDED, post.clone()))
            .map_err(user_input_error)?;

        tracing::info!(
            request_id = ?request_id,
            author = %post.author,
            delivered,
            "post added"
        );

        Ok(post.into())
    }
}
