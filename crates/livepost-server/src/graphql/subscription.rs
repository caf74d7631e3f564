use async_graphql::{Context, Result, Subscription};
use futures::{Stream, StreamExt};

use super::types::Post;
use super::{PostBus, POST_ADDED};
use crate::context::RequestContext;

pub struct SubscriptionRoot;

#[Subscription]
impl SubscriptionRoot {
    /// Posts added after the subscription starts
    async fn post_added(&self, ctx: &Context<'_>) -> Result<impl Stream<Item = Post>> {
        let bus = ctx.data::<PostBus>()?;
        let subscription = bus.subscribe(POST_ADDED);

        tracing::debug!(
            subscription_id = subscription.id(),
            request_id = ?ctx.data_opt::<RequestContext>().map(|c| c.request_id),
            "postAdded subscription started"
        );

        Ok(subscription.map(Post::from))
    }
}
