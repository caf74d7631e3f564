use async_graphql::{Context, Object, Result};
use livepost_core::SharedPostStore;

use super::types::Post;

pub struct QueryRoot;

#[Object]
impl QueryRoot {
    /// Every post, oldest first
    async fn posts(&self, ctx: &Context<'_>) -> Result<Vec<Post>> {
        let store = ctx.data::<SharedPostStore>()?;
        Ok(store.list_posts().into_iter().map(Post::from).collect())
    }
}
