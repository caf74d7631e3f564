use async_graphql::SimpleObject;

/// A post on the board.
#[derive(SimpleObject, Debug, Clone, PartialEq, Eq)]
pub struct Post {
    pub author: String,
    pub comment: String,
}

impl From<livepost_core::Post> for Post {
    fn from(post: livepost_core::Post) -> Self {
        Self {
            author: post.author,
            comment: post.comment,
        }
    }
}
