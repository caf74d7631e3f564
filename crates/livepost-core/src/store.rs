//! In-memory post store.

use std::sync::Arc;

use parking_lot::RwLock;

use crate::error::Result;
use crate::post::Post;

/// Author of the post every seeded store starts with.
pub const SEED_AUTHOR: &str = "Bob";

/// Comment of the post every seeded store starts with.
pub const SEED_COMMENT: &str = "Cool Post Bro!";

/// Append-only list of posts kept in insertion order.
///
/// Appends are serialized by the write lock, so every reader observes a
/// prefix of the final sequence. Reads return a copy; callers never hold a
/// live view into the store.
#[derive(Debug)]
pub struct PostStore {
    posts: RwLock<Vec<Post>>,
}

impl PostStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self {
            posts: RwLock::new(Vec::new()),
        }
    }

    /// Create a store holding the single demo post.
    pub fn seeded() -> Self {
        Self::with_posts([Post::new(SEED_AUTHOR, SEED_COMMENT)])
    }

    /// Create a store pre-populated with `posts`, in iteration order.
    pub fn with_posts(posts: impl IntoIterator<Item = Post>) -> Self {
        Self {
            posts: RwLock::new(posts.into_iter().collect()),
        }
    }

    /// Snapshot of every post, oldest first.
    pub fn list_posts(&self) -> Vec<Post> {
        self.posts.read().clone()
    }

    /// Validate and append a post, returning the stored copy.
    ///
    /// A rejected post leaves the store untouched.
    pub fn add_post(&self, author: impl Into<String>, comment: impl Into<String>) -> Result<Post> {
        self.add_post_with(author, comment, |_| ()).map(|(post, ())| post)
    }

    /// Like [`add_post`](Self::add_post), but runs `on_append` while the write
    /// lock is still held.
    ///
    /// Concurrent appends run their callbacks in store order, so anything
    /// published from `on_append` is observed in the same order as
    /// [`list_posts`](Self::list_posts). The callback must not block or touch
    /// this store. It is not run for a rejected post.
    pub fn add_post_with<R>(
        &self,
        author: impl Into<String>,
        comment: impl Into<String>,
        on_append: impl FnOnce(&Post) -> R,
    ) -> Result<(Post, R)> {
        let post = Post::new(author, comment);
        post.validate()?;

        let (total, output) = {
            let mut posts = self.posts.write();
            posts.push(post.clone());
            (posts.len(), on_append(&post))
        };

        tracing::debug!(author = %post.author, total, "post appended");

        Ok((post, output))
    }

    /// Number of stored posts.
    pub fn len(&self) -> usize {
        self.posts.read().len()
    }

    /// Whether the store holds no posts.
    pub fn is_empty(&self) -> bool {
        self.posts.read().is_empty()
    }
}

impl Default for PostStore {
    fn default() -> Self {
        Self::new()
    }
}

/// Shared post store handle.
pub type SharedPostStore = Arc<PostStore>;
