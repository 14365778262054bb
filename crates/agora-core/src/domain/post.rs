use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::{Comment, Like};

/// Post entity - a short text published by a user.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Post {
    pub id: Uuid,
    pub author_id: Uuid,
    pub body: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Post {
    /// Create a new post.
    pub fn new(author_id: Uuid, body: String) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            author_id,
            body,
            created_at: now,
            updated_at: now,
        }
    }
}

/// A post together with the comments and likes that reference it.
///
/// Both collections are derived from the `post_id` of the child records
/// rather than stored on the post.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PostDetail {
    pub post: Post,
    pub comments: Vec<Comment>,
    pub likes: Vec<Like>,
}

impl PostDetail {
    pub fn like_count(&self) -> usize {
        self.likes.len()
    }

    pub fn comment_count(&self) -> usize {
        self.comments.len()
    }

    pub fn is_liked_by(&self, user_id: Uuid) -> bool {
        self.likes.iter().any(|like| like.author_id == user_id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_counts_and_liked_by() {
        let author = Uuid::new_v4();
        let fan = Uuid::new_v4();
        let post = Post::new(author, "hello".into());
        let detail = PostDetail {
            comments: vec![Comment::new(post.id, author, "first".into())],
            likes: vec![Like::new(post.id, fan)],
            post,
        };

        assert_eq!(detail.like_count(), 1);
        assert_eq!(detail.comment_count(), 1);
        assert!(detail.is_liked_by(fan));
        assert!(!detail.is_liked_by(author));
    }
}
