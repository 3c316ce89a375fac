use std::ops::Deref;

use crate::client::PlayMoneyClient;
use crate::error::{PlayMoneyError, Result};
use crate::types::{
    check_emoji, Comment, CommentEntityType, CreateComment, CreateReaction, Reaction,
    UpdateComment,
};

/// `comments` collection.
#[derive(Debug, Clone, Copy)]
pub struct CommentResource<'a> {
    client: &'a PlayMoneyClient,
}

impl<'a> CommentResource<'a> {
    pub(crate) fn new(client: &'a PlayMoneyClient) -> Self {
        Self { client }
    }

    pub async fn get(&self, comment_id: &str) -> Result<CommentHandle> {
        let comment = self.client.get(&["comments", comment_id]).await?;
        Ok(self.attach(comment))
    }

    pub async fn create(&self, comment: &CreateComment) -> Result<CommentHandle> {
        let comment = self.client.post(&["comments"], comment).await?;
        Ok(self.attach(comment))
    }

    /// Replace the text of a comment.
    pub async fn edit(
        &self,
        comment_id: &str,
        content: impl Into<String>,
    ) -> Result<CommentHandle> {
        let body = UpdateComment {
            content: content.into(),
        };
        let comment = self.client.patch(&["comments", comment_id], &body).await?;
        Ok(self.attach(comment))
    }

    pub async fn delete(&self, comment_id: &str) -> Result<()> {
        self.client.delete(&["comments", comment_id]).await
    }

    /// Toggle `emoji` (`:name:`) on a comment.
    pub async fn react(&self, comment_id: &str, emoji: &str) -> Result<Reaction> {
        check_emoji(emoji).map_err(|e| PlayMoneyError::invalid_argument(e.to_string()))?;
        let body = CreateReaction {
            emoji: emoji.to_string(),
        };
        self.client
            .post(&["comments", comment_id, "reactions"], &body)
            .await
    }

    #[must_use]
    pub fn attach(&self, comment: Comment) -> CommentHandle {
        CommentHandle {
            client: self.client.clone(),
            comment,
        }
    }
}

#[derive(Debug, Clone)]
pub struct CommentHandle {
    client: PlayMoneyClient,
    comment: Comment,
}

impl Deref for CommentHandle {
    type Target = Comment;

    fn deref(&self) -> &Comment {
        &self.comment
    }
}

impl CommentHandle {
    #[must_use]
    pub fn into_inner(self) -> Comment {
        self.comment
    }

    pub async fn edit(&mut self, content: impl Into<String>) -> Result<()> {
        let edited = self
            .client
            .comments()
            .edit(self.comment.id.as_str(), content)
            .await?;
        self.comment = edited.into_inner();
        Ok(())
    }

    pub async fn delete(self) -> Result<()> {
        self.client
            .comments()
            .delete(self.comment.id.as_str())
            .await
    }

    pub async fn react(&self, emoji: &str) -> Result<Reaction> {
        self.client
            .comments()
            .react(self.comment.id.as_str(), emoji)
            .await
    }

    /// Reply in the same thread, on the same entity.
    pub async fn reply(&self, content: impl Into<String>) -> Result<CommentHandle> {
        let body = CreateComment {
            content: content.into(),
            entity_type: self.comment.entity_type,
            entity_id: self.comment.entity_id.clone(),
            parent_id: Some(self.comment.id.clone()),
        };
        self.client.comments().create(&body).await
    }

    #[must_use]
    pub fn is_on(&self, entity_type: CommentEntityType) -> bool {
        self.comment.entity_type == entity_type
    }
}
