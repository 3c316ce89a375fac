use serde::{Deserialize, Serialize};

use super::base::{check_emoji, Cuid, Timestamp};
use super::user::User;
use super::validate::{ensure_eq, ensure_not_after, Validate};
use crate::error::SchemaError;

/// What a comment is attached to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum CommentEntityType {
    Market,
    Comment,
    List,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Reaction {
    pub id: Cuid,
    /// `:emoji_code:`
    pub emoji: String,
    pub user_id: Cuid,
    pub comment_id: Cuid,
    pub user: User,
}

impl Validate for Reaction {
    fn validate(&self) -> Result<(), SchemaError> {
        check_emoji(&self.emoji)?;
        self.user.validate()?;
        ensure_eq("user.id", &self.user_id, &self.user.id)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Comment {
    pub id: Cuid,
    pub content: String,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
    pub edited: bool,
    pub author_id: Cuid,
    pub parent_id: Option<Cuid>,
    pub hidden: bool,
    pub entity_id: Cuid,
    pub entity_type: CommentEntityType,
    pub author: User,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reactions: Option<Vec<Reaction>>,
}

impl Comment {
    #[must_use]
    pub fn reactions(&self) -> &[Reaction] {
        self.reactions.as_deref().unwrap_or_default()
    }

    #[must_use]
    pub fn is_reply(&self) -> bool {
        self.parent_id.is_some()
    }

    /// Reaction counts keyed by emoji, in first-seen order.
    #[must_use]
    pub fn reaction_counts(&self) -> Vec<(&str, usize)> {
        let mut counts: Vec<(&str, usize)> = Vec::new();
        for reaction in self.reactions() {
            match counts.iter_mut().find(|(emoji, _)| *emoji == reaction.emoji) {
                Some((_, n)) => *n += 1,
                None => counts.push((reaction.emoji.as_str(), 1)),
            }
        }
        counts
    }
}

impl Validate for Comment {
    fn validate(&self) -> Result<(), SchemaError> {
        ensure_not_after("createdAt", &self.created_at, "updatedAt", &self.updated_at)?;
        self.author.validate()?;
        ensure_eq("author.id", &self.author_id, &self.author.id)?;

        if self.parent_id.as_ref() == Some(&self.id) {
            return Err(SchemaError::Inconsistent(format!(
                "comment {} is its own parent",
                self.id
            )));
        }

        for reaction in self.reactions() {
            reaction.validate()?;
            ensure_eq("reactions[].commentId", &self.id, &reaction.comment_id)?;
        }
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateComment {
    pub content: String,
    pub entity_type: CommentEntityType,
    pub entity_id: Cuid,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub parent_id: Option<Cuid>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateComment {
    pub content: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateReaction {
    pub emoji: String,
}
