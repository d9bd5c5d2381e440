//! Posts and their engagement: likes and comments.
//!
//! A [`Post`] owns its likes and comments and persists them atomically with
//! itself. Both sequences are ordered most-recent first: new entries are
//! inserted at index 0. The aggregate enforces the engagement rules:
//!
//! - at most one [`Like`] per user;
//! - comment identifiers are unique within a post;
//! - only a comment's author may remove it.
//!
//! Rule violations are reported as [`EngagementError`]; services translate
//! them into domain [`Error`](super::Error)s.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use uuid::Uuid;

use super::{AuthorProfile, UserId};

/// Stable post identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct PostId(Uuid);

impl PostId {
    /// Wrap an existing UUID.
    pub fn from_uuid(uuid: Uuid) -> Self {
        Self(uuid)
    }

    /// Generate a fresh identifier.
    pub fn random() -> Self {
        Self(Uuid::new_v4())
    }

    /// Access the underlying UUID.
    pub fn as_uuid(&self) -> &Uuid {
        &self.0
    }
}

impl fmt::Display for PostId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for PostId {
    type Err = uuid::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self(Uuid::parse_str(s)?))
    }
}

/// Comment identifier, unique within its post.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct CommentId(Uuid);

impl CommentId {
    /// Wrap an existing UUID.
    pub fn from_uuid(uuid: Uuid) -> Self {
        Self(uuid)
    }

    /// Generate a fresh identifier.
    pub fn random() -> Self {
        Self(Uuid::new_v4())
    }

    /// Access the underlying UUID.
    pub fn as_uuid(&self) -> &Uuid {
        &self.0
    }
}

impl fmt::Display for CommentId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for CommentId {
    type Err = uuid::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self(Uuid::parse_str(s)?))
    }
}

/// Validation errors for post and comment bodies.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum PostTextError {
    /// The body was empty or whitespace only.
    #[error("Text is required.")]
    Empty,
}

/// Non-empty body text of a post or comment.
///
/// Surrounding whitespace is preserved; only the emptiness check trims.
///
/// # Examples
/// ```
/// use postboard::domain::PostText;
///
/// assert!(PostText::new("hello").is_ok());
/// assert!(PostText::new("   ").is_err());
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PostText(String);

impl PostText {
    /// Validate and wrap body text.
    pub fn new(text: impl Into<String>) -> Result<Self, PostTextError> {
        let text = text.into();
        if text.trim().is_empty() {
            return Err(PostTextError::Empty);
        }
        Ok(Self(text))
    }

    /// Borrow the text.
    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }
}

impl AsRef<str> for PostText {
    fn as_ref(&self) -> &str {
        self.as_str()
    }
}

impl From<PostText> for String {
    fn from(value: PostText) -> Self {
        value.0
    }
}

/// A user's approval marker on a post.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Like {
    /// The user who liked the post.
    pub user_id: UserId,
}

/// A reply attached to a post.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Comment {
    /// Identifier unique within the owning post.
    pub id: CommentId,
    /// The comment's author; the only user allowed to remove it.
    pub author_id: UserId,
    /// Author display name captured when the comment was written.
    pub author_name: String,
    /// Author avatar reference captured when the comment was written.
    pub author_avatar: String,
    /// Comment body.
    pub text: PostText,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
}

impl Comment {
    /// Build a new comment with a fresh identifier.
    pub fn new(
        author_id: UserId,
        author: &AuthorProfile,
        text: PostText,
        created_at: DateTime<Utc>,
    ) -> Self {
        Self {
            id: CommentId::random(),
            author_id,
            author_name: author.name().to_owned(),
            author_avatar: author.avatar().to_owned(),
            text,
            created_at,
        }
    }
}

/// Engagement rule violations raised by [`Post`] mutations.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum EngagementError {
    /// The user already has a like on this post.
    #[error("Post already liked.")]
    AlreadyLiked,
    /// The user has no like on this post to remove.
    #[error("Post has not been liked yet.")]
    NotLiked,
    /// No comment with the requested identifier exists on this post.
    #[error("Comment not found.")]
    CommentNotFound,
    /// The acting user did not write the comment.
    #[error("User not authorized.")]
    NotCommentAuthor,
}

/// A user-authored post with its likes and comments.
///
/// Posts use optimistic concurrency via `revision`: new posts start at 1 and
/// every persisted mutation increments it.
///
/// # Examples
/// ```
/// use chrono::Utc;
/// use postboard::domain::{AuthorProfile, Post, PostId, PostText, UserId};
///
/// let author = UserId::random();
/// let profile = AuthorProfile::new("Alice", "a.png").expect("profile");
/// let text = PostText::new("hello").expect("text");
/// let mut post = Post::new(PostId::random(), author.clone(), &profile, text, Utc::now());
///
/// post.add_like(author.clone()).expect("first like");
/// assert!(post.add_like(author).is_err());
/// assert_eq!(post.likes().len(), 1);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Post {
    /// Unique identifier.
    pub id: PostId,
    /// The user who wrote the post.
    pub author_id: UserId,
    /// Author display name captured at creation.
    pub author_name: String,
    /// Author avatar reference captured at creation.
    pub author_avatar: String,
    /// Post body.
    pub text: PostText,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Revision number for optimistic concurrency.
    pub revision: u32,
    likes: Vec<Like>,
    comments: Vec<Comment>,
}

impl Post {
    /// Create a new post with no engagement at revision 1.
    pub fn new(
        id: PostId,
        author_id: UserId,
        author: &AuthorProfile,
        text: PostText,
        created_at: DateTime<Utc>,
    ) -> Self {
        Self {
            id,
            author_id,
            author_name: author.name().to_owned(),
            author_avatar: author.avatar().to_owned(),
            text,
            created_at,
            revision: 1,
            likes: Vec::new(),
            comments: Vec::new(),
        }
    }

    /// Replace the engagement sequences, as read back from storage.
    ///
    /// Both sequences must already be ordered most-recent first.
    pub fn with_engagement(mut self, likes: Vec<Like>, comments: Vec<Comment>) -> Self {
        self.likes = likes;
        self.comments = comments;
        self
    }

    /// Likes, most-recent first.
    pub fn likes(&self) -> &[Like] {
        &self.likes
    }

    /// Comments, most-recent first.
    pub fn comments(&self) -> &[Comment] {
        &self.comments
    }

    /// Whether `user_id` currently likes this post.
    pub fn is_liked_by(&self, user_id: &UserId) -> bool {
        self.likes.iter().any(|like| &like.user_id == user_id)
    }

    /// Find a comment by identifier.
    pub fn comment(&self, comment_id: &CommentId) -> Option<&Comment> {
        self.comments.iter().find(|comment| &comment.id == comment_id)
    }

    /// Prepend a like for `user_id`.
    ///
    /// # Errors
    /// [`EngagementError::AlreadyLiked`] if the user already likes the post;
    /// the likes are left untouched.
    pub fn add_like(&mut self, user_id: UserId) -> Result<(), EngagementError> {
        if self.is_liked_by(&user_id) {
            return Err(EngagementError::AlreadyLiked);
        }
        self.likes.insert(0, Like { user_id });
        Ok(())
    }

    /// Remove the like held by `user_id`.
    ///
    /// # Errors
    /// [`EngagementError::NotLiked`] if the user has no like on the post.
    pub fn remove_like(&mut self, user_id: &UserId) -> Result<Like, EngagementError> {
        let index = self
            .likes
            .iter()
            .position(|like| &like.user_id == user_id)
            .ok_or(EngagementError::NotLiked)?;
        Ok(self.likes.remove(index))
    }

    /// Prepend a comment.
    pub fn add_comment(&mut self, comment: Comment) {
        self.comments.insert(0, comment);
    }

    /// Remove a comment on behalf of `user_id`.
    ///
    /// # Errors
    /// - [`EngagementError::CommentNotFound`] if no comment has `comment_id`.
    /// - [`EngagementError::NotCommentAuthor`] if `user_id` did not write it.
    pub fn remove_comment(
        &mut self,
        comment_id: &CommentId,
        user_id: &UserId,
    ) -> Result<Comment, EngagementError> {
        let index = self
            .comments
            .iter()
            .position(|comment| &comment.id == comment_id)
            .ok_or(EngagementError::CommentNotFound)?;
        let owned_by_user = self
            .comments
            .get(index)
            .is_some_and(|comment| &comment.author_id == user_id);
        if !owned_by_user {
            return Err(EngagementError::NotCommentAuthor);
        }
        Ok(self.comments.remove(index))
    }

    /// Advance the revision ahead of a save, returning the revision the
    /// store is expected to hold.
    pub fn next_revision(&mut self) -> u32 {
        let expected = self.revision;
        self.revision = expected.saturating_add(1);
        expected
    }
}
