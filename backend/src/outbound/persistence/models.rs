//! Diesel row models for the persistence layer.
//!
//! These structs map directly to database tables and are internal to the
//! persistence adapter. Domain types are reconstituted from them in the
//! repository modules.

use chrono::{DateTime, Utc};
use diesel::prelude::*;
use serde_json::Value;
use uuid::Uuid;

use super::schema::{posts, users};

/// Row struct for reading author profiles.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = users)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct UserRow {
    pub name: String,
    pub avatar: String,
}

/// Row struct for reading posts.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = posts)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct PostRow {
    pub id: Uuid,
    pub user_id: Uuid,
    pub name: String,
    pub avatar: String,
    pub text: String,
    pub likes: Value,
    pub comments: Value,
    pub revision: i32,
    pub created_at: DateTime<Utc>,
}

/// Insertable struct for new posts.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = posts)]
pub(crate) struct NewPostRow<'a> {
    pub id: Uuid,
    pub user_id: Uuid,
    pub name: &'a str,
    pub avatar: &'a str,
    pub text: &'a str,
    pub likes: Value,
    pub comments: Value,
    pub revision: i32,
    pub created_at: DateTime<Utc>,
}

/// Changeset for engagement updates. Authorship and text never change.
#[derive(Debug, Clone, AsChangeset)]
#[diesel(table_name = posts)]
pub(crate) struct PostEngagementUpdate {
    pub likes: Value,
    pub comments: Value,
    pub revision: i32,
}
