//! Diesel table definitions for the PostgreSQL schema.
//!
//! These definitions must match the database migrations exactly. When a
//! migration changes the schema, regenerate them with `diesel print-schema`
//! or update them by hand.

diesel::table! {
    /// Author profiles.
    users (id) {
        /// Primary key: UUID v4 identifier.
        id -> Uuid,
        /// Display name stamped on posts and comments.
        name -> Varchar,
        /// Avatar reference (URL or empty).
        avatar -> Text,
        /// Record creation timestamp.
        created_at -> Timestamptz,
    }
}

diesel::table! {
    /// Posts with their engagement embedded as JSONB documents.
    ///
    /// `likes` and `comments` are arrays ordered most-recent first, so one
    /// row update persists a whole engagement change atomically.
    posts (id) {
        id -> Uuid,
        /// Author; references `users.id`.
        user_id -> Uuid,
        /// Author display name captured at creation.
        name -> Varchar,
        /// Author avatar captured at creation.
        avatar -> Text,
        text -> Text,
        /// `[{"user": uuid}]`
        likes -> Jsonb,
        /// `[{"id", "user", "name", "avatar", "text", "date"}]`
        comments -> Jsonb,
        /// Optimistic-concurrency revision.
        revision -> Int4,
        created_at -> Timestamptz,
    }
}

diesel::joinable!(posts -> users (user_id));
diesel::allow_tables_to_appear_in_same_query!(posts, users);
