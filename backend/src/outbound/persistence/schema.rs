//! Diesel table definitions for the PostgreSQL schema.
//!
//! These definitions must match `backend/migrations` exactly.

diesel::table! {
    /// Registered accounts.
    users (id) {
        id -> Int8,
        /// Unique (`users_email_key`).
        email -> Varchar,
        /// Encoded by the password hasher adapter.
        password_hash -> Text,
        created_at -> Timestamptz,
    }
}

diesel::table! {
    /// Server-side sessions. Rows cascade away with their user.
    sessions (session_key) {
        session_key -> Varchar,
        user_id -> Int8,
        created_at -> Timestamptz,
    }
}

diesel::table! {
    /// Content-addressed drawings. The primary key constraint is
    /// `immutable_drawings_pkey`.
    immutable_drawings (short_key) {
        short_key -> Varchar,
        /// Full SHA-512 hex digest of `data`.
        content_digest -> Varchar,
        data -> Text,
        created_at -> Timestamptz,
        hits -> Int8,
    }
}

diesel::table! {
    /// Owner-scoped drawings.
    mutable_drawings (id) {
        id -> Int8,
        owner_id -> Int8,
        name -> Varchar,
        data -> Text,
        created_at -> Timestamptz,
    }
}

diesel::joinable!(sessions -> users (user_id));
diesel::joinable!(mutable_drawings -> users (owner_id));

diesel::allow_tables_to_appear_in_same_query!(users, sessions, immutable_drawings, mutable_drawings);
