//! Internal Diesel row structs. Never exposed outside the persistence module.

use chrono::{DateTime, Utc};
use diesel::prelude::*;

use super::schema::{immutable_drawings, mutable_drawings, sessions, users};

// ---------------------------------------------------------------------------
// Users
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = users)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct UserRow {
    pub id: i64,
    pub email: String,
}

#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = users)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct UserCredentialsRow {
    pub id: i64,
    pub password_hash: String,
}

#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = users)]
pub(crate) struct NewUserRow<'a> {
    pub email: &'a str,
    pub password_hash: &'a str,
}

// ---------------------------------------------------------------------------
// Sessions
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = sessions)]
pub(crate) struct NewSessionRow<'a> {
    pub session_key: &'a str,
    pub user_id: i64,
}

// ---------------------------------------------------------------------------
// Immutable drawings
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = immutable_drawings)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct ImmutableDrawingRow {
    pub short_key: String,
    pub data: String,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = immutable_drawings)]
pub(crate) struct NewImmutableDrawingRow<'a> {
    pub short_key: &'a str,
    pub content_digest: &'a str,
    pub data: &'a str,
}

// ---------------------------------------------------------------------------
// Mutable drawings
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = mutable_drawings)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct MutableDrawingRow {
    pub id: i64,
    pub owner_id: i64,
    pub name: String,
    pub data: String,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = mutable_drawings)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct MutableDrawingSummaryRow {
    pub id: i64,
    pub name: String,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = mutable_drawings)]
pub(crate) struct NewMutableDrawingRow<'a> {
    pub owner_id: i64,
    pub name: &'a str,
    pub data: &'a str,
}

/// Partial update; `None` fields are left out of the `SET` clause.
#[derive(Debug, Clone, AsChangeset)]
#[diesel(table_name = mutable_drawings)]
pub(crate) struct MutableDrawingChangeset<'a> {
    pub name: Option<&'a str>,
    pub data: Option<&'a str>,
}
