//! Diesel table definitions for the PostgreSQL schema.
//!
//! These definitions must match the database migrations exactly. They are
//! used by Diesel for compile-time query validation and type-safe SQL
//! generation.

diesel::table! {
    /// Registered users.
    users (id) {
        /// Primary key, assigned by the database sequence.
        id -> Int4,
        /// Display name (max 100 characters).
        name -> Varchar,
        /// Unique email address (max 254 characters).
        email -> Varchar,
        /// Age in years, constrained to 1..=150.
        age -> Int4,
        /// Record creation timestamp.
        created_at -> Timestamptz,
        /// Last modification timestamp.
        updated_at -> Timestamptz,
    }
}

diesel::table! {
    /// Orders owned by users.
    orders (id) {
        /// Primary key, assigned by the database sequence.
        id -> Int4,
        /// Order title (max 200 characters).
        title -> Varchar,
        /// Free-form description.
        description -> Text,
        /// Owning user; deleting the user cascades here.
        user_id -> Int4,
        /// Record creation timestamp.
        created_at -> Timestamptz,
        /// Last modification timestamp.
        updated_at -> Timestamptz,
    }
}

diesel::joinable!(orders -> users (user_id));

diesel::allow_tables_to_appear_in_same_query!(orders, users);
