//! Diesel schema for experience persistence.

diesel::table! {
    /// Experience journal entries.
    experiences (id) {
        /// Store-assigned key.
        id -> BigInt,
        /// Title.
        title -> Text,
        /// Free-form content.
        content -> Nullable<Text>,
        /// Raw comma-separated tags.
        tags -> Nullable<Text>,
        /// Category label.
        category -> Nullable<Text>,
        /// Situational context.
        context -> Nullable<Text>,
        /// Creation timestamp (UTC).
        created_at -> Timestamp,
        /// Latest modification timestamp (UTC).
        updated_at -> Timestamp,
    }
}
