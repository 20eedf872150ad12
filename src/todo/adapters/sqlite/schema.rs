//! Diesel schema for todo persistence.

diesel::table! {
    /// Todo records.
    todos (id) {
        /// Store-assigned key.
        id -> BigInt,
        /// Immutable UUID token, unique across rows.
        unique_id -> Text,
        /// Title.
        title -> Text,
        /// Optional rich-text description.
        description -> Nullable<Text>,
        /// Workflow status. Nullable in databases created by older releases.
        status -> Nullable<Text>,
        /// Priority. Nullable when the column was added to an older table.
        priority -> Nullable<Text>,
        /// Target completion date.
        target_date -> Nullable<Date>,
        /// Planned first working day.
        start_date -> Nullable<Date>,
        /// Planned last working day.
        end_date -> Nullable<Date>,
        /// Creation timestamp (UTC).
        created_at -> Timestamp,
        /// Latest modification timestamp (UTC).
        updated_at -> Timestamp,
    }
}
