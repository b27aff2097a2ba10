//! Diesel schema for task persistence.

diesel::table! {
    /// Work items.
    tasks (id) {
        /// Storage-assigned identifier.
        id -> Int8,
        /// Task title.
        #[max_length = 200]
        title -> Varchar,
        /// Completion flag.
        is_completed -> Bool,
        /// Secondary classification value.
        step -> Int4,
        /// Creation timestamp.
        created_at -> Timestamptz,
        /// Optional category reference; `NULL` or `0` means uncategorized.
        category_id -> Nullable<Int8>,
    }
}
