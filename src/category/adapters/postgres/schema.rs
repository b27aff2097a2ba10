//! Diesel schema for category persistence.

diesel::table! {
    /// Work-item categories.
    categories (id) {
        /// Storage-assigned identifier.
        id -> Int8,
        /// Display name, unique by `LOWER(name)`.
        #[max_length = 100]
        name -> Varchar,
        /// Optional short code.
        code -> Nullable<Varchar>,
        /// Whether the category is offered for new tasks.
        is_active -> Bool,
    }
}
