//! Diesel table definitions.

diesel::table! {
    documents (id) {
        id -> Text,
        title -> Text,
        original_url -> Text,
        oeil_link -> Nullable<Text>,
        status -> Text,
        theme_source -> Text,
        blob_storage_url -> Text,
        blob_filename -> Text,
        scraped_at -> Text,
    }
}
