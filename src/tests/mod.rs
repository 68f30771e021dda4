/// Helper macro to snapshot an error document with id redaction.
/// Error ids are fresh v4 UUIDs, so they are masked to keep snapshots stable.
macro_rules! snapshot_errors {
    ($errors:expr, @$snapshot:literal) => {{
        let mut settings = insta::Settings::clone_current();
        settings.add_redaction(".errors[].id", "[uuid]");
        settings.bind(|| {
            insta::assert_json_snapshot!($errors, @$snapshot);
        });
    }};
}
