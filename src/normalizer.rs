use strum_macros::{AsRefStr, Display};

use crate::types::{ErrorFields, ResponseBody, ResponseContext};

/// The framework's stock 404 body. It carries no information and is dropped.
pub const NOT_FOUND_PLACEHOLDER: &str = "<h1>Not Found</h1>";

/// Titles assigned by the normalizer itself.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, AsRefStr)]
pub enum ErrorTitle {
    #[strum(serialize = "Not Found")]
    NotFound,
    #[strum(serialize = "Unknown Error")]
    UnknownError,
}

/// Reduce a failed response state to one set of error fields.
///
/// A structured body is already normalized and is returned unchanged.
/// Otherwise the first matching branch wins:
/// 1. a 404 with a textual body: title "Not Found", detail from the body
///    unless it is the stock placeholder;
/// 2. a captured error: title "Unknown Error", detail from its message;
/// 3. a textual body: detail only.
pub fn normalize(ctx: &ResponseContext) -> ErrorFields {
    if let ResponseBody::Structured(fields) = ctx.body() {
        return fields.clone();
    }

    let first_detail = ctx.body().first_detail();

    match (ctx.is_not_found(), first_detail, ctx.error()) {
        (true, Some(detail), _) => ErrorFields {
            title: Some(ErrorTitle::NotFound.to_string()),
            detail: (detail != NOT_FOUND_PLACEHOLDER).then(|| detail.to_string()),
            source: None,
        },
        (_, _, Some(message)) => ErrorFields {
            title: Some(ErrorTitle::UnknownError.to_string()),
            detail: Some(message.to_string()),
            source: None,
        },
        (_, Some(detail), None) => ErrorFields {
            detail: Some(detail.to_string()),
            ..Default::default()
        },
        (_, None, None) => ErrorFields::default(),
    }
}
