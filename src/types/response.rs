//! The response state handed over by the surrounding framework, and the
//! response the core hands back.

use std::fmt::Display;

use crate::error::DocumentError;

use super::error_object::ErrorFields;

/// Media type of every error body.
pub const JSONAPI_MEDIA_TYPE: &str = "application/vnd.api+json";

/// Media type of the fixed boundary messages for malformed or unserializable bodies.
pub const PLAIN_TEXT_MEDIA_TYPE: &str = "text/plain;charset=utf-8";

/// Known shapes of a response body at the time an error is being rendered.
#[derive(Debug, Clone, Default, PartialEq)]
pub enum ResponseBody {
    #[default]
    Empty,
    /// Already a normalized error; passed through as-is.
    Structured(ErrorFields),
    /// One or more plain detail strings; the first one is used.
    PlainDetail(Vec<String>),
    RawText(String),
}

impl ResponseBody {
    /// The first textual value of the body, if it has one.
    pub fn first_detail(&self) -> Option<&str> {
        match self {
            ResponseBody::PlainDetail(details) => details.first().map(String::as_str),
            ResponseBody::RawText(text) => Some(text.as_str()),
            ResponseBody::Empty | ResponseBody::Structured(_) => None,
        }
    }
}

impl From<&str> for ResponseBody {
    fn from(value: &str) -> Self {
        ResponseBody::RawText(value.to_string())
    }
}

impl From<Vec<String>> for ResponseBody {
    fn from(value: Vec<String>) -> Self {
        ResponseBody::PlainDetail(value)
    }
}

impl From<ErrorFields> for ResponseBody {
    fn from(value: ErrorFields) -> Self {
        ResponseBody::Structured(value)
    }
}

/// Explicit failure context for one request: status, body and captured error.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ResponseContext {
    status: Option<u16>,
    body: ResponseBody,
    error: Option<String>,
}

impl ResponseContext {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_status(mut self, status: u16) -> Self {
        self.status = Some(status);
        self
    }

    pub fn with_body(mut self, body: impl Into<ResponseBody>) -> Self {
        self.body = body.into();
        self
    }

    /// Record a failure caught upstream. Only its message is kept.
    pub fn with_error(mut self, error: impl Display) -> Self {
        self.error = Some(error.to_string());
        self
    }

    pub fn status(&self) -> Option<u16> {
        self.status
    }

    pub fn body(&self) -> &ResponseBody {
        &self.body
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub fn is_not_found(&self) -> bool {
        self.status == Some(404)
    }
}

/// A rendered response: status, content type and optional body.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Response {
    pub status: u16,
    pub content_type: Option<&'static str>,
    pub body: Option<String>,
}

impl Response {
    /// An empty successful response.
    pub fn no_content() -> Self {
        Response {
            status: 204,
            content_type: None,
            body: None,
        }
    }

    pub fn is_no_content(&self) -> bool {
        self.status == 204 && self.body.is_none()
    }
}

impl From<DocumentError> for Response {
    fn from(err: DocumentError) -> Self {
        Response {
            status: err.status(),
            content_type: Some(PLAIN_TEXT_MEDIA_TYPE),
            body: Some(err.public_message().to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::MALFORMED_INPUT_MESSAGE;

    #[test]
    fn test_first_detail() {
        assert_eq!(ResponseBody::from("oops").first_detail(), Some("oops"));
        assert_eq!(
            ResponseBody::from(vec!["a".to_string(), "b".to_string()]).first_detail(),
            Some("a")
        );
        assert_eq!(ResponseBody::PlainDetail(vec![]).first_detail(), None);
        assert_eq!(ResponseBody::Empty.first_detail(), None);
    }

    #[test]
    fn test_document_error_response() {
        let response = Response::from(DocumentError::MalformedInput("eof".to_string()));
        assert_eq!(response.status, 400);
        assert_eq!(response.body.as_deref(), Some(MALFORMED_INPUT_MESSAGE));
    }

    #[test]
    fn test_context_builder() {
        let ctx = ResponseContext::new()
            .with_status(404)
            .with_body("missing")
            .with_error("db down");
        assert!(ctx.is_not_found());
        assert_eq!(ctx.error(), Some("db down"));
        assert_eq!(ctx.body().first_detail(), Some("missing"));
    }
}
