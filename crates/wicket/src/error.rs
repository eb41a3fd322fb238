use thiserror::Error;

/// Errors produced by the framework.
///
/// Registration and startup errors are meant to be fatal; binding errors are
/// per-request and normally answered with a 4xx by the handler.
#[derive(Debug, Error)]
pub enum Error {
    /// Route registration failed (conflict or malformed pattern).
    #[error(transparent)]
    Route(#[from] wicket_router::RouteError),

    /// Request body has a content type no binder understands.
    #[error("unsupported content type: {0}")]
    UnsupportedContentType(String),

    /// JSON body binding failed.
    #[error("JSON binding error: {0}")]
    Json(#[from] serde_json::Error),

    /// XML body binding failed.
    #[error("XML binding error: {0}")]
    Xml(#[from] quick_xml::DeError),

    /// Logging initialization failed (subscriber already set).
    #[error("logging init error: {0}")]
    LoggingInit(String),

    /// Socket bind/accept error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}
