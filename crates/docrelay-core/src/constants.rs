//! Application-wide constants.

/// Upload ceiling for documents: 10 MiB.
pub const MAX_DOCUMENT_SIZE_BYTES: u64 = 10 * 1024 * 1024;

/// Client message for a request body over the server-wide limit.
pub const REQUEST_TOO_LARGE_MESSAGE: &str = "Request body too large";

/// Bytes per megabyte as used by the size formatter.
pub const BYTES_PER_MB: f64 = 1024.0 * 1024.0;

pub const MIME_PDF: &str = "application/pdf";
pub const MIME_DOC: &str = "application/msword";
pub const MIME_DOCX: &str =
    "application/vnd.openxmlformats-officedocument.wordprocessingml.document";
pub const MIME_TXT: &str = "text/plain";

/// MIME types accepted for upload (PDF, legacy Word, OOXML Word, plain text).
pub const ALLOWED_DOCUMENT_CONTENT_TYPES: [&str; 4] = [MIME_PDF, MIME_DOC, MIME_DOCX, MIME_TXT];

/// Questions offered on the analyze page.
pub const SUGGESTED_QUESTIONS: [&str; 4] = [
    "What are the main topics?",
    "Summarize key findings",
    "List requirements",
    "Technical specifications",
];

/// Export formats offered on the analyze page.
pub const EXPORT_FORMATS: [&str; 4] = ["PDF Report", "Word Document", "JSON Data", "Plain Text"];

/// Upstream path of the document analysis service.
pub const UPSTREAM_ANALYZE_PATH: &str = "/api/analyze";

/// Upstream path of the query service.
pub const UPSTREAM_QUERY_PATH: &str = "/api/query";

/// Multipart field carrying the uploaded document.
pub const FILE_FIELD: &str = "file";

/// Multipart field carrying the optional question.
pub const QUESTION_FIELD: &str = "question";

/// Form field carrying the requested export format.
pub const EXPORT_FIELD: &str = "export";
