/// Which part of the request line a parser is filling.
///
/// States advance strictly in order; `Done` is terminal and ignores all
/// further input.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParseState {
    ParsingMethod,
    ParsingPath,
    ParsingProtocol,
    Done,
}

/// A parsed request line.
///
/// Built incrementally by [`crate::http::parser::RequestParser`] across one
/// or more byte chunks; once the parser reports `Done` the record no longer
/// changes. Fields an unfinished request never reached stay empty.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Request {
    /// The request method (e.g. "GET")
    pub method: String,
    /// The request path (e.g. "/scream")
    pub path: String,
    /// The protocol version (e.g. "HTTP/1.1")
    pub protocol: String,
}
