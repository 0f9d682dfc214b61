use crate::http::request::{ParseState, Request};

/// Per-field caps; a field reaching its cap is cut off without its delimiter.
pub const MAX_METHOD_LEN: usize = 15;
pub const MAX_PATH_LEN: usize = 2047;
pub const MAX_PROTOCOL_LEN: usize = 15;

/// Incremental request-line parser.
///
/// Consumes byte chunks of any size, one byte at a time, and fills a
/// [`Request`] across calls; the transport may split the line anywhere. A
/// space ends the method and path fields, a newline ends the protocol field.
/// A field reaching its cap is cut short: the byte that hit the cap is
/// dropped and the parser moves to the next field, so the remainder of an
/// over-long field spills onward. Once `Done`, further input is ignored and
/// the caller is expected to stop feeding.
pub struct RequestParser {
    state: ParseState,
    field: Vec<u8>,
    request: Request,
}

impl RequestParser {
    pub fn new() -> Self {
        Self {
            state: ParseState::ParsingMethod,
            field: Vec::new(),
            request: Request::default(),
        }
    }

    pub fn state(&self) -> ParseState {
        self.state
    }

    pub fn is_done(&self) -> bool {
        self.state == ParseState::Done
    }

    /// The record as committed so far; the field currently being filled is
    /// not yet visible.
    pub fn request(&self) -> &Request {
        &self.request
    }

    /// Consumes the parser, committing any partially accumulated field so
    /// that a request cut off mid-line still carries what arrived.
    pub fn finish(mut self) -> Request {
        if self.state != ParseState::Done {
            self.commit();
        }
        self.request
    }

    pub fn feed(&mut self, chunk: &[u8]) {
        for &byte in chunk {
            match self.state {
                ParseState::ParsingMethod => {
                    if byte == b' ' || self.field.len() == MAX_METHOD_LEN {
                        self.advance();
                        continue;
                    }
                    self.field.push(byte);
                }
                ParseState::ParsingPath => {
                    if byte == b' ' || self.field.len() == MAX_PATH_LEN {
                        self.advance();
                        continue;
                    }
                    self.field.push(byte);
                }
                ParseState::ParsingProtocol => {
                    if byte == b'\n' || self.field.len() == MAX_PROTOCOL_LEN {
                        self.advance();
                        continue;
                    }
                    self.field.push(byte);
                }
                ParseState::Done => return,
            }
        }
    }

    /// Terminates the field being filled and writes it into its slot.
    fn commit(&mut self) {
        let text = String::from_utf8_lossy(&self.field).into_owned();
        match self.state {
            ParseState::ParsingMethod => self.request.method = text,
            ParseState::ParsingPath => self.request.path = text,
            ParseState::ParsingProtocol => self.request.protocol = text,
            ParseState::Done => {}
        }
        self.field.clear();
    }

    fn advance(&mut self) {
        self.commit();
        self.state = match self.state {
            ParseState::ParsingMethod => ParseState::ParsingPath,
            ParseState::ParsingPath => ParseState::ParsingProtocol,
            ParseState::ParsingProtocol | ParseState::Done => ParseState::Done,
        };
    }
}

impl Default for RequestParser {
    fn default() -> Self {
        Self::new()
    }
}
