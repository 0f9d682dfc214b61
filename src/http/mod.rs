//! Request-line parsing and page serving.
//!
//! The HTTP layer is deliberately small: the server speaks just enough of
//! the protocol to read one request line and answer it.
//!
//! - **`request`**: the parsed request record and parser states
//! - **`parser`**: the incremental request-line state machine
//! - **`content`**: fixed-preamble page serving and the not-found page
//!
//! # Parser state machine
//!
//! ```text
//!   ParsingMethod ──space──▶ ParsingPath ──space──▶ ParsingProtocol
//!                                                         │
//!                                                      newline
//!                                                         ▼
//!                                                       Done
//! ```
//!
//! A field hitting its length cap forces the same transition without the
//! delimiter. Input arrives in receive-buffer-sized chunks that need not
//! align with field boundaries; the parser keeps its state and cursor
//! across chunks.

pub mod content;
pub mod parser;
pub mod request;
