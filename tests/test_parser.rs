use proda::http::parser::{MAX_PATH_LEN, MAX_PROTOCOL_LEN, RequestParser};
use proda::http::request::ParseState;

#[test]
fn test_parse_whole_line() {
    let mut parser = RequestParser::new();
    parser.feed(b"GET /scream HTTP/1.1\n");

    assert!(parser.is_done());
    let req = parser.finish();
    assert_eq!(req.method, "GET");
    assert_eq!(req.path, "/scream");
    assert_eq!(req.protocol, "HTTP/1.1");
}

#[test]
fn test_parse_one_byte_at_a_time() {
    let line = b"GET /scream HTTP/1.1\n";
    let mut parser = RequestParser::new();
    for byte in line {
        parser.feed(std::slice::from_ref(byte));
    }

    assert!(parser.is_done());
    let req = parser.finish();
    assert_eq!(req.method, "GET");
    assert_eq!(req.path, "/scream");
    assert_eq!(req.protocol, "HTTP/1.1");
}

#[test]
fn test_parse_split_boundary_invariance() {
    let line: &[u8] = b"GET /scream HTTP/1.1\n";

    let mut whole = RequestParser::new();
    whole.feed(line);
    let expected = whole.finish();

    // Every possible two-chunk split must give the same record
    for split in 0..line.len() {
        let mut parser = RequestParser::new();
        parser.feed(&line[..split]);
        parser.feed(&line[split..]);
        assert!(parser.is_done(), "split at {} not done", split);
        assert_eq!(parser.finish(), expected, "split at {} differs", split);
    }
}

#[test]
fn test_parse_split_mid_method() {
    let mut parser = RequestParser::new();
    parser.feed(b"GE");
    assert_eq!(parser.state(), ParseState::ParsingMethod);
    parser.feed(b"T /scr");
    assert_eq!(parser.state(), ParseState::ParsingPath);
    parser.feed(b"eam HTTP/1.1\n");

    let req = parser.finish();
    assert_eq!(req.method, "GET");
    assert_eq!(req.path, "/scream");
    assert_eq!(req.protocol, "HTTP/1.1");
}

#[test]
fn test_parse_states_advance_in_order() {
    let mut parser = RequestParser::new();
    assert_eq!(parser.state(), ParseState::ParsingMethod);
    parser.feed(b"GET ");
    assert_eq!(parser.state(), ParseState::ParsingPath);
    parser.feed(b"/ ");
    assert_eq!(parser.state(), ParseState::ParsingProtocol);
    parser.feed(b"HTTP/1.1\n");
    assert_eq!(parser.state(), ParseState::Done);
}

#[test]
fn test_parse_done_ignores_further_input() {
    let mut parser = RequestParser::new();
    parser.feed(b"GET / HTTP/1.1\nHost: example.com\nmore garbage");

    assert!(parser.is_done());
    let req = parser.finish();
    assert_eq!(req.method, "GET");
    assert_eq!(req.path, "/");
    assert_eq!(req.protocol, "HTTP/1.1");
}

#[test]
fn test_parse_method_truncated_at_cap() {
    // 20-byte method: 15 bytes are kept, the byte that hits the cap is
    // dropped, and the overflow spills into the path field.
    let mut parser = RequestParser::new();
    parser.feed(b"AAAAAAAAAAAAAAAAAAAA /x HTTP/1.1\n");

    let req = parser.finish();
    assert_eq!(req.method, "A".repeat(15));
    assert_eq!(req.path, "AAAA");
    assert_eq!(req.protocol, "/x HTTP/1.1");
}

#[test]
fn test_parse_path_truncated_at_cap() {
    let long_path = "/".to_string() + &"a".repeat(3000);
    let line = format!("GET {} HTTP/1.1\n", long_path);
    let mut parser = RequestParser::new();
    parser.feed(line.as_bytes());

    assert!(parser.is_done());
    let req = parser.finish();
    assert_eq!(req.path.len(), MAX_PATH_LEN);
    assert_eq!(req.path, long_path[..MAX_PATH_LEN]);
    // The spilled tail of the path fills the protocol to its own cap
    assert_eq!(req.protocol, "a".repeat(MAX_PROTOCOL_LEN));
}

#[test]
fn test_parse_finish_commits_partial_field() {
    let mut parser = RequestParser::new();
    parser.feed(b"GET /scr");

    assert!(!parser.is_done());
    let req = parser.finish();
    assert_eq!(req.method, "GET");
    assert_eq!(req.path, "/scr");
    assert_eq!(req.protocol, "");
}

#[test]
fn test_parse_empty_chunk_is_noop() {
    let mut parser = RequestParser::new();
    parser.feed(b"");
    assert_eq!(parser.state(), ParseState::ParsingMethod);

    parser.feed(b"GET / HTTP/1.1\n");
    assert!(parser.is_done());
}
