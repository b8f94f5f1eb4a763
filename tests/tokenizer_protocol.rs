use std::io::Cursor;

use semparse_datagen::run_tokenizer_probe;
use semparse_datagen::tokenizer::{RemoteTokenizer, Tokenize};
use semparse_datagen::DatagenError;

#[test]
fn requests_are_newline_delimited_json_with_counter() {
    let responses = "{\"tokens\":[\"a\"]}\n{\"tokens\":[\"b\"]}\n{\"tokens\":[\"c\"]}\n";
    let mut sent = Vec::new();
    {
        let mut client =
            RemoteTokenizer::from_transport(Cursor::new(responses.as_bytes()), &mut sent);
        for utterance in ["one", "two", "three"] {
            client.tokenize("en", utterance).unwrap();
        }
    }
    let sent = String::from_utf8(sent).unwrap();
    let lines: Vec<&str> = sent.lines().collect();
    assert_eq!(lines.len(), 3);
    for (idx, line) in lines.iter().enumerate() {
        let request: serde_json::Value = serde_json::from_str(line).unwrap();
        assert_eq!(request["req"], idx as u64);
        assert_eq!(request["languageTag"], "en");
        assert!(request.get("expect").is_none());
    }
}

#[test]
fn closed_connection_is_fatal() {
    let mut client = RemoteTokenizer::from_transport(Cursor::new(&b""[..]), Vec::new());
    let err = client.tokenize("en", "anything").unwrap_err();
    assert!(matches!(err, DatagenError::TokenizerUnavailable { .. }));
}

#[test]
fn probe_echoes_raw_response_lines_and_forwards_expect() {
    let responses =
        "{\"tokens\":[\"hello\"]}\n{\"tokens\":[\"TIME_0\"],\"values\":{\"TIME_0\":\"5pm\"}}\n";
    let mut sent = Vec::new();
    let mut output = Vec::new();
    {
        let mut client =
            RemoteTokenizer::from_transport(Cursor::new(responses.as_bytes()), &mut sent);
        let input = "hello there\nexpect:TIME wake me at 5pm\n";
        run_tokenizer_probe(&mut client, "en", Cursor::new(input), &mut output).unwrap();
    }
    let output = String::from_utf8(output).unwrap();
    let lines: Vec<&str> = output.lines().collect();
    assert_eq!(lines.len(), 2);
    assert_eq!(lines[0], "{\"tokens\":[\"hello\"]}");
    assert!(lines[1].contains("TIME_0"));

    let sent = String::from_utf8(sent).unwrap();
    let requests: Vec<serde_json::Value> = sent
        .lines()
        .map(|line| serde_json::from_str(line).unwrap())
        .collect();
    assert_eq!(requests[0]["utterance"], "hello there");
    assert!(requests[0].get("expect").is_none());
    assert_eq!(requests[1]["expect"], "TIME");
    assert_eq!(requests[1]["utterance"], "wake me at 5pm");
}
