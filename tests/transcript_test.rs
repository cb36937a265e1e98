use tawau::domain::{Transcript, TranscriptSegment, WordSpan};

fn segment(index: u32, start: f64, end: f64, text: &str) -> TranscriptSegment {
    TranscriptSegment {
        index,
        start,
        end,
        text: text.to_string(),
        words: None,
    }
}

#[test]
fn given_engine_ordered_segments_when_projecting_text_then_trimmed_newline_join() {
    let transcript = Transcript {
        duration: 4.0,
        language: Some("en".to_string()),
        segments: vec![segment(0, 0.0, 2.0, " Hi "), segment(1, 2.0, 4.0, "there")],
    };

    assert_eq!(transcript.plain_text(), "Hi\nthere");
}

#[test]
fn given_transcript_when_serializing_then_keys_and_segment_order_match() {
    let transcript = Transcript {
        duration: 12.5,
        language: Some("en".to_string()),
        segments: vec![segment(0, 0.0, 2.0, " Hi "), segment(1, 2.0, 4.0, "there")],
    };

    let value = serde_json::to_value(&transcript).unwrap();

    assert_eq!(value["duration"], 12.5);
    assert_eq!(value["language"], "en");
    let segments = value["segments"].as_array().unwrap();
    assert_eq!(segments.len(), 2);
    assert_eq!(segments[0]["id"], 0);
    assert_eq!(segments[0]["text"], " Hi ");
    assert_eq!(segments[1]["id"], 1);
}

#[test]
fn given_segment_without_words_when_serializing_then_words_key_absent() {
    let transcript = Transcript {
        duration: 2.0,
        language: None,
        segments: vec![segment(0, 0.0, 2.0, "hello")],
    };

    let value = serde_json::to_value(&transcript).unwrap();

    assert!(value["segments"][0].get("words").is_none());
    assert_eq!(value["language"], serde_json::Value::Null);
}

#[test]
fn given_segment_with_words_when_serializing_then_word_spans_included_in_order() {
    let mut seg = segment(0, 0.0, 2.0, " Hi there");
    seg.words = Some(vec![
        WordSpan {
            word: "Hi".to_string(),
            start: 0.1,
            end: 0.3,
        },
        WordSpan {
            word: "there".to_string(),
            start: 0.4,
            end: 0.8,
        },
    ]);
    let transcript = Transcript {
        duration: 2.0,
        language: Some("en".to_string()),
        segments: vec![seg],
    };

    let value = serde_json::to_value(&transcript).unwrap();
    let words = value["segments"][0]["words"].as_array().unwrap();

    assert_eq!(words.len(), 2);
    assert_eq!(words[0]["word"], "Hi");
    assert_eq!(words[1]["start"], 0.4);
}
