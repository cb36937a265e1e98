use serde::{Deserialize, Serialize};

/// A single recognized word with its time span, when the engine provides
/// word-level timestamps.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WordSpan {
    pub word: String,
    pub start: f64,
    pub end: f64,
}

/// A contiguous span of recognized speech.
///
/// Segments keep the engine-assigned index and arrive in engine order;
/// nothing downstream re-sorts them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TranscriptSegment {
    #[serde(rename = "id")]
    pub index: u32,
    pub start: f64,
    pub end: f64,
    pub text: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub words: Option<Vec<WordSpan>>,
}

/// Fully materialized recognition output for one audio file.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Transcript {
    pub duration: f64,
    pub language: Option<String>,
    pub segments: Vec<TranscriptSegment>,
}

impl Transcript {
    /// Plain-text projection: the newline join of each segment's trimmed
    /// text, in segment order. This is the only place the text form is
    /// derived.
    pub fn plain_text(&self) -> String {
        self.segments
            .iter()
            .map(|s| s.text.trim())
            .collect::<Vec<_>>()
            .join("\n")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn segment(index: u32, start: f64, text: &str) -> TranscriptSegment {
        TranscriptSegment {
            index,
            start,
            end: start + 1.0,
            text: text.to_string(),
            words: None,
        }
    }

    #[test]
    fn given_segments_when_projecting_text_then_trimmed_and_newline_joined() {
        let transcript = Transcript {
            duration: 3.0,
            language: Some("en".to_string()),
            segments: vec![segment(0, 0.0, " Hi "), segment(1, 2.0, "there")],
        };

        assert_eq!(transcript.plain_text(), "Hi\nthere");
    }

    #[test]
    fn given_no_segments_when_projecting_text_then_empty() {
        let transcript = Transcript {
            duration: 0.0,
            language: None,
            segments: vec![],
        };

        assert_eq!(transcript.plain_text(), "");
    }
}
