//! Request and response types for the Gemini `generateContent` endpoint.

use serde_json::{Value, json};
use std::str::FromStr;

/// Harm categories a safety threshold is applied to.
pub const HARM_CATEGORIES: [&str; 4] = [
    "HARM_CATEGORY_HARASSMENT",
    "HARM_CATEGORY_HATE_SPEECH",
    "HARM_CATEGORY_SEXUALLY_EXPLICIT",
    "HARM_CATEGORY_DANGEROUS_CONTENT",
];

/// Blocking threshold applied uniformly to all harm categories.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SafetyThreshold {
    BlockNone,
    BlockOnlyHigh,
    BlockMediumAndAbove,
    BlockLowAndAbove,
}

impl SafetyThreshold {
    /// Wire representation expected by the Gemini API.
    pub fn as_str(&self) -> &'static str {
        match self {
            SafetyThreshold::BlockNone => "BLOCK_NONE",
            SafetyThreshold::BlockOnlyHigh => "BLOCK_ONLY_HIGH",
            SafetyThreshold::BlockMediumAndAbove => "BLOCK_MEDIUM_AND_ABOVE",
            SafetyThreshold::BlockLowAndAbove => "BLOCK_LOW_AND_ABOVE",
        }
    }
}

impl FromStr for SafetyThreshold {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "BLOCK_NONE" => Ok(SafetyThreshold::BlockNone),
            "BLOCK_ONLY_HIGH" => Ok(SafetyThreshold::BlockOnlyHigh),
            "BLOCK_MEDIUM_AND_ABOVE" => Ok(SafetyThreshold::BlockMediumAndAbove),
            "BLOCK_LOW_AND_ABOVE" => Ok(SafetyThreshold::BlockLowAndAbove),
            _ => Err(()),
        }
    }
}

/// A single-turn generation request.
///
/// The pipeline only ever sends one user turn; conversation history is out
/// of scope for this service.
#[derive(Debug, Clone)]
pub struct GenerateRequest {
    pub prompt: String,
    pub safety_threshold: Option<SafetyThreshold>,
}

impl GenerateRequest {
    pub fn new(prompt: impl Into<String>) -> Self {
        Self {
            prompt: prompt.into(),
            safety_threshold: None,
        }
    }

    pub fn with_safety_threshold(mut self, threshold: SafetyThreshold) -> Self {
        self.safety_threshold = Some(threshold);
        self
    }

    /// Builds the JSON request body.
    pub(crate) fn to_body(&self) -> Value {
        let mut body = json!({
            "contents": [{
                "role": "user",
                "parts": [{"text": self.prompt}],
            }],
        });

        if let Some(threshold) = self.safety_threshold {
            let settings: Vec<Value> = HARM_CATEGORIES
                .iter()
                .map(|category| {
                    json!({
                        "category": category,
                        "threshold": threshold.as_str(),
                    })
                })
                .collect();
            body["safetySettings"] = Value::Array(settings);
        }

        body
    }
}

/// Why a completion stopped generating.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FinishReason {
    Stop,
    MaxTokens,
    Safety,
    Recitation,
    Other(String),
}

impl FinishReason {
    /// Parses the candidate-level `finishReason` tag.
    pub fn parse(tag: &str) -> Self {
        match tag {
            "STOP" => FinishReason::Stop,
            "MAX_TOKENS" => FinishReason::MaxTokens,
            "SAFETY" => FinishReason::Safety,
            "RECITATION" => FinishReason::Recitation,
            other => FinishReason::Other(other.to_string()),
        }
    }
}

/// A parsed completion: generated text plus the structured termination tag.
#[derive(Debug, Clone, PartialEq)]
pub struct Completion {
    pub text: String,
    pub finish_reason: Option<FinishReason>,
}

impl Completion {
    /// `true` when the candidate itself was terminated by the safety filter.
    pub fn is_safety_blocked(&self) -> bool {
        self.finish_reason == Some(FinishReason::Safety)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_finish_reason_parse() {
        assert_eq!(FinishReason::parse("STOP"), FinishReason::Stop);
        assert_eq!(FinishReason::parse("MAX_TOKENS"), FinishReason::MaxTokens);
        assert_eq!(FinishReason::parse("SAFETY"), FinishReason::Safety);
        assert_eq!(FinishReason::parse("RECITATION"), FinishReason::Recitation);
        assert_eq!(
            FinishReason::parse("MALFORMED_FUNCTION_CALL"),
            FinishReason::Other("MALFORMED_FUNCTION_CALL".to_string())
        );
    }

    #[test]
    fn test_safety_threshold_round_trip() {
        for threshold in [
            SafetyThreshold::BlockNone,
            SafetyThreshold::BlockOnlyHigh,
            SafetyThreshold::BlockMediumAndAbove,
            SafetyThreshold::BlockLowAndAbove,
        ] {
            assert_eq!(threshold.as_str().parse(), Ok(threshold));
        }
        assert!("BLOCK_EVERYTHING".parse::<SafetyThreshold>().is_err());
    }

    #[test]
    fn test_request_body_without_safety_settings() {
        let body = GenerateRequest::new("What are the snow removal procedures?").to_body();

        assert_eq!(body["contents"][0]["role"], "user");
        assert_eq!(
            body["contents"][0]["parts"][0]["text"],
            "What are the snow removal procedures?"
        );
        assert!(body.get("safetySettings").is_none());
    }

    #[test]
    fn test_request_body_with_safety_settings() {
        let body = GenerateRequest::new("hello")
            .with_safety_threshold(SafetyThreshold::BlockMediumAndAbove)
            .to_body();

        let settings = body["safetySettings"].as_array().unwrap();
        assert_eq!(settings.len(), HARM_CATEGORIES.len());
        for (setting, category) in settings.iter().zip(HARM_CATEGORIES) {
            assert_eq!(setting["category"], category);
            assert_eq!(setting["threshold"], "BLOCK_MEDIUM_AND_ABOVE");
        }
    }

    #[test]
    fn test_completion_safety_check() {
        let blocked = Completion {
            text: String::new(),
            finish_reason: Some(FinishReason::Safety),
        };
        assert!(blocked.is_safety_blocked());

        let normal = Completion {
            text: "answer".to_string(),
            finish_reason: Some(FinishReason::Stop),
        };
        assert!(!normal.is_safety_blocked());

        let untagged = Completion {
            text: "answer".to_string(),
            finish_reason: None,
        };
        assert!(!untagged.is_safety_blocked());
    }
}
