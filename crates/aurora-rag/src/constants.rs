//! Cross-cutting, shared constants.
//!
//! The user-visible strings here are part of the API contract: callers and
//! the evaluation harness match on them exactly, so change them deliberately.

/// Service name reported by the liveness endpoint.
pub const SERVICE_NAME: &str = "Aurora FAQ RAG API";

/// Rejection reason returned whenever the validator sees a safety block.
pub const SAFETY_BLOCK_MESSAGE: &str =
    "This prompt was blocked for safety reasons. Please rephrase your question.";

/// Internal reason recorded when a prompt passes validation.
pub const PROMPT_SAFE_MESSAGE: &str = "Prompt is safe";

/// Answer returned when the knowledge base has no matching passage.
pub const NO_CONTEXT_ANSWER: &str = "I couldn't find information about that topic in the \
     Alaska FAQ database. Please try rephrasing your question or contact support.";

/// Answer returned when the generative call fails. Generation failures are
/// absorbed, never surfaced as an error status.
pub const GENERATION_FALLBACK_ANSWER: &str =
    "Sorry, I encountered an issue generating a response.";

/// Instruction prefixed to every grounded generation prompt.
pub const RESPONDER_INSTRUCTION: &str = "You are an Alaska Department information assistant. \
     Provide helpful answers using only the information below.\n\
     If the answer isn't available in the provided content, politely say you don't have that information.";

/// Questions surfaced to callers by `GET /sample-questions`.
pub const SAMPLE_QUESTIONS: [&str; 5] = [
    "What are the snow removal procedures?",
    "How do I report hazardous road conditions?",
    "What are the winter emergency protocols?",
    "When do emergency shelters open?",
    "How quickly are main roads cleared after snowfall?",
];

/// Metrics requested from the external evaluation service.
pub const EVAL_METRICS: [&str; 4] = [
    "groundedness",
    "instruction_following",
    "safety",
    "summarization_quality",
];
