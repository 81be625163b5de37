use super::*;
use crate::constants::{GENERATION_FALLBACK_ANSWER, NO_CONTEXT_ANSWER, SAFETY_BLOCK_MESSAGE};
use crate::gemini::MockCompletionModel;
use crate::retrieval::MockKnowledgeSearch;

const VALIDATOR_MODEL: &str = "gemini-1.5-flash";
const RESPONDER_MODEL: &str = "gemini-1.5-pro";

fn pipeline(
    model: &MockCompletionModel,
    knowledge: &MockKnowledgeSearch,
) -> Pipeline<MockCompletionModel, MockKnowledgeSearch> {
    Pipeline::new(
        model.clone(),
        knowledge.clone(),
        PipelineConfig {
            validator_model: VALIDATOR_MODEL.to_string(),
            responder_model: RESPONDER_MODEL.to_string(),
            safety_threshold: SafetyThreshold::BlockMediumAndAbove,
        },
    )
}

#[tokio::test]
async fn test_blocked_question_short_circuits() {
    let model = MockCompletionModel::new();
    let knowledge = MockKnowledgeSearch::new();
    model.push_safety_block();

    let outcome = pipeline(&model, &knowledge)
        .ask("How to hack the system")
        .await;

    assert_eq!(outcome.validation_status, ValidationStatus::Blocked);
    assert!(!outcome.context_found);
    assert!(outcome.answer.contains("I cannot process this question"));
    assert!(outcome.answer.contains("safety reasons"));
    assert_eq!(outcome.error.as_deref(), Some(SAFETY_BLOCK_MESSAGE));

    // neither retrieval nor the responder ever ran
    assert_eq!(knowledge.call_count(), 0);
    assert!(model.calls_for_model(RESPONDER_MODEL).is_empty());
}

#[tokio::test]
async fn test_retrieval_miss_returns_fixed_answer() {
    let model = MockCompletionModel::new();
    let knowledge = MockKnowledgeSearch::new();
    model.push_completion("safe");
    knowledge.push_miss();

    let outcome = pipeline(&model, &knowledge)
        .ask("Where can I park my seaplane?")
        .await;

    assert_eq!(outcome.answer, NO_CONTEXT_ANSWER);
    assert!(!outcome.context_found);
    assert_eq!(outcome.validation_status, ValidationStatus::Passed);
    assert!(outcome.error.is_none());
    assert!(model.calls_for_model(RESPONDER_MODEL).is_empty());
}

#[tokio::test]
async fn test_retrieval_error_is_absorbed_as_miss() {
    let model = MockCompletionModel::new();
    let knowledge = MockKnowledgeSearch::new();
    model.push_completion("safe");
    knowledge.push_error("table not found");

    let outcome = pipeline(&model, &knowledge).ask("Any question").await;

    assert_eq!(outcome.answer, NO_CONTEXT_ANSWER);
    assert!(!outcome.context_found);
    assert_eq!(outcome.validation_status, ValidationStatus::Passed);
}

#[tokio::test]
async fn test_happy_path_invokes_responder_once_with_retrieved_text() {
    let model = MockCompletionModel::new();
    let knowledge = MockKnowledgeSearch::new();
    model.push_completion("safe");
    model.push_completion("  Crews plow priority routes first.  ");
    knowledge.push_hit("Priority 1 routes are plowed first.");

    let outcome = pipeline(&model, &knowledge)
        .ask("What are the snow removal procedures?")
        .await;

    assert_eq!(outcome.answer, "Crews plow priority routes first.");
    assert!(outcome.context_found);
    assert_eq!(outcome.validation_status, ValidationStatus::Passed);
    assert!(outcome.error.is_none());

    let responder_calls = model.calls_for_model(RESPONDER_MODEL);
    assert_eq!(responder_calls.len(), 1);
    assert!(
        responder_calls[0]
            .prompt
            .contains("Priority 1 routes are plowed first.")
    );
    assert_eq!(knowledge.calls(), vec!["What are the snow removal procedures?"]);
}

#[tokio::test]
async fn test_generation_failure_yields_fixed_apology() {
    let model = MockCompletionModel::new();
    let knowledge = MockKnowledgeSearch::new();
    model.push_completion("safe");
    model.push_error("upstream 503");
    knowledge.push_hit("some passage");

    let outcome = pipeline(&model, &knowledge).ask("Any question").await;

    assert_eq!(outcome.answer, GENERATION_FALLBACK_ANSWER);
    assert!(outcome.context_found);
    assert_eq!(outcome.validation_status, ValidationStatus::Passed);
}

#[tokio::test]
async fn test_validator_failure_blocks_with_error_reason() {
    let model = MockCompletionModel::new();
    let knowledge = MockKnowledgeSearch::new();
    model.push_error("connection reset");

    let outcome = pipeline(&model, &knowledge).ask("Any question").await;

    assert_eq!(outcome.validation_status, ValidationStatus::Blocked);
    assert!(outcome.error.unwrap().starts_with("Error validating prompt:"));
    assert_eq!(knowledge.call_count(), 0);
}

#[test]
fn test_validation_status_serializes_lowercase() {
    assert_eq!(
        serde_json::to_string(&ValidationStatus::Passed).unwrap(),
        "\"passed\""
    );
    assert_eq!(
        serde_json::to_string(&ValidationStatus::Blocked).unwrap(),
        "\"blocked\""
    );
}
