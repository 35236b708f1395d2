//! End-to-end pipeline runs over the fake provider.

use std::sync::Arc;

use larder_core::feedback::{CsvFeedbackStore, FeedbackCategory, FeedbackLogger, FeedbackStore};
use larder_core::pipeline::{route, RecipePipeline, RecipeRequest, StageName};
use larder_core::{FakeProvider, GenerateResponse};
use serde_json::{json, Value};
use tempfile::TempDir;

const VALIDATION_REPLY: &str = "CLEANED_INGREDIENTS: [onion, garlic, chicken]\nVALID_PREFERENCES: [vegetarian]\nISSUES: None";

const VALIDATION_REPLY_NO_PREFERENCES: &str =
    "CLEANED_INGREDIENTS: [onion, garlic]\nVALID_PREFERENCES: []\nISSUES: None";

const FILTER_REPLY: &str = "FILTERED_INGREDIENTS: [onion, garlic]\nREMOVED_INGREDIENTS: [chicken - not vegetarian]\nSUGGESTED_ALTERNATIVES: [tofu]";

const RECIPE_REPLY: &str = "TITLE: Garlic Onion Rice\n\nINGREDIENTS:\n- 2 diced onions\n- 3 cloves garlic\n- 1 cup rice\n\nINSTRUCTIONS:\n1. Fry the onions and garlic.\n2. Add rice and water, simmer.\n\nADDITIONAL INGREDIENTS NEEDED: [oil]";

const TIME_REPLY: &str = "Estimated total cooking time: 45 minutes";

const HEALTH_REPLY: &str = "NUTRITIONAL_BENEFITS: Garlic supports heart health.\nHEALTH_TIPS: Use brown rice.\nHEALTHIER_SUGGESTIONS: Less oil.\nWARNINGS: None";

const ALTERNATE_REPLY: &str = "ALTERNATE_RECIPE_NAME: Onion Garlic Congee\nCUISINE_STYLE: Chinese\nINGREDIENTS_NEEDED:\n- 1 onion\nINSTRUCTIONS:\n1. Simmer.\nDIFFICULTY: Easy\nSERVINGS: 2\nFLAVOR_PROFILE: Mild";

struct Harness {
    provider: Arc<FakeProvider>,
    store: Arc<CsvFeedbackStore>,
    pipeline: RecipePipeline,
    _dir: TempDir,
}

fn harness(provider: FakeProvider) -> Harness {
    let dir = TempDir::new().unwrap();
    let store = Arc::new(CsvFeedbackStore::new(dir.path().join("feedback.csv")));
    let provider = Arc::new(provider);
    let pipeline = RecipePipeline::new(provider.clone(), FeedbackLogger::new(store.clone()));
    Harness {
        provider,
        store,
        pipeline,
        _dir: dir,
    }
}

fn scripted(validation_reply: &str) -> FakeProvider {
    let provider = FakeProvider::new();
    provider.add_response("input validator", validation_reply);
    provider.add_response("dietary restriction specialist", FILTER_REPLY);
    provider.add_response("professional chef", RECIPE_REPLY);
    provider.add_response("cooking time expert", TIME_REPLY);
    provider.add_response("nutrition expert", HEALTH_REPLY);
    provider.add_response("creative chef", ALTERNATE_REPLY);
    provider
}

fn request() -> RecipeRequest {
    RecipeRequest::new("onion, garlic, chicken")
        .with_preferences(["vegetarian"])
        .with_max_time(30)
}

async fn generate_json(h: &Harness, request: RecipeRequest) -> Value {
    serde_json::to_value(h.pipeline.generate(request).await).unwrap()
}

#[tokio::test]
async fn test_full_run_without_alternate() {
    let h = harness(scripted(VALIDATION_REPLY));
    let value = generate_json(&h, request()).await;

    assert_eq!(value["status"], json!("success"));
    assert_eq!(value["cleaned_ingredients"], json!(["onion", "garlic", "chicken"]));
    assert_eq!(value["filtered_ingredients"], json!(["onion", "garlic"]));
    assert_eq!(value["removed_ingredients"], json!(["chicken - not vegetarian"]));
    assert_eq!(value["recipe_title"], json!("Garlic Onion Rice"));
    assert_eq!(value["missed_ingredients"], json!(["1 cup rice"]));
    assert_eq!(value["additional_ingredients"], json!(["oil"]));
    assert_eq!(value["estimated_cook_time"], json!(45));
    assert_eq!(value["health_tips"], json!("Use brown rice."));
    assert_eq!(value["feedback_logged"], json!(false));

    for stage in route(false) {
        assert_eq!(value[stage.completion_key()], json!(true), "{} not complete", stage);
    }
    assert!(value.get("alternate_recipe_complete").is_none());
    assert!(value.get("alternate_recipe_name").is_none());

    // validate, filter, generate, estimate_time, health_tips
    assert_eq!(h.provider.call_count(), 5);
}

#[tokio::test]
async fn test_alternate_runs_before_feedback() {
    let h = harness(scripted(VALIDATION_REPLY));
    let state = h
        .pipeline
        .run(request().with_alternate(true))
        .await
        .unwrap();

    assert!(state.is_complete(StageName::Alternate));
    assert!(state.is_complete(StageName::Feedback));
    assert_eq!(state.alternate.as_ref().unwrap().name, "Onion Garlic Congee");

    let prompts = h.provider.prompts();
    assert_eq!(prompts.len(), 6);
    assert!(prompts[4].contains("nutrition expert"));
    assert!(prompts[5].contains("creative chef"));
    assert!(prompts[5].contains("Original recipe: Garlic Onion Rice"));
}

#[tokio::test]
async fn test_empty_preferences_skip_filter_call() {
    let h = harness(scripted(VALIDATION_REPLY_NO_PREFERENCES));
    let state = h
        .pipeline
        .run(RecipeRequest::new("onion, garlic"))
        .await
        .unwrap();

    assert_eq!(state.filtered_ingredients(), ["onion", "garlic"]);
    assert!(state.is_complete(StageName::Filter));
    assert!(!h
        .provider
        .prompts()
        .iter()
        .any(|p| p.contains("dietary restriction specialist")));
    assert_eq!(h.provider.call_count(), 4);
}

#[tokio::test]
async fn test_failure_aborts_run_without_feedback() {
    let provider = FakeProvider::new();
    provider.add_response("input validator", VALIDATION_REPLY);
    provider.add_response("dietary restriction specialist", FILTER_REPLY);
    provider.add_response("professional chef", RECIPE_REPLY);
    provider.add_response("cooking time expert", TIME_REPLY);
    let h = harness(provider);

    let response = h
        .pipeline
        .generate(request().with_feedback("thumbs_up"))
        .await;

    assert!(!response.is_success());
    let value = serde_json::to_value(&response).unwrap();
    assert_eq!(value["status"], json!("error"));
    assert!(value["error"]
        .as_str()
        .unwrap()
        .starts_with("health_tips stage failed"));
    assert!(value["trace"].as_str().unwrap().contains("health_tips"));
    assert!(value.get("recipe_title").is_none());
    assert_eq!(value.as_object().unwrap().len(), 3);

    assert!(h.store.read_all().unwrap().is_empty());
}

#[tokio::test]
async fn test_first_stage_failure_makes_one_call() {
    let h = harness(FakeProvider::failing("connection refused"));
    let err = h.pipeline.run(request()).await.unwrap_err();

    assert_eq!(err.stage, StageName::Validate);
    assert!(err.to_string().contains("connection refused"));
    assert_eq!(h.provider.call_count(), 1);
}

#[tokio::test]
async fn test_feedback_is_logged_from_run() {
    let h = harness(scripted(VALIDATION_REPLY));
    let response = h
        .pipeline
        .generate(request().with_feedback("thumbs_up"))
        .await;

    let state = response.state().unwrap();
    assert!(state.feedback_logged());

    let records = h.store.read_all().unwrap();
    assert_eq!(records.len(), 1);
    let record = &records[0];
    assert_eq!(record.recipe_name, "Garlic Onion Rice");
    assert_eq!(record.ingredients, "onion, garlic");
    assert_eq!(record.dietary_preferences, "vegetarian");
    assert_eq!(record.total_time, Some(45));
    assert_eq!(record.feedback_type, FeedbackCategory::ThumbsUp);
}

#[tokio::test]
async fn test_invalid_feedback_type_does_not_abort() {
    let h = harness(scripted(VALIDATION_REPLY));
    let response = h
        .pipeline
        .generate(request().with_feedback("love_it"))
        .await;

    assert!(matches!(response, GenerateResponse::Success(_)));
    assert!(!response.state().unwrap().feedback_logged());
    assert!(h.store.read_all().unwrap().is_empty());
}

#[tokio::test]
async fn test_every_declared_output_is_present() {
    let h = harness(scripted(VALIDATION_REPLY));
    let value = generate_json(&h, request().with_alternate(true)).await;

    for meta in h.pipeline.stages() {
        for key in meta.writes {
            assert!(
                value.get(*key).is_some(),
                "{} did not write {}",
                meta.name,
                key
            );
        }
    }
}

#[tokio::test]
async fn test_unparseable_replies_fall_back_per_field() {
    let h = harness(FakeProvider::new().with_default_response("I'd rather not."));
    let value = generate_json(&h, RecipeRequest::new("mystery").with_alternate(true)).await;

    assert_eq!(value["status"], json!("success"));
    assert_eq!(value["cleaned_ingredients"], json!([]));
    assert_eq!(value["validation_issues"], json!("None"));
    assert_eq!(value["recipe_title"], json!("Delicious Recipe"));
    assert_eq!(value["estimated_cook_time"], json!(null));
    assert_eq!(value["health_warnings"], json!("None"));
    assert_eq!(value["alternate_recipe_name"], json!("Alternative Recipe"));
    assert_eq!(value["alternate_servings"], json!("4"));
}
