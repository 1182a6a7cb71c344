// ABOUTME: Integration tests for the direct workout generation endpoint
// ABOUTME: Exercises parameter validation, enrichment, and reply failure modes

mod common;
mod helpers;

use common::{create_test_resources, MockReply, PLAN_REPLY};
use helpers::axum_test::AxumTestRequest;
use serde_json::{json, Value};

use wot_trainer::routes;

#[tokio::test]
async fn test_generate_workout_success_shape() {
    let resources = create_test_resources(vec![MockReply::Text(PLAN_REPLY)]).await;
    let app = routes::router(resources);

    let response = AxumTestRequest::post("/api/generate-workout")
        .json(&json!({
            "userId": "u1",
            "duration": 25,
            "difficulty": "advanced",
            "preferences": "hiit, cardio"
        }))
        .send(app.clone())
        .await;

    assert_eq!(response.status(), 200);
    let body: Value = response.json();
    assert_eq!(body["success"], true);

    let workout = &body["workout"];
    assert_eq!(workout["name"], "Quick HIIT Blast");
    assert_eq!(workout["durationMinutes"], 25);
    assert_eq!(workout["difficulty"], "advanced");
    // 25 minutes at the advanced rate
    assert_eq!(workout["estimatedCalories"], 275);
    assert_eq!(workout["tags"], json!(["advanced", "hiit", "cardio"]));
    assert_eq!(workout["exerciseCount"], 5);

    // The scripted plan names squats, push-ups, and a plank
    let groups: Vec<&str> = workout["targetMuscleGroups"]
        .as_array()
        .unwrap()
        .iter()
        .filter_map(Value::as_str)
        .collect();
    assert!(groups.contains(&"legs"));
    assert!(groups.contains(&"chest"));
    assert!(groups.contains(&"core"));

    // Auto-saved into the library
    let list: Value = AxumTestRequest::get("/api/workouts?userId=u1")
        .send(app)
        .await
        .json();
    assert_eq!(list["total"], 1);
}

#[tokio::test]
async fn test_generate_workout_defaults() {
    let resources = create_test_resources(vec![MockReply::Text(PLAN_REPLY)]).await;
    let app = routes::router(resources);

    let response = AxumTestRequest::post("/api/generate-workout")
        .json(&json!({"userId": "u1", "duration": 30}))
        .send(app)
        .await;

    assert_eq!(response.status(), 200);
    let body: Value = response.json();
    let workout = &body["workout"];
    assert_eq!(workout["difficulty"], "intermediate");
    assert_eq!(workout["estimatedCalories"], 240);
    // Missing preferences fall back to the default string
    assert_eq!(workout["tags"], json!(["intermediate", "general fitness"]));
}

#[tokio::test]
async fn test_zero_duration_rejected_before_model_call() {
    let resources = create_test_resources(vec![]).await;
    let app = routes::router(resources);

    let response = AxumTestRequest::post("/api/generate-workout")
        .json(&json!({"userId": "u1", "duration": 0}))
        .send(app)
        .await;

    assert_eq!(response.status(), 400);
    let body: Value = response.json();
    assert_eq!(body["error"]["code"], "INVALID_INPUT");
}

#[tokio::test]
async fn test_malformed_reply_is_bad_gateway() {
    let resources =
        create_test_resources(vec![MockReply::Text("no json here, sorry")]).await;
    let app = routes::router(resources);

    let response = AxumTestRequest::post("/api/generate-workout")
        .json(&json!({"userId": "u1", "duration": 20}))
        .send(app)
        .await;

    assert_eq!(response.status(), 502);
    let body: Value = response.json();
    assert_eq!(body["error"]["code"], "MALFORMED_RESPONSE");
}

#[tokio::test]
async fn test_wrong_shape_reply_is_invalid_shape() {
    let resources = create_test_resources(vec![MockReply::Text(
        r#"{"title": "not a plan", "steps": []}"#,
    )])
    .await;
    let app = routes::router(resources);

    let response = AxumTestRequest::post("/api/generate-workout")
        .json(&json!({"userId": "u1", "duration": 20}))
        .send(app)
        .await;

    assert_eq!(response.status(), 502);
    let body: Value = response.json();
    assert_eq!(body["error"]["code"], "INVALID_SHAPE");
}

#[tokio::test]
async fn test_nothing_saved_on_parse_failure() {
    let resources =
        create_test_resources(vec![MockReply::Text("still no json")]).await;
    let app = routes::router(resources);

    AxumTestRequest::post("/api/generate-workout")
        .json(&json!({"userId": "u1", "duration": 20}))
        .send(app.clone())
        .await;

    let list: Value = AxumTestRequest::get("/api/workouts?userId=u1")
        .send(app)
        .await
        .json();
    assert_eq!(list["total"], 0);
}
