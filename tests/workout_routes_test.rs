// ABOUTME: Integration tests for the workout library endpoints
// ABOUTME: Exercises listing, manual saves, deletion, and completion tracking

mod common;
mod helpers;

use common::create_test_resources;
use helpers::axum_test::AxumTestRequest;
use serde_json::{json, Value};

use wot_trainer::routes;

fn sample_save_body(user_id: &str) -> Value {
    json!({
        "userId": user_id,
        "name": "Leg Day",
        "description": "Lower body focus",
        "durationMinutes": 30,
        "difficulty": "advanced",
        "exercises": {
            "warmup": [
                {"name": "Leg swings", "durationSeconds": 45, "instructions": "Each side"}
            ],
            "main": [
                {"name": "Back squat", "sets": 5, "reps": 5, "restSeconds": 120, "instructions": "Brace hard"},
                {"name": "Walking lunge", "sets": 3, "reps": "10-12", "restSeconds": 90, "instructions": "Long strides"}
            ],
            "cooldown": []
        }
    })
}

#[tokio::test]
async fn test_save_workout_derives_metadata() {
    let resources = create_test_resources(vec![]).await;
    let app = routes::router(resources);

    let response = AxumTestRequest::post("/api/workouts")
        .json(&sample_save_body("u1"))
        .send(app)
        .await;

    assert_eq!(response.status(), 201);
    let body: Value = response.json();
    assert_eq!(body["name"], "Leg Day");
    assert_eq!(body["autoGenerated"], false);
    assert_eq!(body["createdBy"], "user");
    // 30 minutes at the advanced rate
    assert_eq!(body["estimatedCalories"], 330);
    let groups: Vec<&str> = body["targetMuscleGroups"]
        .as_array()
        .unwrap()
        .iter()
        .filter_map(Value::as_str)
        .collect();
    assert!(groups.contains(&"legs"));
    assert_eq!(body["tags"], json!(["advanced"]));
    assert_eq!(body["exerciseCount"], 3);
}

#[tokio::test]
async fn test_save_rejects_empty_name_and_zero_duration() {
    let resources = create_test_resources(vec![]).await;
    let app = routes::router(resources);

    let mut unnamed = sample_save_body("u1");
    unnamed["name"] = json!("  ");
    let response = AxumTestRequest::post("/api/workouts")
        .json(&unnamed)
        .send(app.clone())
        .await;
    assert_eq!(response.status(), 400);

    let mut zero = sample_save_body("u1");
    zero["durationMinutes"] = json!(0);
    let response = AxumTestRequest::post("/api/workouts")
        .json(&zero)
        .send(app)
        .await;
    assert_eq!(response.status(), 400);
    let body: Value = response.json();
    assert_eq!(body["error"]["code"], "INVALID_INPUT");
}

#[tokio::test]
async fn test_list_is_scoped_to_user() {
    let resources = create_test_resources(vec![]).await;
    let app = routes::router(resources);

    AxumTestRequest::post("/api/workouts")
        .json(&sample_save_body("u1"))
        .send(app.clone())
        .await;
    AxumTestRequest::post("/api/workouts")
        .json(&sample_save_body("u2"))
        .send(app.clone())
        .await;

    let list: Value = AxumTestRequest::get("/api/workouts?userId=u1")
        .send(app.clone())
        .await
        .json();
    assert_eq!(list["total"], 1);

    let empty: Value = AxumTestRequest::get("/api/workouts?userId=nobody")
        .send(app)
        .await
        .json();
    assert_eq!(empty["total"], 0);
}

#[tokio::test]
async fn test_delete_workout() {
    let resources = create_test_resources(vec![]).await;
    let app = routes::router(resources);

    let saved: Value = AxumTestRequest::post("/api/workouts")
        .json(&sample_save_body("u1"))
        .send(app.clone())
        .await
        .json();
    let id = saved["id"].as_str().unwrap();

    // Foreign user cannot delete
    let foreign = AxumTestRequest::delete(&format!("/api/workouts/{id}?userId=u2"))
        .send(app.clone())
        .await;
    assert_eq!(foreign.status(), 404);

    let removed = AxumTestRequest::delete(&format!("/api/workouts/{id}?userId=u1"))
        .send(app.clone())
        .await;
    assert_eq!(removed.status(), 204);

    let again = AxumTestRequest::delete(&format!("/api/workouts/{id}?userId=u1"))
        .send(app)
        .await;
    assert_eq!(again.status(), 404);
}

#[tokio::test]
async fn test_complete_workout_tracks_analytics() {
    let resources = create_test_resources(vec![]).await;
    let app = routes::router(resources);

    let saved: Value = AxumTestRequest::post("/api/workouts")
        .json(&sample_save_body("u1"))
        .send(app.clone())
        .await
        .json();
    let id = saved["id"].as_str().unwrap();
    assert_eq!(saved["analytics"]["timesCompleted"], 0);

    // The reported duration is accepted but not recorded
    let once: Value = AxumTestRequest::post(&format!("/api/workouts/{id}/complete"))
        .json(&json!({"userId": "u1", "duration": 25}))
        .send(app.clone())
        .await
        .json();
    assert_eq!(once["analytics"]["timesCompleted"], 1);
    assert!(once["analytics"]["lastCompleted"].is_string());
    assert_eq!(once["durationMinutes"], 30);

    let twice: Value = AxumTestRequest::post(&format!("/api/workouts/{id}/complete"))
        .json(&json!({"userId": "u1"}))
        .send(app.clone())
        .await
        .json();
    assert_eq!(twice["analytics"]["timesCompleted"], 2);

    let missing = AxumTestRequest::post("/api/workouts/nope/complete")
        .json(&json!({"userId": "u1"}))
        .send(app)
        .await;
    assert_eq!(missing.status(), 404);
}

#[tokio::test]
async fn test_health_endpoint() {
    let resources = create_test_resources(vec![]).await;
    let app = routes::router(resources);

    let response = AxumTestRequest::get("/api/health").send(app).await;
    assert_eq!(response.status(), 200);
    let body: Value = response.json();
    assert_eq!(body["status"], "healthy");
}
