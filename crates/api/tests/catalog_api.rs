//! HTTP-level integration tests for the read-only catalog endpoints:
//! courses, course content, assessments, leaderboard and dashboard.

mod common;

use axum::http::StatusCode;
use common::{body_json, get};
use edulearn_core::access::MissingWindowPolicy;

fn ids(json: &serde_json::Value) -> Vec<i64> {
    json.as_array()
        .unwrap()
        .iter()
        .map(|item| item["id"].as_i64().unwrap())
        .collect()
}

// ---------------------------------------------------------------------------
// Courses
// ---------------------------------------------------------------------------

#[tokio::test]
async fn list_courses_unfiltered() {
    let app = common::build_test_app().await;
    let json = body_json(get(app, "/api/v1/courses").await).await;

    assert_eq!(ids(&json["data"]["items"]), vec![1, 2, 3, 4, 5, 6]);
    let categories = json["data"]["facets"]["category"].as_array().unwrap();
    assert_eq!(categories[0], "all");
    assert_eq!(categories.len(), 7);
}

#[tokio::test]
async fn list_courses_combines_search_and_facets() {
    let app = common::build_test_app().await;

    let json = body_json(get(app.clone(), "/api/v1/courses?q=REACT").await).await;
    assert_eq!(ids(&json["data"]["items"]), vec![1]);

    let json = body_json(get(app.clone(), "/api/v1/courses?status=in-progress").await).await;
    assert_eq!(ids(&json["data"]["items"]), vec![1, 4, 6]);

    let json = body_json(get(app.clone(), "/api/v1/courses?q=data&level=Intermediate").await).await;
    assert_eq!(ids(&json["data"]["items"]), vec![4, 5]);

    let json = body_json(get(app, "/api/v1/courses?category=all&level=all").await).await;
    assert_eq!(ids(&json["data"]["items"]).len(), 6);
}

#[tokio::test]
async fn get_course_and_missing_course() {
    let app = common::build_test_app().await;

    let json = body_json(get(app.clone(), "/api/v1/courses/1").await).await;
    assert_eq!(json["data"]["title"], "Advanced React Development");
    assert_eq!(json["data"]["total_lessons"], 45);

    let response = get(app, "/api/v1/courses/99").await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    assert_eq!(body_json(response).await["error"], "Course with id 99 not found");
}

#[tokio::test]
async fn weeks_are_pruned_by_query() {
    let app = common::build_test_app().await;

    let json = body_json(get(app.clone(), "/api/v1/courses/1/weeks").await).await;
    assert_eq!(json["data"].as_array().unwrap().len(), 4);

    let json = body_json(get(app, "/api/v1/courses/1/weeks?q=context").await).await;
    let weeks = json["data"].as_array().unwrap();
    assert_eq!(weeks.len(), 1);
    assert_eq!(weeks[0]["id"], 2);
    assert_eq!(weeks[0]["videos"].as_array().unwrap().len(), 3);
    assert_eq!(weeks[0]["assessments"].as_array().unwrap().len(), 1);
    assert_eq!(weeks[0]["assessments"][0]["title"], "Context API Quiz");
}

#[tokio::test]
async fn weeks_of_course_without_content_are_empty() {
    let app = common::build_test_app().await;

    let response = get(app.clone(), "/api/v1/courses/2/weeks").await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_json(response).await["data"], serde_json::json!([]));

    let response = get(app, "/api/v1/courses/99/weeks").await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn content_assessment_window_check() {
    let app = common::build_test_app().await;

    let json = body_json(
        get(app.clone(), "/api/v1/courses/1/assessments/6/access?at=2025-01-01T00:00:00Z").await,
    )
    .await;
    assert_eq!(json["data"]["accessible"], false);
    assert_eq!(json["data"]["reason"], "closed");
    assert_eq!(json["data"]["start"], "2024-01-01");
    assert_eq!(json["data"]["end"], "2024-06-30");
    assert_eq!(
        json["data"]["message"],
        "Invalid Time – This test can only be accessed between 2024-01-01 and 2024-06-30"
    );

    let json = body_json(
        get(app.clone(), "/api/v1/courses/1/assessments/7/access?at=2025-01-01T00:00:00Z").await,
    )
    .await;
    assert_eq!(json["data"]["reason"], "not_yet_open");

    let json = body_json(get(app.clone(), "/api/v1/courses/1/assessments/1/access").await).await;
    assert_eq!(json["data"]["accessible"], true);
    assert!(json["data"].get("reason").is_none());

    let response = get(app, "/api/v1/courses/1/assessments/42/access").await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

// ---------------------------------------------------------------------------
// Assessments
// ---------------------------------------------------------------------------

#[tokio::test]
async fn list_assessments_searches_tags() {
    let app = common::build_test_app().await;

    let json = body_json(get(app.clone(), "/api/v1/assessments?q=design").await).await;
    assert_eq!(ids(&json["data"]["items"]), vec![3, 5]);

    let json = body_json(get(app, "/api/v1/assessments?difficulty=Hard").await).await;
    assert_eq!(ids(&json["data"]["items"]), vec![2, 5]);
}

#[tokio::test]
async fn assessment_summary_counts() {
    let app = common::build_test_app().await;
    let json = body_json(get(app, "/api/v1/assessments/summary").await).await;

    assert_eq!(json["data"]["total"], 6);
    assert_eq!(json["data"]["completed"], 2);
    assert_eq!(json["data"]["in_progress"], 1);
    assert_eq!(json["data"]["average_score"], 85);
}

#[tokio::test]
async fn assessment_window_inside_and_outside() {
    let app = common::build_test_app().await;

    let json = body_json(get(app.clone(), "/api/v1/assessments/5/access?at=2024-06-01T00:00:00Z").await).await;
    assert_eq!(json["data"]["accessible"], true);

    let json = body_json(get(app.clone(), "/api/v1/assessments/5/access?at=2025-06-01T00:00:00Z").await).await;
    assert_eq!(json["data"]["accessible"], false);
    assert_eq!(json["data"]["end"], "2024-12-31");

    let json = body_json(get(app.clone(), "/api/v1/assessments/1/access?at=2025-06-01T00:00:00Z").await).await;
    assert_eq!(json["data"]["accessible"], true);

    let response = get(app, "/api/v1/assessments/77/access").await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn legacy_policy_fills_missing_windows() {
    let mut config = common::test_config();
    config.window_policy = MissingWindowPolicy::LegacyCalendar2024;
    let app = common::build_test_app_with_config(config).await;

    let json = body_json(get(app.clone(), "/api/v1/assessments/1/access?at=2025-06-01T00:00:00Z").await).await;
    assert_eq!(json["data"]["accessible"], false);
    assert_eq!(json["data"]["start"], "2024-01-01");
    assert_eq!(json["data"]["end"], "2024-12-31");

    let json = body_json(get(app, "/api/v1/assessments/1/access?at=2024-03-01T00:00:00Z").await).await;
    assert_eq!(json["data"]["accessible"], true);
}

// ---------------------------------------------------------------------------
// Leaderboard / dashboard
// ---------------------------------------------------------------------------

#[tokio::test]
async fn leaderboard_splits_filtered_entries() {
    let app = common::build_test_app().await;

    let json = body_json(get(app.clone(), "/api/v1/leaderboard").await).await;
    assert_eq!(json["data"]["podium"].as_array().unwrap().len(), 3);
    assert_eq!(json["data"]["remaining"].as_array().unwrap().len(), 7);

    let json = body_json(get(app, "/api/v1/leaderboard?department=Engineering").await).await;
    let ranks = |key: &str| -> Vec<i64> {
        json["data"][key]
            .as_array()
            .unwrap()
            .iter()
            .map(|e| e["rank"].as_i64().unwrap())
            .collect()
    };
    assert_eq!(ranks("podium"), vec![1, 2, 4]);
    assert_eq!(ranks("remaining"), vec![7, 10]);
    assert_eq!(json["data"]["facets"]["department"][0], "all");
}

#[tokio::test]
async fn dashboard_summary_from_seed() {
    let app = common::build_test_app().await;
    let json = body_json(get(app, "/api/v1/dashboard").await).await;

    let summary = &json["data"]["summary"];
    assert_eq!(summary["name"], "Sujith Kannan");
    assert_eq!(summary["total_courses"], 6);
    assert_eq!(summary["assessments_taken"], 3);
    assert_eq!(summary["average_score"], 85);
    assert_eq!(summary["current_course"]["id"], 1);
    assert_eq!(summary["current_course"]["progress"], 65);
    assert_eq!(json["data"]["announcements"].as_array().unwrap().len(), 3);
    assert_eq!(json["data"]["deadlines"].as_array().unwrap().len(), 3);
}
