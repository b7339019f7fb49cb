//! API integration tests
//!
//! These run against a live server and database:
//! `DATABASE_URL=... cargo test --test api_tests -- --ignored`

use reqwest::{Client, StatusCode};
use serde_json::{json, Value};
use sqlx::postgres::PgPoolOptions;

const BASE_URL: &str = "http://localhost:4000";

fn unique(prefix: &str) -> String {
    format!("{}-{}", prefix, chrono::Utc::now().timestamp_nanos_opt().unwrap_or_default())
}

async fn pool() -> sqlx::PgPool {
    let url = std::env::var("DATABASE_URL").expect("DATABASE_URL must be set");
    PgPoolOptions::new()
        .max_connections(1)
        .connect(&url)
        .await
        .expect("Failed to connect to database")
}

/// Log in as a fresh user holding `role`
async fn token_with_role(client: &Client, role: &str) -> String {
    let email = format!("{}@gearguard.test", unique(role));
    login(client, &email, None).await;

    sqlx::query("UPDATE users SET role = $1 WHERE email = $2")
        .bind(role)
        .bind(&email)
        .execute(&pool().await)
        .await
        .expect("Failed to set role");

    let body = login(client, &email, None).await;
    body["token"].as_str().expect("No token in response").to_string()
}

async fn login(client: &Client, email: &str, name: Option<&str>) -> Value {
    let response = client
        .post(format!("{}/auth/login", BASE_URL))
        .json(&json!({ "email": email, "name": name }))
        .send()
        .await
        .expect("Failed to send login request");
    assert!(response.status().is_success());
    response.json().await.expect("Failed to parse login response")
}

async fn create_team() -> i32 {
    sqlx::query_scalar("INSERT INTO maintenance_teams (name) VALUES ($1) RETURNING id")
        .bind(unique("team"))
        .fetch_one(&pool().await)
        .await
        .expect("Failed to create team")
}

#[tokio::test]
#[ignore] // Run with: cargo test -- --ignored
async fn test_health_check() {
    let client = Client::new();

    let response = client
        .get(format!("{}/health", BASE_URL))
        .send()
        .await
        .expect("Failed to send request");

    assert!(response.status().is_success());

    let body: Value = response.json().await.expect("Failed to parse response");
    assert_eq!(body["ok"], true);
}

#[tokio::test]
#[ignore]
async fn test_login_is_idempotent() {
    let client = Client::new();
    let email = format!("{}@gearguard.test", unique("idem"));

    let first = login(&client, &email, None).await;
    assert_eq!(first["user"]["role"], "user");
    assert_eq!(first["user"]["name"], email.split('@').next().unwrap());

    let second = login(&client, &email, Some("Other Name")).await;
    assert_eq!(first["user"]["id"], second["user"]["id"]);
}

#[tokio::test]
#[ignore]
async fn test_login_requires_email() {
    let client = Client::new();

    let response = client
        .post(format!("{}/auth/login", BASE_URL))
        .json(&json!({ "name": "Nobody" }))
        .send()
        .await
        .expect("Failed to send request");

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
#[ignore]
async fn test_protected_routes_reject_bad_tokens() {
    let client = Client::new();

    for path in ["/equipment", "/requests", "/reports/by-team"] {
        let response = client
            .get(format!("{}{}", BASE_URL, path))
            .header("Authorization", "Bearer garbage")
            .send()
            .await
            .expect("Failed to send request");
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    }
}

#[tokio::test]
#[ignore]
async fn test_empty_equipment_update_rejected() {
    let client = Client::new();
    let token = token_with_role(&client, "manager").await;

    let created: Value = client
        .post(format!("{}/equipment", BASE_URL))
        .bearer_auth(&token)
        .json(&json!({ "name": "Lathe", "serial_number": unique("L") }))
        .send()
        .await
        .expect("Failed to send request")
        .json()
        .await
        .expect("Failed to parse response");

    let response = client
        .put(format!("{}/equipment/{}", BASE_URL, created["id"]))
        .bearer_auth(&token)
        .json(&json!({ "unknown": 1 }))
        .send()
        .await
        .expect("Failed to send request");
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let fetched: Value = client
        .get(format!("{}/equipment/{}", BASE_URL, created["id"]))
        .bearer_auth(&token)
        .send()
        .await
        .expect("Failed to send request")
        .json()
        .await
        .expect("Failed to parse response");
    assert_eq!(fetched["name"], "Lathe");
}

#[tokio::test]
#[ignore]
async fn test_scrap_flow() {
    let client = Client::new();
    let token = token_with_role(&client, "manager").await;
    let team_id = create_team().await;

    // Register equipment owned by the team
    let response = client
        .post(format!("{}/equipment", BASE_URL))
        .bearer_auth(&token)
        .json(&json!({ "name": "Press", "serial_number": unique("P"), "maintenance_team_id": team_id }))
        .send()
        .await
        .expect("Failed to send request");
    assert_eq!(response.status(), StatusCode::CREATED);
    let press: Value = response.json().await.expect("Failed to parse response");

    // Team comes from the equipment, not the payload
    let response = client
        .post(format!("{}/requests", BASE_URL))
        .bearer_auth(&token)
        .json(&json!({
            "subject": "Leak",
            "request_type": "corrective",
            "equipment_id": press["id"],
            "maintenance_team_id": team_id + 1000
        }))
        .send()
        .await
        .expect("Failed to send request");
    assert_eq!(response.status(), StatusCode::CREATED);
    let request: Value = response.json().await.expect("Failed to parse response");
    assert_eq!(request["maintenance_team_id"], team_id);
    assert_eq!(request["status"], "new");

    // One open request
    let equipment: Value = client
        .get(format!("{}/equipment/{}", BASE_URL, press["id"]))
        .bearer_auth(&token)
        .send()
        .await
        .expect("Failed to send request")
        .json()
        .await
        .expect("Failed to parse response");
    assert_eq!(equipment["open_request_count"], 1);

    // Scrap the request
    let response = client
        .put(format!("{}/requests/{}", BASE_URL, request["id"]))
        .bearer_auth(&token)
        .json(&json!({ "status": "scrap" }))
        .send()
        .await
        .expect("Failed to send request");
    assert!(response.status().is_success());
    let updated: Value = response.json().await.expect("Failed to parse response");
    assert_eq!(updated["status"], "scrap");

    let equipment: Value = client
        .get(format!("{}/equipment/{}", BASE_URL, press["id"]))
        .bearer_auth(&token)
        .send()
        .await
        .expect("Failed to send request")
        .json()
        .await
        .expect("Failed to parse response");
    assert_eq!(equipment["is_scrapped"], true);

    // Team report reflects the scrapped request
    let report: Value = client
        .get(format!("{}/reports/by-team", BASE_URL))
        .bearer_auth(&token)
        .send()
        .await
        .expect("Failed to send request")
        .json()
        .await
        .expect("Failed to parse response");
    let row = report
        .as_array()
        .expect("Report is not an array")
        .iter()
        .find(|r| r["team_id"] == team_id)
        .expect("Team missing from report");
    assert_eq!(row["request_count"], 1);
    assert_eq!(row["scrap_count"], 1);
}

#[tokio::test]
#[ignore]
async fn test_repaired_requests_are_not_open() {
    let client = Client::new();
    let token = token_with_role(&client, "technician").await;

    let press: Value = client
        .post(format!("{}/equipment", BASE_URL))
        .bearer_auth(&token)
        .json(&json!({ "name": "Pump", "serial_number": unique("PU") }))
        .send()
        .await
        .expect("Failed to send request")
        .json()
        .await
        .expect("Failed to parse response");

    for status in ["new", "repaired"] {
        let response = client
            .post(format!("{}/requests", BASE_URL))
            .bearer_auth(&token)
            .json(&json!({ "subject": status, "request_type": "preventive", "equipment_id": press["id"], "status": status }))
            .send()
            .await
            .expect("Failed to send request");
        assert_eq!(response.status(), StatusCode::CREATED);
    }

    let listed: Value = client
        .get(format!("{}/equipment", BASE_URL))
        .bearer_auth(&token)
        .send()
        .await
        .expect("Failed to send request")
        .json()
        .await
        .expect("Failed to parse response");
    let row = listed
        .as_array()
        .expect("List is not an array")
        .iter()
        .find(|e| e["id"] == press["id"])
        .expect("Equipment missing from list");
    assert_eq!(row["open_request_count"], 1);

    let repaired: Value = client
        .get(format!("{}/requests?status=repaired", BASE_URL))
        .bearer_auth(&token)
        .send()
        .await
        .expect("Failed to send request")
        .json()
        .await
        .expect("Failed to parse response");
    assert!(repaired
        .as_array()
        .expect("List is not an array")
        .iter()
        .all(|r| r["status"] == "repaired"));
}

#[tokio::test]
#[ignore]
async fn test_plain_user_cannot_update_requests() {
    let client = Client::new();
    let body = login(&client, &format!("{}@gearguard.test", unique("plain")), None).await;
    let token = body["token"].as_str().expect("No token in response");

    let response = client
        .put(format!("{}/requests/1", BASE_URL))
        .bearer_auth(token)
        .json(&json!({ "status": "in_progress" }))
        .send()
        .await
        .expect("Failed to send request");
    assert_eq!(response.status(), StatusCode::FORBIDDEN);
}

async fn get(client: &Client, token: &str, path: &str) -> Value {
    let response = client
        .get(format!("{}{}", BASE_URL, path))
        .bearer_auth(token)
        .send()
        .await
        .expect("Failed to send request");
    assert!(response.status().is_success());
    response.json().await.expect("Failed to parse response")
}

async fn post(client: &Client, token: &str, path: &str, body: Value) -> Value {
    let response = client
        .post(format!("{}{}", BASE_URL, path))
        .bearer_auth(token)
        .json(&body)
        .send()
        .await
        .expect("Failed to send request");
    assert_eq!(response.status(), StatusCode::CREATED);
    response.json().await.expect("Failed to parse response")
}

fn find<'a>(rows: &'a Value, key: &str, value: &Value) -> Option<&'a Value> {
    rows.as_array()
        .expect("Response is not an array")
        .iter()
        .find(|row| &row[key] == value)
}

#[tokio::test]
#[ignore]
async fn test_scrap_of_unknown_request_leaves_equipment_untouched() {
    let client = Client::new();
    let token = token_with_role(&client, "manager").await;

    let mill = post(&client, &token, "/equipment", json!({ "name": "Mill", "serial_number": unique("M") })).await;

    let response = client
        .put(format!("{}/requests/{}", BASE_URL, i32::MAX))
        .bearer_auth(&token)
        .json(&json!({ "status": "scrap", "equipment_id": mill["id"] }))
        .send()
        .await
        .expect("Failed to send request");
    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    let fetched = get(&client, &token, &format!("/equipment/{}", mill["id"])).await;
    assert_eq!(fetched["is_scrapped"], false);
}

#[tokio::test]
#[ignore]
async fn test_scrapped_flag_cannot_be_cleared() {
    let client = Client::new();
    let token = token_with_role(&client, "manager").await;

    let drill = post(&client, &token, "/equipment", json!({ "name": "Drill", "serial_number": unique("D") })).await;
    let path = format!("{}/equipment/{}", BASE_URL, drill["id"]);

    for flag in [true, false] {
        let response = client
            .put(&path)
            .bearer_auth(&token)
            .json(&json!({ "is_scrapped": flag }))
            .send()
            .await
            .expect("Failed to send request");
        assert!(response.status().is_success());
        let body: Value = response.json().await.expect("Failed to parse response");
        assert_eq!(body["is_scrapped"], true);
    }

    let fetched = get(&client, &token, &format!("/equipment/{}", drill["id"])).await;
    assert_eq!(fetched["is_scrapped"], true);
}

#[tokio::test]
#[ignore]
async fn test_category_and_type_reports() {
    let client = Client::new();
    let token = token_with_role(&client, "manager").await;
    let category = unique("cat");

    let before = get(&client, &token, "/reports/by-type").await;
    let preventive = json!("preventive");
    let count_of = |rows: &Value, field: &str| {
        find(rows, "request_type", &preventive)
            .map(|row| row[field].as_i64().unwrap_or_default())
            .unwrap_or_default()
    };

    let saw = post(
        &client,
        &token,
        "/equipment",
        json!({ "name": "Saw", "serial_number": unique("S"), "category": category }),
    )
    .await;
    let uncategorized = post(&client, &token, "/equipment", json!({ "name": "Fan", "serial_number": unique("F") })).await;

    for (equipment, status) in [(&saw, "in_progress"), (&saw, "repaired"), (&uncategorized, "new")] {
        post(
            &client,
            &token,
            "/requests",
            json!({ "subject": status, "request_type": "preventive", "equipment_id": equipment["id"], "status": status }),
        )
        .await;
    }

    let by_category = get(&client, &token, "/reports/by-category").await;
    let row = find(&by_category, "category", &json!(category)).expect("Category missing from report");
    assert_eq!(row["request_count"], 2);
    assert_eq!(row["in_progress_count"], 1);
    assert_eq!(row["repaired_count"], 1);
    assert_eq!(row["preventive_count"], 2);
    assert_eq!(row["corrective_count"], 0);
    assert!(by_category
        .as_array()
        .expect("Report is not an array")
        .iter()
        .all(|row| row["category"].is_string()));

    let after = get(&client, &token, "/reports/by-type").await;
    assert_eq!(count_of(&after, "count") - count_of(&before, "count"), 3);
    assert_eq!(count_of(&after, "new_count") - count_of(&before, "new_count"), 1);
    assert_eq!(count_of(&after, "in_progress_count") - count_of(&before, "in_progress_count"), 1);
    assert_eq!(count_of(&after, "repaired_count") - count_of(&before, "repaired_count"), 1);
}

#[tokio::test]
#[ignore]
async fn test_idle_team_reports_zero_counts() {
    let client = Client::new();
    let token = token_with_role(&client, "manager").await;
    let team_id = create_team().await;

    let report = get(&client, &token, "/reports/by-team").await;
    let row = find(&report, "team_id", &json!(team_id)).expect("Team missing from report");
    for field in ["request_count", "new_count", "in_progress_count", "repaired_count", "scrap_count"] {
        assert_eq!(row[field], 0, "{}", field);
    }
}

#[tokio::test]
#[ignore]
async fn test_stored_text_matches_report_values() {
    let client = Client::new();
    let token = token_with_role(&client, "technician").await;

    let request = post(
        &client,
        &token,
        "/requests",
        json!({ "subject": "Belt", "request_type": "corrective", "status": "in_progress" }),
    )
    .await;

    let (status, request_type): (String, String) =
        sqlx::query_as("SELECT status, request_type FROM maintenance_requests WHERE id = $1")
            .bind(request["id"].as_i64().expect("No id in response") as i32)
            .fetch_one(&pool().await)
            .await
            .expect("Failed to read request");
    assert_eq!(status, "in_progress");
    assert_eq!(request_type, "corrective");
}
