pub mod protocol;
pub mod rest;
pub mod state;

pub use rest::{
    add_student_handler, delete_student_handler, edit_student_handler, get_student_handler,
    list_organizations_handler, list_sessions_handler, list_students_handler,
    record_session_handler, student_history_handler, summary_handler,
};

use axum::{
    http::{
        header::{ACCEPT, CONTENT_TYPE},
        Method,
    },
    routing::{get, post},
    Router,
};
use state::AppState;
use std::sync::Arc;
use tower_http::cors::CorsLayer;

/// Builds the REST router with CORS applied for the configured origin.
pub fn router(app_state: Arc<AppState>) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(app_state.config.cors_origin.clone())
        .allow_methods([Method::GET, Method::POST, Method::PUT, Method::DELETE, Method::OPTIONS])
        .allow_headers([CONTENT_TYPE, ACCEPT]);

    Router::new()
        .route("/organizations", get(list_organizations_handler))
        .route("/organizations/{org}/summary", get(summary_handler))
        .route(
            "/organizations/{org}/students",
            get(list_students_handler).post(add_student_handler),
        )
        .route(
            "/organizations/{org}/students/{student_id}",
            get(get_student_handler)
                .put(edit_student_handler)
                .delete(delete_student_handler),
        )
        .route(
            "/organizations/{org}/students/{student_id}/sessions",
            get(list_sessions_handler),
        )
        .route(
            "/organizations/{org}/students/{student_id}/history",
            get(student_history_handler),
        )
        .route("/organizations/{org}/sessions", post(record_session_handler))
        .layer(cors)
        .with_state(app_state)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::InMemoryRosterAdapter;
    use crate::config::Config;
    use axum::body::Body;
    use axum::http::{Request, StatusCode};
    use serde_json::{json, Value};
    use tower::ServiceExt;
    use tutor_roster_core::seed::demo_store;
    use tutor_roster_core::store::RosterStore;

    fn make_app(store: RosterStore) -> Router {
        let config = Config::from_lookup(|_| None).unwrap();
        let app_state = Arc::new(AppState {
            roster: Arc::new(InMemoryRosterAdapter::new(store)),
            config: Arc::new(config),
        });
        router(app_state)
    }

    async fn send(app: &Router, method: Method, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
        let builder = Request::builder().method(method).uri(uri);
        let req = match body {
            Some(body) => builder
                .header(CONTENT_TYPE, "application/json")
                .body(Body::from(body.to_string()))
                .unwrap(),
            None => builder.body(Body::empty()).unwrap(),
        };

        let resp = app.clone().oneshot(req).await.unwrap();
        let status = resp.status();
        let bytes = axum::body::to_bytes(resp.into_body(), 100_000).await.unwrap();
        let value = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes).unwrap()
        };
        (status, value)
    }

    fn student_body(total_hours: f64) -> Value {
        json!({
            "name": "Ann Lee",
            "grade": "M.6",
            "contact": "081-234-5678",
            "courseType": "theory",
            "totalHours": total_hours,
        })
    }

    fn session_body(student_id: &Value, hours_used: f64) -> Value {
        json!({
            "studentId": student_id,
            "date": "2024-01-15",
            "hoursUsed": hours_used,
            "content": "Quadratic equations",
            "teacher": "Mr. Somchai",
        })
    }

    #[tokio::test]
    async fn organizations_are_listed_in_order_with_counts() {
        let app = make_app(demo_store());
        let (status, body) = send(&app, Method::GET, "/organizations", None).await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(
            body,
            json!([
                { "name": "Login", "studentCount": 2 },
                { "name": "Meta", "studentCount": 1 },
                { "name": "Med", "studentCount": 0 },
                { "name": "IRE", "studentCount": 0 },
                { "name": "Ed-tech", "studentCount": 0 },
            ])
        );
    }

    #[tokio::test]
    async fn unknown_organization_returns_404() {
        let app = make_app(RosterStore::new());
        let (status, _) = send(&app, Method::GET, "/organizations/Acme/students", None).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn record_then_overdraw_scenario() {
        let app = make_app(RosterStore::new());

        let (status, student) =
            send(&app, Method::POST, "/organizations/Med/students", Some(student_body(20.0))).await;
        assert_eq!(status, StatusCode::CREATED);
        assert_eq!(student["usedHours"], 0.0);
        assert_eq!(student["remainingHours"], 20.0);
        let id = student["id"].clone();

        let (status, _) =
            send(&app, Method::POST, "/organizations/Med/sessions", Some(session_body(&id, 8.0))).await;
        assert_eq!(status, StatusCode::CREATED);

        let uri = format!("/organizations/Med/students/{}", id.as_str().unwrap());
        let (_, after) = send(&app, Method::GET, &uri, None).await;
        assert_eq!(after["usedHours"], 8.0);
        assert_eq!(after["remainingHours"], 12.0);
        assert_eq!(after["progressPercent"], 40.0);
        assert_eq!(after["balanceStatus"], "normal");
        assert_eq!(after["sessionCount"], 1);

        let (status, body) =
            send(&app, Method::POST, "/organizations/Med/sessions", Some(session_body(&id, 15.0))).await;
        assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
        assert!(body["errors"]["hoursUsed"].is_string());

        let (_, unchanged) = send(&app, Method::GET, &uri, None).await;
        assert_eq!(unchanged["remainingHours"], 12.0);
        assert_eq!(unchanged["sessionCount"], 1);
    }

    #[tokio::test]
    async fn mistyped_fields_are_reported_as_field_errors() {
        let app = make_app(RosterStore::new());

        for total_hours in [json!("abc"), Value::Null] {
            let mut body = student_body(0.0);
            body["totalHours"] = total_hours;
            let (status, body) =
                send(&app, Method::POST, "/organizations/Med/students", Some(body)).await;
            assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
            assert!(body["errors"]["totalHours"].is_string(), "got {body}");
        }

        let (status, body) = send(
            &app,
            Method::POST,
            "/organizations/Med/sessions",
            Some(session_body(&json!("not-a-uuid"), 1.0)),
        )
        .await;
        assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
        assert!(body["errors"]["studentId"].is_string(), "got {body}");

        let (_, students) = send(&app, Method::GET, "/organizations/Med/students", None).await;
        assert_eq!(students, json!([]));
    }

    #[tokio::test]
    async fn unparsable_body_is_reported_as_json() {
        let app = make_app(RosterStore::new());
        let req = Request::builder()
            .method(Method::POST)
            .uri("/organizations/Med/students")
            .header(CONTENT_TYPE, "application/json")
            .body(Body::from("{\"name\": "))
            .unwrap();

        let resp = app.oneshot(req).await.unwrap();
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
        let bytes = axum::body::to_bytes(resp.into_body(), 10_000).await.unwrap();
        let body: Value = serde_json::from_slice(&bytes).unwrap();
        assert!(body["errors"]["body"].is_string());
    }

    #[tokio::test]
    async fn invalid_student_reports_fields() {
        let app = make_app(RosterStore::new());
        let (status, body) = send(
            &app,
            Method::POST,
            "/organizations/IRE/students",
            Some(json!({ "name": "  ", "courseType": "lab" })),
        )
        .await;

        assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
        for field in ["name", "grade", "contact", "courseType", "totalHours"] {
            assert!(body["errors"][field].is_string(), "missing error for {field}");
        }
        let (_, students) = send(&app, Method::GET, "/organizations/IRE/students", None).await;
        assert_eq!(students, json!([]));
    }

    #[tokio::test]
    async fn adding_to_one_organization_leaves_others_empty() {
        let app = make_app(RosterStore::new());
        send(&app, Method::POST, "/organizations/Login/students", Some(student_body(10.0))).await;

        let (_, login) = send(&app, Method::GET, "/organizations/Login/students", None).await;
        let (_, meta) = send(&app, Method::GET, "/organizations/Meta/students", None).await;
        assert_eq!(login.as_array().unwrap().len(), 1);
        assert_eq!(meta.as_array().unwrap().len(), 0);
    }

    #[tokio::test]
    async fn edit_and_delete_student() {
        let app = make_app(RosterStore::new());
        let (_, student) =
            send(&app, Method::POST, "/organizations/Meta/students", Some(student_body(10.0))).await;
        let id = student["id"].clone();
        send(&app, Method::POST, "/organizations/Meta/sessions", Some(session_body(&id, 4.0))).await;

        let uri = format!("/organizations/Meta/students/{}", id.as_str().unwrap());
        let (status, edited) = send(&app, Method::PUT, &uri, Some(student_body(6.0))).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(edited["usedHours"], 4.0);
        assert_eq!(edited["remainingHours"], 2.0);
        assert_eq!(edited["balanceStatus"], "low");

        let (status, _) = send(&app, Method::PUT, &uri, Some(student_body(3.0))).await;
        assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);

        let (status, _) = send(&app, Method::DELETE, &uri, None).await;
        assert_eq!(status, StatusCode::NO_CONTENT);
        let (status, _) = send(&app, Method::GET, &format!("{}/history", uri), None).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        let (_, summary) = send(&app, Method::GET, "/organizations/Meta/summary", None).await;
        assert_eq!(summary["studentCount"], 0);
        assert_eq!(summary["sessionCount"], 0);
    }

    #[tokio::test]
    async fn session_for_unknown_student_is_rejected() {
        let app = make_app(RosterStore::new());
        let stranger = json!(uuid::Uuid::new_v4());
        let (status, body) = send(
            &app,
            Method::POST,
            "/organizations/Med/sessions",
            Some(session_body(&stranger, 1.0)),
        )
        .await;

        assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
        assert_eq!(body["errors"]["studentId"], "Student not found");
    }

    #[tokio::test]
    async fn history_lists_newest_first() {
        let app = make_app(RosterStore::new());
        let (_, student) =
            send(&app, Method::POST, "/organizations/Med/students", Some(student_body(10.0))).await;
        let id = student["id"].clone();
        for date in ["2024-03-01", "2024-01-10", "2024-02-05"] {
            let mut body = session_body(&id, 1.0);
            body["date"] = json!(date);
            send(&app, Method::POST, "/organizations/Med/sessions", Some(body)).await;
        }

        let uri = format!("/organizations/Med/students/{}/history", id.as_str().unwrap());
        let (status, history) = send(&app, Method::GET, &uri, None).await;
        assert_eq!(status, StatusCode::OK);
        let dates: Vec<_> = history["sessions"]
            .as_array()
            .unwrap()
            .iter()
            .map(|entry| (entry["ordinal"].as_u64().unwrap(), entry["session"]["date"].as_str().unwrap().to_string()))
            .collect();
        assert_eq!(
            dates,
            vec![
                (3, "2024-03-01".to_string()),
                (2, "2024-02-05".to_string()),
                (1, "2024-01-10".to_string()),
            ]
        );

        let uri = format!("/organizations/Med/students/{}/sessions", id.as_str().unwrap());
        let (_, sessions) = send(&app, Method::GET, &uri, None).await;
        assert_eq!(sessions[0]["date"], "2024-03-01");
        assert_eq!(sessions[1]["date"], "2024-01-10");
    }
}
