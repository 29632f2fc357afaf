#[cfg(test)]
mod tests {
    use axum::body::{to_bytes, Body};
    use axum::http::{header, Request, StatusCode};
    use axum::Router;
    use engage::db::db::Db;
    use engage::db::engagement_logs::EngagementLogs;
    use engage::libs::config::{ImportConfig, ServerConfig};
    use engage::libs::source::FixtureSource;
    use engage::server::{bind, router, AppState};
    use serde_json::Value;
    use test_context::{test_context, AsyncTestContext};
    use tower::ServiceExt;

    const SAMPLE_CSV: &str = "user,user_type,actions,date\nGez,admin,12,2025-07-10\nBob,client,8,2025-07-14\nEve,admin,15,2025-07-12\n";

    struct ServerTestContext {
        state: AppState,
    }

    impl AsyncTestContext for ServerTestContext {
        async fn setup() -> Self {
            let mut logs = EngagementLogs::from_db(Db::open_in_memory().unwrap());
            logs.insert_batch(&FixtureSource::sample().into_records()).unwrap();
            ServerTestContext { state: AppState::new(logs) }
        }
    }

    impl ServerTestContext {
        fn app(&self) -> Router {
            router(self.state.clone(), &ServerConfig::default(), &ImportConfig::default())
        }

        fn empty_app() -> Router {
            let logs = EngagementLogs::from_db(Db::open_in_memory().unwrap());
            router(AppState::new(logs), &ServerConfig::default(), &ImportConfig::default())
        }
    }

    async fn body_string(response: axum::response::Response) -> String {
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        String::from_utf8(bytes.to_vec()).unwrap()
    }

    async fn body_json(response: axum::response::Response) -> Value {
        serde_json::from_str(&body_string(response).await).unwrap()
    }

    fn get(uri: &str) -> Request<Body> {
        Request::builder().uri(uri).body(Body::empty()).unwrap()
    }

    #[test_context(ServerTestContext)]
    #[tokio::test]
    async fn test_health(ctx: &mut ServerTestContext) {
        let response = ctx.app().oneshot(get("/health")).await.unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(body_json(response).await["status"], "ok");
    }

    #[test_context(ServerTestContext)]
    #[tokio::test]
    async fn test_query_by_user_type(ctx: &mut ServerTestContext) {
        let response = ctx.app().oneshot(get("/engagement?user_type=admin")).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let json = body_json(response).await;
        assert_eq!(json["summary"]["active_users"], 2);
        assert_eq!(json["summary"]["engagement_score"], 27);
        assert_eq!(json["summary"]["avg_session_time"], "13m 30s");
        assert_eq!(json["details"][0]["user"], "Gez");
        assert_eq!(json["details"][1]["user"], "Eve");
        assert_eq!(json["details"][1]["date"], "2025-07-12");
    }

    #[test_context(ServerTestContext)]
    #[tokio::test]
    async fn test_query_by_date_range(ctx: &mut ServerTestContext) {
        let response = ctx
            .app()
            .oneshot(get("/engagement?from_date=2025-07-11&to_date=2025-07-13"))
            .await
            .unwrap();

        let json = body_json(response).await;
        assert_eq!(json["summary"]["active_users"], 1);
        assert_eq!(json["summary"]["engagement_score"], 15);
        assert_eq!(json["summary"]["avg_session_time"], "7m 30s");
        assert_eq!(json["details"].as_array().unwrap().len(), 1);
    }

    #[test_context(ServerTestContext)]
    #[tokio::test]
    async fn test_blank_parameters_are_ignored(ctx: &mut ServerTestContext) {
        let response = ctx.app().oneshot(get("/engagement?user_type=&from_date=&to_date=")).await.unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(body_json(response).await["summary"]["active_users"], 3);
    }

    #[test_context(ServerTestContext)]
    #[tokio::test]
    async fn test_bad_date_is_rejected(ctx: &mut ServerTestContext) {
        let response = ctx.app().oneshot(get("/engagement?from_date=07/11/2025")).await.unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert!(body_json(response).await["error"].as_str().unwrap().contains("from_date"));
    }

    #[tokio::test]
    async fn test_empty_store_returns_zeroed_summary() {
        let response = ServerTestContext::empty_app().oneshot(get("/engagement")).await.unwrap();

        let json = body_json(response).await;
        assert_eq!(json["summary"]["active_users"], 0);
        assert_eq!(json["summary"]["engagement_score"], 0);
        assert_eq!(json["summary"]["avg_session_time"], "0m 0s");
        assert_eq!(json["details"], Value::Array(vec![]));
    }

    #[test_context(ServerTestContext)]
    #[tokio::test]
    async fn test_export_headers_and_body(ctx: &mut ServerTestContext) {
        let response = ctx.app().oneshot(get("/engagement/export?user_type=client")).await.unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(response.headers()[header::CONTENT_TYPE], "text/csv");
        assert_eq!(
            response.headers()[header::CONTENT_DISPOSITION],
            "attachment; filename=engagement_export.csv"
        );
        assert_eq!(body_string(response).await, "user,user_type,actions,date\nBob,client,8,2025-07-14\n");
    }

    #[tokio::test]
    async fn test_import_raw_body_then_query() {
        let app = ServerTestContext::empty_app();
        let request = Request::builder()
            .method("POST")
            .uri("/engagement/import")
            .header(header::CONTENT_TYPE, "text/csv")
            .body(Body::from(SAMPLE_CSV))
            .unwrap();

        let response = app.clone().oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let json = body_json(response).await;
        assert_eq!(json["imported_count"], 3);
        assert_eq!(json["message"], "Successfully imported 3 rows.");
        assert_eq!(json["skipped_rows"], Value::Array(vec![]));

        let response = app.oneshot(get("/engagement?user_type=admin")).await.unwrap();
        assert_eq!(body_json(response).await["summary"]["engagement_score"], 27);
    }

    #[tokio::test]
    async fn test_import_multipart_with_bad_row() {
        let app = ServerTestContext::empty_app();
        let boundary = "engage-test-boundary";
        let body = format!(
            "--{b}\r\nContent-Disposition: form-data; name=\"file\"; filename=\"logs.csv\"\r\nContent-Type: text/csv\r\n\r\n{csv}\r\n--{b}--\r\n",
            b = boundary,
            csv = "user,user_type,actions,date\nGez,admin,12,2025-07-10\nBob,client,abc,2025-07-14\nEve,admin,15,2025-07-12\n"
        );
        let request = Request::builder()
            .method("POST")
            .uri("/engagement/import")
            .header(header::CONTENT_TYPE, format!("multipart/form-data; boundary={}", boundary))
            .body(Body::from(body))
            .unwrap();

        let response = app.clone().oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let json = body_json(response).await;
        assert_eq!(json["imported_count"], 2);
        assert_eq!(json["message"], "Successfully imported 2 rows.");
        assert_eq!(json["skipped_rows"][0]["row_index"], 2);

        let response = app.oneshot(get("/engagement")).await.unwrap();
        assert_eq!(body_json(response).await["summary"]["active_users"], 2);
    }

    #[tokio::test]
    async fn test_import_without_date_column_is_rejected() {
        let app = ServerTestContext::empty_app();
        let request = Request::builder()
            .method("POST")
            .uri("/engagement/import")
            .body(Body::from("user,user_type,actions\nGez,admin,12\n"))
            .unwrap();

        let response = app.clone().oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert!(body_json(response).await["error"].as_str().unwrap().contains("date"));

        let response = app.oneshot(get("/engagement")).await.unwrap();
        assert_eq!(body_json(response).await["summary"]["active_users"], 0);
    }

    #[test_context(ServerTestContext)]
    #[tokio::test]
    async fn test_get_log(ctx: &mut ServerTestContext) {
        let response = ctx.app().oneshot(get("/engagement/logs/1")).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let json = body_json(response).await;
        assert_eq!(json["id"], 1);
        assert_eq!(json["user"], "Gez");
        assert_eq!(json["actions"], 12);
    }

    #[test_context(ServerTestContext)]
    #[tokio::test]
    async fn test_missing_log_is_not_found(ctx: &mut ServerTestContext) {
        let response = ctx.app().oneshot(get("/engagement/logs/999")).await.unwrap();

        assert_eq!(response.status(), StatusCode::NOT_FOUND);
        assert_eq!(body_json(response).await["error"], "engagement log 999 not found");
    }

    #[test_context(ServerTestContext)]
    #[tokio::test]
    async fn test_cors_preflight(ctx: &mut ServerTestContext) {
        let request = Request::builder()
            .method("OPTIONS")
            .uri("/engagement")
            .header(header::ORIGIN, "http://localhost:3000")
            .header(header::ACCESS_CONTROL_REQUEST_METHOD, "GET")
            .body(Body::empty())
            .unwrap();

        let response = ctx.app().oneshot(request).await.unwrap();
        assert_eq!(response.headers()[header::ACCESS_CONTROL_ALLOW_ORIGIN], "*");
    }

    #[test_context(ServerTestContext)]
    #[tokio::test]
    async fn test_repeated_query_parameter_is_json_error(ctx: &mut ServerTestContext) {
        let response = ctx.app().oneshot(get("/engagement?user_type=admin&user_type=client")).await.unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert!(body_json(response).await["error"].is_string());
    }

    #[test_context(ServerTestContext)]
    #[tokio::test]
    async fn test_non_numeric_log_id_is_json_error(ctx: &mut ServerTestContext) {
        let response = ctx.app().oneshot(get("/engagement/logs/abc")).await.unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert!(body_json(response).await["error"].is_string());
    }

    #[test_context(ServerTestContext)]
    #[tokio::test]
    async fn test_unknown_route_is_json_error(ctx: &mut ServerTestContext) {
        let response = ctx.app().oneshot(get("/nothing/here")).await.unwrap();

        assert_eq!(response.status(), StatusCode::NOT_FOUND);
        assert_eq!(body_json(response).await["error"], "no route for /nothing/here");
    }

    #[tokio::test]
    async fn test_oversized_upload_is_json_error() {
        let logs = EngagementLogs::from_db(Db::open_in_memory().unwrap());
        let app = router(AppState::new(logs), &ServerConfig::default(), &ImportConfig { max_upload_bytes: 16 });
        let request = Request::builder()
            .method("POST")
            .uri("/engagement/import")
            .body(Body::from(SAMPLE_CSV))
            .unwrap();

        let response = app.oneshot(request).await.unwrap();

        assert_eq!(response.status(), StatusCode::PAYLOAD_TOO_LARGE);
        assert!(body_json(response).await["error"].is_string());
    }

    #[tokio::test]
    async fn test_bind_resolves_host_names() {
        let server = ServerConfig {
            host: "localhost".to_string(),
            port: 0,
            allow_any_origin: false,
        };

        let listener = bind(&server).await.unwrap();
        assert!(listener.local_addr().unwrap().ip().is_loopback());
    }
}
