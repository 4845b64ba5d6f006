use axum::http::{self, Request, StatusCode};
use http_body_util::BodyExt;
use mock_server::{app, Echo, Post, User, DATA_TXT, DATA_XML};
use tower::ServiceExt;

async fn body_json<T: serde::de::DeserializeOwned>(response: axum::response::Response) -> T {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

async fn body_bytes(response: axum::response::Response) -> bytes::Bytes {
    response.into_body().collect().await.unwrap().to_bytes()
}

fn json_request(method: &str, uri: &str, body: &str) -> Request<String> {
    Request::builder()
        .method(method)
        .uri(uri)
        .header(http::header::CONTENT_TYPE, "application/json")
        .body(body.to_string())
        .unwrap()
}

fn empty_request(method: &str, uri: &str) -> Request<String> {
    Request::builder()
        .method(method)
        .uri(uri)
        .body(String::new())
        .unwrap()
}

// --- users ---

#[tokio::test]
async fn list_users_returns_seeded_user() {
    let resp = app().oneshot(empty_request("GET", "/users")).await.unwrap();

    assert_eq!(resp.status(), StatusCode::OK);
    let users: Vec<User> = body_json(resp).await;
    assert_eq!(users.len(), 1);
    assert_eq!(users[0].id, 1);
}

#[tokio::test]
async fn create_user_returns_201_with_fresh_id() {
    let resp = app()
        .oneshot(json_request(
            "POST",
            "/users",
            r#"{"name":"Hameed","job":"Web Developer","id":99}"#,
        ))
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::CREATED);
    let user: User = body_json(resp).await;
    assert_eq!(user.id, 2);
    assert_eq!(user.fields["name"], "Hameed");
    assert_eq!(user.fields["job"], "Web Developer");
}

#[tokio::test]
async fn create_user_rejects_non_object_body() {
    let resp = app()
        .oneshot(json_request("POST", "/users", "[1,2]"))
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::UNPROCESSABLE_ENTITY);
}

#[tokio::test]
async fn get_user_not_found() {
    let resp = app().oneshot(empty_request("GET", "/users/42")).await.unwrap();
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn get_user_bad_id_returns_400() {
    let resp = app().oneshot(empty_request("GET", "/users/abc")).await.unwrap();
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn put_replaces_fields() {
    let resp = app()
        .oneshot(json_request("PUT", "/users/1", r#"{"name":"Ervin"}"#))
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::OK);
    let user: User = body_json(resp).await;
    assert_eq!(user.fields["name"], "Ervin");
    assert!(!user.fields.contains_key("username"));
}

#[tokio::test]
async fn patch_merges_fields() {
    let resp = app()
        .oneshot(json_request("PATCH", "/users/1", r#"{"name":"Ervin"}"#))
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::OK);
    let user: User = body_json(resp).await;
    assert_eq!(user.fields["name"], "Ervin");
    assert_eq!(user.fields["username"], "Bret");
}

#[tokio::test]
async fn patch_missing_user_returns_404() {
    let resp = app()
        .oneshot(json_request("PATCH", "/users/42", "{}"))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn delete_user_then_missing() {
    let app = app();
    let resp = app.clone().oneshot(empty_request("DELETE", "/users/1")).await.unwrap();
    assert_eq!(resp.status(), StatusCode::OK);
    assert_eq!(&body_bytes(resp).await[..], b"{}");

    let resp = app.oneshot(empty_request("DELETE", "/users/1")).await.unwrap();
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
}

// --- posts & text ---

#[tokio::test]
async fn get_post_returns_fixed_post() {
    let resp = app().oneshot(empty_request("GET", "/posts/1")).await.unwrap();

    assert_eq!(resp.status(), StatusCode::OK);
    let post: Post = body_json(resp).await;
    assert_eq!(post.user_id, 1);
    assert_eq!(post.id, 1);
}

#[tokio::test]
async fn get_post_out_of_range_returns_404() {
    let resp = app().oneshot(empty_request("GET", "/posts/4")).await.unwrap();
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn data_txt_is_plain_text() {
    let resp = app().oneshot(empty_request("GET", "/data.txt")).await.unwrap();

    assert_eq!(resp.status(), StatusCode::OK);
    assert_eq!(resp.headers()[http::header::CONTENT_TYPE], "text/plain");
    assert_eq!(&body_bytes(resp).await[..], DATA_TXT.as_bytes());
}

#[tokio::test]
async fn data_json_is_json_object() {
    let resp = app().oneshot(empty_request("GET", "/data.json")).await.unwrap();

    assert_eq!(resp.status(), StatusCode::OK);
    let value: serde_json::Value = body_json(resp).await;
    assert_eq!(value["name"], "Hameed");
    assert_eq!(value["age"], 24);
}

#[tokio::test]
async fn data_xml_is_xml_text() {
    let resp = app().oneshot(empty_request("GET", "/data.xml")).await.unwrap();

    assert_eq!(resp.status(), StatusCode::OK);
    assert_eq!(resp.headers()[http::header::CONTENT_TYPE], "application/xml");
    assert_eq!(&body_bytes(resp).await[..], DATA_XML.as_bytes());
}

// --- echo, status, malformed ---

#[tokio::test]
async fn echo_reports_method_headers_and_raw_body() {
    let raw = r#"{"name":"Hameed","job":"Web Developer"}"#;
    let resp = app().oneshot(json_request("POST", "/echo", raw)).await.unwrap();

    assert_eq!(resp.status(), StatusCode::OK);
    let echo: Echo = body_json(resp).await;
    assert_eq!(echo.method, "POST");
    assert_eq!(echo.path, "/echo");
    assert_eq!(echo.headers["content-type"], "application/json");
    assert_eq!(echo.body, raw);
}

#[tokio::test]
async fn status_route_returns_requested_code() {
    for code in [200u16, 204, 404, 418, 500, 503] {
        let resp = app()
            .oneshot(empty_request("POST", &format!("/status/{code}")))
            .await
            .unwrap();
        assert_eq!(resp.status().as_u16(), code);
    }
}

#[tokio::test]
async fn status_route_rejects_informational_and_redirect_codes() {
    for code in [101u16, 302, 999] {
        let resp = app()
            .oneshot(empty_request("GET", &format!("/status/{code}")))
            .await
            .unwrap();
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    }
}

#[tokio::test]
async fn malformed_claims_json_but_is_not() {
    let resp = app().oneshot(empty_request("GET", "/malformed")).await.unwrap();

    assert_eq!(resp.status(), StatusCode::OK);
    assert_eq!(resp.headers()[http::header::CONTENT_TYPE], "application/json");
    let bytes = body_bytes(resp).await;
    assert!(serde_json::from_slice::<serde_json::Value>(&bytes).is_err());
}
