#![allow(clippy::unwrap_used)]
// Integration tests for `Client` against a wiremock daemon.

use std::sync::Arc;

use pretty_assertions::assert_eq;
use secrecy::{ExposeSecret, SecretString};
use serde_json::json;
use wiremock::matchers::{body_json, body_string_contains, header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

use qbitctl_api::{
    AddTorrentOptions, Args, Client, Error, Payload, SessionCookie, TorrentListQuery, catalog,
};

// ── Helpers ─────────────────────────────────────────────────────────

async fn setup() -> (MockServer, Client) {
    let server = MockServer::start().await;
    let client = Client::with_client(reqwest::Client::new(), &server.uri(), None).unwrap();
    (server, client)
}

async fn setup_with_cookie(value: &str) -> (MockServer, Client) {
    let server = MockServer::start().await;
    let cookie = SessionCookie::new("SID", value);
    let client = Client::with_client(reqwest::Client::new(), &server.uri(), Some(cookie)).unwrap();
    (server, client)
}

fn api(suffix: &str) -> String {
    format!("/api/v2{suffix}")
}

fn password(s: &str) -> SecretString {
    s.to_string().into()
}

async fn stored_value(client: &Client) -> Option<String> {
    client
        .current_credential()
        .await
        .map(|c| c.value().expose_secret().to_owned())
}

// ── Authentication ──────────────────────────────────────────────────

#[tokio::test]
async fn test_login_stores_session_cookie() {
    let (server, client) = setup().await;

    Mock::given(method("POST"))
        .and(path(api("/auth/login")))
        .and(body_string_contains("username=admin"))
        .and(body_string_contains("password=adminadmin"))
        .respond_with(
            ResponseTemplate::new(200)
                .insert_header("set-cookie", "SID=abc123; HttpOnly; path=/")
                .set_body_string("Ok."),
        )
        .mount(&server)
        .await;

    client.login("admin", &password("adminadmin")).await.unwrap();

    let cookie = client.current_credential().await.unwrap();
    assert_eq!(cookie.name(), "SID");
    assert_eq!(cookie.value().expose_secret(), "abc123");
    assert_eq!(cookie.path(), Some("/"));
    assert!(cookie.http_only());
}

#[tokio::test]
async fn test_login_rejected_keeps_prior_credential() {
    let (server, client) = setup_with_cookie("old").await;

    Mock::given(method("POST"))
        .and(path(api("/auth/login")))
        .respond_with(ResponseTemplate::new(401))
        .mount(&server)
        .await;

    let result = client.login("admin", &password("wrong")).await;

    assert!(
        matches!(result, Err(Error::AuthenticationFailed { status: 401, .. })),
        "expected AuthenticationFailed(401), got: {result:?}"
    );
    assert_eq!(stored_value(&client).await.as_deref(), Some("old"));
}

#[tokio::test]
async fn test_login_banned_ip() {
    let (server, client) = setup().await;

    Mock::given(method("POST"))
        .and(path(api("/auth/login")))
        .respond_with(ResponseTemplate::new(403).set_body_string("Forbidden"))
        .mount(&server)
        .await;

    let err = client.login("admin", &password("x")).await.unwrap_err();

    assert!(err.is_auth_failure());
    assert_eq!(err.status(), Some(403));
    assert!(err.to_string().contains("banned"), "got: {err}");
}

#[tokio::test]
async fn test_login_fails_body_is_rejected() {
    let (server, client) = setup().await;

    Mock::given(method("POST"))
        .and(path(api("/auth/login")))
        .respond_with(ResponseTemplate::new(200).set_body_string("Fails."))
        .mount(&server)
        .await;

    let result = client.login("admin", &password("wrong")).await;

    assert!(
        matches!(result, Err(Error::AuthenticationFailed { status: 200, .. })),
        "expected AuthenticationFailed(200), got: {result:?}"
    );
    assert!(!client.is_authenticated().await);
}

#[tokio::test]
async fn test_login_without_cookie_is_protocol_error() {
    let (server, client) = setup().await;

    Mock::given(method("POST"))
        .and(path(api("/auth/login")))
        .respond_with(ResponseTemplate::new(200).set_body_string("Ok."))
        .mount(&server)
        .await;

    let result = client.login("admin", &password("adminadmin")).await;

    assert!(
        matches!(result, Err(Error::Protocol { operation: "Login", .. })),
        "expected Protocol error, got: {result:?}"
    );
    assert!(!client.is_authenticated().await);
}

#[tokio::test]
async fn test_logout_clears_credential() {
    let (server, client) = setup().await;

    Mock::given(method("POST"))
        .and(path(api("/auth/login")))
        .respond_with(
            ResponseTemplate::new(200)
                .insert_header("set-cookie", "SID=abc123; path=/")
                .set_body_string("Ok."),
        )
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path(api("/auth/logout")))
        .and(header("cookie", "SID=abc123"))
        .respond_with(ResponseTemplate::new(200))
        .mount(&server)
        .await;

    client.login("admin", &password("adminadmin")).await.unwrap();
    assert!(client.is_authenticated().await);

    client.logout().await.unwrap();
    assert!(client.current_credential().await.is_none());
}

#[tokio::test]
async fn test_logout_failure_keeps_credential() {
    let (server, client) = setup_with_cookie("abc").await;

    Mock::given(method("POST"))
        .and(path(api("/auth/logout")))
        .respond_with(ResponseTemplate::new(500))
        .mount(&server)
        .await;

    let err = client.logout().await.unwrap_err();

    assert!(matches!(err, Error::AuthenticationFailed { status: 500, .. }));
    assert_eq!(stored_value(&client).await.as_deref(), Some("abc"));
}

#[tokio::test]
async fn test_execute_login_stores_session_cookie() {
    let (server, client) = setup().await;

    Mock::given(method("POST"))
        .and(path(api("/auth/login")))
        .and(body_string_contains("username=admin"))
        .respond_with(
            ResponseTemplate::new(200)
                .insert_header("set-cookie", "SID=xyz789; path=/")
                .set_body_string("Ok."),
        )
        .mount(&server)
        .await;

    let args = Args::new()
        .text("username", "admin")
        .text("password", "adminadmin");
    let payload = client.execute(&catalog::LOGIN, &args).await.unwrap();

    assert_eq!(payload, Payload::Empty);
    assert_eq!(stored_value(&client).await.as_deref(), Some("xyz789"));
}

#[tokio::test]
async fn test_execute_login_fails_body_is_rejected() {
    let (server, client) = setup().await;

    Mock::given(method("POST"))
        .and(path(api("/auth/login")))
        .respond_with(ResponseTemplate::new(200).set_body_string("Fails."))
        .mount(&server)
        .await;

    let args = Args::new().text("username", "admin").text("password", "wrong");
    let result = client.execute(&catalog::LOGIN, &args).await;

    assert!(
        matches!(result, Err(Error::AuthenticationFailed { status: 200, .. })),
        "expected AuthenticationFailed(200), got: {result:?}"
    );
    assert!(!client.is_authenticated().await);
}

#[tokio::test]
async fn test_execute_login_without_password_sends_nothing() {
    let (server, client) = setup().await;

    Mock::given(method("POST"))
        .and(path(api("/auth/login")))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&server)
        .await;

    let args = Args::new().text("username", "admin");
    let err = client.execute(&catalog::LOGIN, &args).await.unwrap_err();

    assert!(err.is_construction(), "got: {err:?}");
}

#[tokio::test]
async fn test_execute_logout_clears_credential() {
    let (server, client) = setup_with_cookie("abc").await;

    Mock::given(method("POST"))
        .and(path(api("/auth/logout")))
        .and(header("cookie", "SID=abc"))
        .respond_with(ResponseTemplate::new(200))
        .mount(&server)
        .await;

    let endpoint = catalog::find("logout").unwrap();
    client.execute(endpoint, &Args::new()).await.unwrap();

    assert!(client.current_credential().await.is_none());
}

// ── Cookie attachment ───────────────────────────────────────────────

#[tokio::test]
async fn test_requests_carry_session_cookie() {
    let (server, client) = setup_with_cookie("abc123").await;

    Mock::given(method("GET"))
        .and(path(api("/app/version")))
        .and(header("cookie", "SID=abc123"))
        .respond_with(ResponseTemplate::new(200).set_body_string("v4.6.2"))
        .mount(&server)
        .await;

    assert_eq!(client.application_version().await.unwrap(), "v4.6.2");
}

#[tokio::test]
async fn test_request_without_cookie_is_still_sent() {
    let (server, client) = setup().await;

    Mock::given(method("GET"))
        .and(path(api("/app/version")))
        .respond_with(ResponseTemplate::new(403).set_body_string("Forbidden"))
        .mount(&server)
        .await;

    let err = client.application_version().await.unwrap_err();

    match &err {
        Error::RequestFailed {
            operation,
            status,
            body,
        } => {
            assert_eq!(*operation, "GetApplicationVersion");
            assert_eq!(*status, 403);
            assert_eq!(body, "Forbidden");
        }
        other => panic!("expected RequestFailed, got: {other:?}"),
    }
    assert!(err.is_auth_failure());

    let requests = server.received_requests().await.unwrap();
    assert_eq!(requests.len(), 1);
    assert!(!requests[0].headers.contains_key("cookie"));
}

// ── Status handling ─────────────────────────────────────────────────

#[tokio::test]
async fn test_status_only_operation_succeeds_on_200() {
    let (server, client) = setup_with_cookie("abc").await;

    Mock::given(method("POST"))
        .and(path(api("/transfer/toggleSpeedLimitsMode")))
        .respond_with(ResponseTemplate::new(200))
        .mount(&server)
        .await;

    client.toggle_alternative_speed_limits().await.unwrap();
}

#[tokio::test]
async fn test_status_only_operation_reports_exact_status() {
    let (server, client) = setup_with_cookie("abc").await;

    Mock::given(method("POST"))
        .and(path(api("/torrents/setLocation")))
        .respond_with(ResponseTemplate::new(409).set_body_string("Cannot write to directory"))
        .mount(&server)
        .await;

    let err = client.set_location(&["h1"], "/readonly").await.unwrap_err();

    assert_eq!(err.status(), Some(409));
    assert_eq!(err.operation(), Some("SetTorrentLocation"));
    assert!(!err.is_auth_failure());
}

#[tokio::test]
async fn test_construction_error_sends_nothing() {
    let (server, client) = setup_with_cookie("abc").await;

    let err = client
        .execute(&catalog::PAUSE_TORRENTS, &Args::new())
        .await
        .unwrap_err();

    assert!(err.is_construction());
    assert!(server.received_requests().await.unwrap().is_empty());
}

#[tokio::test]
async fn test_connection_refused_is_transport_error() {
    let client = Client::new("http://127.0.0.1:1").unwrap();

    let err = client.application_version().await.unwrap_err();

    assert!(matches!(err, Error::Transport(_)));
    assert!(err.is_connect());
}

// ── Parameter encoding ──────────────────────────────────────────────

#[tokio::test]
async fn test_pause_and_resume_join_hashes_with_pipe() {
    let (server, client) = setup_with_cookie("abc").await;

    for op in ["pause", "resume"] {
        Mock::given(method("POST"))
            .and(path(api(&format!("/torrents/{op}"))))
            .and(body_string_contains("hashes=h1%7Ch2"))
            .respond_with(ResponseTemplate::new(200))
            .expect(1)
            .mount(&server)
            .await;
    }

    client.pause_torrents(&["h1", "h2"]).await.unwrap();
    client.resume_torrents(&["h1", "h2"]).await.unwrap();
}

#[tokio::test]
async fn test_tags_are_comma_separated() {
    let (server, client) = setup_with_cookie("abc").await;

    Mock::given(method("POST"))
        .and(path(api("/torrents/addTags")))
        .and(body_string_contains("hashes=h1"))
        .and(body_string_contains("tags=linux%2Ciso"))
        .respond_with(ResponseTemplate::new(200))
        .expect(1)
        .mount(&server)
        .await;

    client.add_tags(&["h1"], &["linux", "iso"]).await.unwrap();
}

#[tokio::test]
async fn test_add_torrents_sends_newline_urls_and_options() {
    let (server, client) = setup_with_cookie("abc").await;

    Mock::given(method("POST"))
        .and(path(api("/torrents/add")))
        .and(body_string_contains("urls=u1%0Au2"))
        .and(body_string_contains("savepath=%2Fdata"))
        .and(body_string_contains("paused=true"))
        .respond_with(ResponseTemplate::new(200).set_body_string("Ok."))
        .expect(1)
        .mount(&server)
        .await;

    let options = AddTorrentOptions {
        save_path: Some("/data".into()),
        paused: Some(true),
        ..Default::default()
    };
    client.add_torrents(&["u1", "u2"], &options).await.unwrap();
}

#[tokio::test]
async fn test_torrent_list_sends_query_filters() {
    let (server, client) = setup_with_cookie("abc").await;

    Mock::given(method("GET"))
        .and(path(api("/torrents/info")))
        .and(query_param("filter", "seeding"))
        .and(query_param("hashes", "h1|h2"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            { "hash": "h2", "name": "second" },
            { "hash": "h1", "name": "first" }
        ])))
        .mount(&server)
        .await;

    let torrents = client
        .torrent_list(TorrentListQuery {
            filter: Some("seeding".into()),
            hashes: vec!["h1".into(), "h2".into()],
            ..Default::default()
        })
        .await
        .unwrap();

    let names: Vec<_> = torrents.iter().map(|t| t["name"].clone()).collect();
    assert_eq!(names, vec![json!("second"), json!("first")]);
}

#[tokio::test]
async fn test_set_preferences_sends_json_body() {
    let (server, client) = setup_with_cookie("abc").await;

    Mock::given(method("POST"))
        .and(path(api("/app/setPreferences")))
        .and(body_json(json!({ "dl_limit": 1024, "save_path": "/data" })))
        .respond_with(ResponseTemplate::new(200))
        .expect(1)
        .mount(&server)
        .await;

    let prefs = json!({ "dl_limit": 1024, "save_path": "/data" });
    client
        .set_application_preferences(prefs.as_object().unwrap().clone())
        .await
        .unwrap();
}

#[tokio::test]
async fn test_rss_rule_definition_is_json_text() {
    let (server, client) = setup_with_cookie("abc").await;

    Mock::given(method("POST"))
        .and(path(api("/rss/setRule")))
        .and(body_string_contains("ruleName=linux"))
        .and(body_string_contains("ruleDef=%7B%22enabled%22%3Atrue%7D"))
        .respond_with(ResponseTemplate::new(200))
        .expect(1)
        .mount(&server)
        .await;

    client
        .rss_set_rule("linux", json!({ "enabled": true }))
        .await
        .unwrap();
}

// ── Response decoding ───────────────────────────────────────────────

#[tokio::test]
async fn test_alternative_speed_limits_state() {
    let (server, client) = setup_with_cookie("abc").await;

    Mock::given(method("GET"))
        .and(path(api("/transfer/speedLimitsMode")))
        .respond_with(ResponseTemplate::new(200).set_body_string("1"))
        .up_to_n_times(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path(api("/transfer/speedLimitsMode")))
        .respond_with(ResponseTemplate::new(200).set_body_string("0"))
        .up_to_n_times(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path(api("/transfer/speedLimitsMode")))
        .respond_with(ResponseTemplate::new(200).set_body_string("yes"))
        .mount(&server)
        .await;

    assert!(client.alternative_speed_limits_enabled().await.unwrap());
    assert!(!client.alternative_speed_limits_enabled().await.unwrap());
    let err = client.alternative_speed_limits_enabled().await.unwrap_err();
    assert!(matches!(err, Error::Decode { .. }), "got: {err:?}");
}

#[tokio::test]
async fn test_global_download_limit_is_integer() {
    let (server, client) = setup_with_cookie("abc").await;

    Mock::given(method("GET"))
        .and(path(api("/transfer/downloadLimit")))
        .respond_with(ResponseTemplate::new(200).set_body_string("1048576"))
        .mount(&server)
        .await;

    assert_eq!(client.global_download_limit().await.unwrap(), 1_048_576);
}

#[tokio::test]
async fn test_object_shape_mismatch_is_decode_error() {
    let (server, client) = setup_with_cookie("abc").await;

    Mock::given(method("GET"))
        .and(path(api("/app/preferences")))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html>login</html>"))
        .mount(&server)
        .await;

    match client.application_preferences().await.unwrap_err() {
        Error::Decode {
            operation, body, ..
        } => {
            assert_eq!(operation, "GetApplicationPreferences");
            assert_eq!(body, "<html>login</html>");
        }
        other => panic!("expected Decode, got: {other:?}"),
    }
}

#[tokio::test]
async fn test_start_search_returns_job_id() {
    let (server, client) = setup_with_cookie("abc").await;

    Mock::given(method("POST"))
        .and(path(api("/search/start")))
        .and(body_string_contains("pattern=ubuntu"))
        .and(body_string_contains("plugins=all"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "id": 12345 })))
        .mount(&server)
        .await;

    let id = client.start_search("ubuntu", &["all"], "all").await.unwrap();
    assert_eq!(id, 12345);
}

#[tokio::test]
async fn test_generic_execute_through_catalog_lookup() {
    let (server, client) = setup_with_cookie("abc").await;

    Mock::given(method("GET"))
        .and(path(api("/torrents/tags")))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!(["iso", "linux"])))
        .mount(&server)
        .await;

    let endpoint = catalog::find("getalltags").unwrap();
    let payload = client.execute(endpoint, &Args::new()).await.unwrap();

    assert_eq!(payload, Payload::Scalars(vec![json!("iso"), json!("linux")]));
}

// ── Concurrency ─────────────────────────────────────────────────────

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_concurrent_login_never_tears_credential() {
    let (server, client) = setup_with_cookie("a").await;
    let client = Arc::new(client);

    Mock::given(method("POST"))
        .and(path(api("/auth/login")))
        .respond_with(
            ResponseTemplate::new(200)
                .insert_header("set-cookie", "SID=b; path=/")
                .set_body_string("Ok."),
        )
        .mount(&server)
        .await;
    for value in ["SID=a", "SID=b"] {
        Mock::given(method("GET"))
            .and(path(api("/app/version")))
            .and(header("cookie", value))
            .respond_with(ResponseTemplate::new(200).set_body_string("v4.6.2"))
            .mount(&server)
            .await;
    }

    let mut tasks = Vec::new();
    for _ in 0..16 {
        let client = Arc::clone(&client);
        tasks.push(tokio::spawn(async move { client.application_version().await }));
    }
    let login = {
        let client = Arc::clone(&client);
        tokio::spawn(async move { client.login("admin", &password("adminadmin")).await })
    };

    login.await.unwrap().unwrap();
    for result in futures::future::join_all(tasks).await {
        assert_eq!(result.unwrap().unwrap(), "v4.6.2");
    }
    assert_eq!(stored_value(&client).await.as_deref(), Some("b"));
}
