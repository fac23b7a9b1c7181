// Diagnostics scraping over HTTP

use super::test_utils::{
    client, diagnostics_page, endpoints, field_names, mount_diagnostics, mount_login_page,
    session, TEST_PASSWORD, TEST_TOKEN,
};
use wavemaker_stats::services::{RouterError, SignalSource};
use wiremock::{
    matchers::{header, method, path},
    Mock, MockServer, ResponseTemplate,
};

#[tokio::test]
async fn test_poll_single_field() {
    let server = MockServer::start().await;
    mount_diagnostics(&server, 200, r#"<div class="input" id="band">B3</div>"#, 1).await;

    let record = session()
        .poll(&endpoints(&server).diagnostics, &field_names(&["band"]))
        .await
        .expect("poll should succeed");

    assert_eq!(record.values().len(), 1);
    assert_eq!(record.get("band"), "B3");
}

#[tokio::test]
async fn test_poll_missing_fields_render_empty() {
    let server = MockServer::start().await;
    mount_diagnostics(&server, 200, &diagnostics_page(), 1).await;

    let fields = field_names(&["band", "internetStatusSNR", "bandwidth"]);
    let record = session()
        .poll(&endpoints(&server).diagnostics, &fields)
        .await
        .expect("poll should succeed");

    assert!(!record.values().contains_key("internetStatusSNR"));
    assert_eq!(record.get("bandwidth"), "20 MHz");
    let row = record.to_row(&fields);
    assert!(row.ends_with(r#","B3","","20 MHz""#), "unexpected row {row}");
}

#[tokio::test]
async fn test_poll_non_200_fails() {
    let server = MockServer::start().await;
    mount_diagnostics(&server, 500, &diagnostics_page(), 1).await;

    let result = session()
        .poll(&endpoints(&server).diagnostics, &field_names(&["band"]))
        .await;

    assert!(matches!(result, Err(RouterError::UnexpectedStatus { .. })));
}

#[tokio::test]
async fn test_poll_twice_is_stable() {
    let server = MockServer::start().await;
    mount_diagnostics(&server, 200, &diagnostics_page(), 2).await;

    let session = session();
    let fields = field_names(&["internetStatus4G", "band", "internetStatus4gRSSI"]);
    let url = endpoints(&server).diagnostics;

    let first = session.poll(&url, &fields).await.expect("first poll");
    let second = session.poll(&url, &fields).await.expect("second poll");

    assert_eq!(first.values(), second.values());
}

#[tokio::test]
async fn test_session_cookie_carried_to_diagnostics() {
    let server = MockServer::start().await;
    mount_login_page(&server, TEST_TOKEN, 1).await;
    Mock::given(method("POST"))
        .and(path("/submitLogin/"))
        .respond_with(
            ResponseTemplate::new(200).insert_header("set-cookie", "sessionId=xyz789; Path=/"),
        )
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/diagnostics/"))
        .and(header("cookie", "sessionId=xyz789"))
        .respond_with(ResponseTemplate::new(200).set_body_string(diagnostics_page()))
        .expect(1)
        .mount(&server)
        .await;

    let mut router = client(&server, TEST_PASSWORD);
    router.connect().await.expect("login should succeed");
    let record = router
        .poll(&field_names(&["internetStatusTech"]))
        .await
        .expect("authenticated poll should succeed");

    assert_eq!(record.get("internetStatusTech"), "LTE");
}
