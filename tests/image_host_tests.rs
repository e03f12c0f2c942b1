use motivator::BotError;
use motivator::clients::{HttpImageFetcher, ImageFetcher, ImageSource};
use std::time::Duration;
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn fetcher() -> HttpImageFetcher {
    HttpImageFetcher::new(Duration::from_secs(5)).unwrap()
}

#[tokio::test]
async fn test_fetch_returns_body_of_resolved_template() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/1920/1080"))
        .and(query_param("random", "1700000000"))
        .respond_with(
            ResponseTemplate::new(200)
                .insert_header("content-type", "image/jpeg")
                .set_body_bytes(b"\xFF\xD8\xFF\xE0jpeg".to_vec()),
        )
        .expect(1)
        .mount(&server)
        .await;

    let source =
        ImageSource::from_template(&format!("{}/1920/1080?random={{cache}}", server.uri())).unwrap();
    let url = source.resolve("1700000000").unwrap();

    let bytes = fetcher().fetch(&url).await.unwrap();
    assert_eq!(bytes, b"\xFF\xD8\xFF\xE0jpeg".to_vec());
}

#[tokio::test]
async fn test_server_error_is_transient() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(503))
        .mount(&server)
        .await;

    let url = url::Url::parse(&format!("{}/img", server.uri())).unwrap();
    let err = fetcher().fetch(&url).await.unwrap_err();

    assert!(matches!(err, BotError::ImageHost { status: 503, .. }));
    assert!(err.is_transient());
}

#[tokio::test]
async fn test_html_instead_of_image_is_permanent() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .respond_with(
            ResponseTemplate::new(200)
                .insert_header("content-type", "text/html; charset=utf-8")
                .set_body_string("<html>moved</html>"),
        )
        .mount(&server)
        .await;

    let url = url::Url::parse(&format!("{}/img", server.uri())).unwrap();
    let err = fetcher().fetch(&url).await.unwrap_err();

    assert!(matches!(err, BotError::InvalidResponse { .. }));
    assert!(!err.is_transient());
}

#[tokio::test]
async fn test_unreachable_host_is_transient() {
    // Nothing listens on port 9 of localhost in the test environment.
    let url = url::Url::parse("http://127.0.0.1:9/img").unwrap();
    let err = fetcher().fetch(&url).await.unwrap_err();
    assert!(err.is_transient());
}
