use anyhow::Result;
use axum::Router;
use axum::body::Body;
use axum::http::{Request, StatusCode};
use tower::ServiceExt;

use appsense::api::SearchClient;
use appsense::web::{AppState, create_router};

mod common;
use common::*;

fn router_for(base: &str) -> Result<Router> {
    let state = AppState {
        client: SearchClient::new(base)?,
        max_results: None,
    };
    Ok(create_router(state, "static"))
}

async fn get_page(app: Router, uri: &str) -> Result<(StatusCode, String)> {
    let response = app
        .oneshot(Request::builder().uri(uri).body(Body::empty())?)
        .await?;
    let status = response.status();
    let body = axum::body::to_bytes(response.into_body(), usize::MAX).await?;
    Ok((status, String::from_utf8(body.to_vec())?))
}

#[tokio::test]
async fn test_home_and_about_pages() -> Result<()> {
    let app = router_for("http://localhost:8000")?;

    let (status, html) = get_page(app.clone(), "/").await?;
    assert_eq!(status, StatusCode::OK);
    assert!(html.contains("Akıllı Uygulama"));
    assert!(html.contains(r#"<a href="/search">Arama</a>"#));
    assert!(html.contains(r#"<a href="/about">Hakkında</a>"#));
    assert!(html.contains("site-footer"));

    let (status, html) = get_page(app, "/about").await?;
    assert_eq!(status, StatusCode::OK);
    assert!(html.contains("AppSense Hakkında"));
    Ok(())
}

#[tokio::test]
async fn test_stylesheet_is_served() -> Result<()> {
    let app = router_for("http://localhost:8000")?;
    let (status, css) = get_page(app, "/static/app.css").await?;
    assert_eq!(status, StatusCode::OK);
    assert!(css.contains(".site-header"));
    Ok(())
}

#[tokio::test]
async fn test_example_link_fills_form_without_searching() -> Result<()> {
    let mock = spawn_mock_api(MockReply::Json(sample_response("x", 3, None))).await?;
    let app = router_for(&mock.base)?;

    let (status, html) = get_page(
        app,
        "/search?query=Offline%20%C3%A7al%C4%B1%C5%9Fan%20GPS%20navigasyon&category=",
    )
    .await?;

    assert_eq!(status, StatusCode::OK);
    assert!(html.contains(r#"value="Offline çalışan GPS navigasyon""#));
    assert!(html.contains("Örnek Arama Sorguları"));
    assert!(!html.contains("sonuç bulundu"));
    assert_eq!(mock.hits(), 0);
    Ok(())
}

#[tokio::test]
async fn test_submitted_search_renders_results_and_analysis() -> Result<()> {
    let query = "Fitness için kalori takip uygulaması";
    let mock = spawn_mock_api(MockReply::Json(sample_response(
        query,
        3,
        Some("**Öneri:** X uygulaması"),
    )))
    .await?;
    let app = router_for(&mock.base)?;

    let uri = format!(
        "/search?query={}&category=&submit=1",
        urlencoding::encode(query)
    );
    let (status, html) = get_page(app, &uri).await?;

    assert_eq!(status, StatusCode::OK);
    assert!(html.contains("3 sonuç bulundu"));
    assert_eq!(html.matches(r#"class="card result""#).count(), 3);
    assert!(html.contains("%91 eşleşme"));
    assert!(html.contains("<strong>Öneri:</strong> X uygulaması"));
    assert!(!html.contains("**Öneri:**"));
    assert!(!html.contains("Örnek Arama Sorguları"));

    assert_eq!(mock.hits(), 1);
    let params = mock.last_params();
    assert_eq!(params.get("query").map(String::as_str), Some(query));
    assert_eq!(params.get("category").map(String::as_str), Some(""));
    Ok(())
}

#[tokio::test]
async fn test_submitted_search_with_category() -> Result<()> {
    let mock = spawn_mock_api(MockReply::Json(sample_response("koşu", 1, None))).await?;
    let app = router_for(&mock.base)?;

    let (_, html) = get_page(app, "/search?query=ko%C5%9Fu&category=Fitness&submit=1").await?;

    assert!(html.contains(r#"<option value="Fitness" selected>Fitness</option>"#));
    assert!(html.contains("1 sonuç bulundu"));
    assert_eq!(
        mock.last_params().get("category").map(String::as_str),
        Some("Fitness")
    );
    Ok(())
}

#[tokio::test]
async fn test_blank_submission_sends_nothing() -> Result<()> {
    let mock = spawn_mock_api(MockReply::Json(sample_response("x", 3, None))).await?;
    let app = router_for(&mock.base)?;

    let (status, html) = get_page(app, "/search?query=%20%20&category=&submit=1").await?;

    assert_eq!(status, StatusCode::OK);
    assert!(html.contains("Örnek Arama Sorguları"));
    assert!(!html.contains(r#"role="alert""#));
    assert_eq!(mock.hits(), 0);
    Ok(())
}

#[tokio::test]
async fn test_failed_search_shows_distinct_message() -> Result<()> {
    let mock = spawn_mock_api(MockReply::Status(StatusCode::INTERNAL_SERVER_ERROR)).await?;
    let app = router_for(&mock.base)?;

    let (status, html) = get_page(app, "/search?query=gps&submit=1").await?;

    assert_eq!(status, StatusCode::OK);
    assert!(html.contains(r#"role="alert""#));
    assert!(html.contains("HTTP 500"));
    assert!(!html.contains("sonuç bulundu"));
    Ok(())
}

#[tokio::test]
async fn test_unknown_category_falls_back_to_all() -> Result<()> {
    let mock = spawn_mock_api(MockReply::Json(sample_response("gps", 2, None))).await?;
    let app = router_for(&mock.base)?;

    let (_, html) = get_page(app, "/search?query=gps&category=Weather&submit=1").await?;

    assert!(html.contains("2 sonuç bulundu"));
    assert_eq!(
        mock.last_params().get("category").map(String::as_str),
        Some("")
    );
    Ok(())
}
