use anyhow::Result;
use emergency_dispatch::api::router;
use tokio::net::TcpListener;

/// Test: the health endpoint answers GET and POST alike with 200 and the
/// fixed acknowledgment body
#[tokio::test]
async fn test_health_endpoint_fixed_body() -> Result<()> {
    let listener = TcpListener::bind("127.0.0.1:0").await?;
    let addr = listener.local_addr()?;

    tokio::spawn(async move {
        axum::serve(listener, router()).await.unwrap();
    });

    let url = format!("http://{}/", addr);

    let get = reqwest::get(&url).await?;
    assert_eq!(get.status(), 200);

    let body = get.text().await?;
    assert!(!body.is_empty());
    assert_eq!(body, "Hello from the dispatch service!");

    let post = reqwest::Client::new()
        .post(&url)
        .body("ignored payload")
        .send()
        .await?;
    assert_eq!(post.status(), 200);
    assert_eq!(post.text().await?, "Hello from the dispatch service!");

    Ok(())
}
