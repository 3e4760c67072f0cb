//! API documentation check
//!
//! Case 5: `GET /docs` on the bare base URL (no `/api` prefix) must serve
//! an HTML page containing the docs marker (`swagger` unless configured).

use serde_json::{json, Value};
use tracing::info;

use super::assert::{expect_status, AssertionFailure, CheckError};
use crate::config::Settings;
use crate::http::HttpClient;

#[derive(Clone, Debug)]
pub struct DocsTest {
    pub url: String,
    pub marker: String,
}

impl DocsTest {
    pub fn new(settings: &Settings) -> Self {
        Self {
            url: settings.docs_url(),
            marker: settings.docs_marker().to_string(),
        }
    }

    pub async fn run(&self, client: &HttpClient) -> Result<Option<Value>, CheckError> {
        let resp = client.get(&self.url).await?;
        let content_type = resp.content_type();
        info!("Status code: {}", resp.status_code);
        info!(
            "Response content type: {}",
            if content_type.is_empty() {
                "Not specified"
            } else {
                content_type
            }
        );

        expect_status(&resp, &[200])?;

        if !content_type.contains("text/html") {
            return Err(AssertionFailure::NotHtml(content_type.to_string()).into());
        }

        if !resp
            .body
            .to_lowercase()
            .contains(&self.marker.to_lowercase())
        {
            return Err(AssertionFailure::MarkerMissing(self.marker.clone()).into());
        }

        Ok(Some(json!({ "content_type": content_type })))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wiremock::matchers::{method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    const SWAGGER_PAGE: &str =
        "<!DOCTYPE html><html><head><title>App - Swagger UI</title></head><body></body></html>";

    async fn serve_docs(server: &MockServer, template: ResponseTemplate) {
        Mock::given(method("GET"))
            .and(path("/docs"))
            .respond_with(template)
            .mount(server)
            .await;
    }

    #[tokio::test]
    async fn test_docs_pass_regardless_of_marker_case() {
        let server = MockServer::start().await;
        serve_docs(
            &server,
            ResponseTemplate::new(200).set_body_raw(SWAGGER_PAGE, "text/html; charset=utf-8"),
        )
        .await;

        let client = HttpClient::new().unwrap();
        let test = DocsTest::new(&Settings::new(server.uri()));
        assert_eq!(test.url, format!("{}/docs", server.uri()));
        assert!(test.run(&client).await.is_ok());
    }

    #[tokio::test]
    async fn test_docs_must_be_html() {
        let server = MockServer::start().await;
        serve_docs(
            &server,
            ResponseTemplate::new(200).set_body_raw("{\"swagger\": true}", "application/json"),
        )
        .await;

        let client = HttpClient::new().unwrap();
        let err = DocsTest::new(&Settings::new(server.uri()))
            .run(&client)
            .await
            .unwrap_err();

        assert!(matches!(
            err,
            CheckError::Assertion(AssertionFailure::NotHtml(_))
        ));
    }

    #[tokio::test]
    async fn test_docs_marker_missing() {
        let server = MockServer::start().await;
        serve_docs(
            &server,
            ResponseTemplate::new(200).set_body_raw("<html>ReDoc</html>", "text/html"),
        )
        .await;

        let client = HttpClient::new().unwrap();
        let settings = Settings::new(server.uri());

        let err = DocsTest::new(&settings).run(&client).await.unwrap_err();
        assert!(matches!(
            err,
            CheckError::Assertion(AssertionFailure::MarkerMissing(_))
        ));

        let settings = settings.with_docs_marker("redoc");
        assert!(DocsTest::new(&settings).run(&client).await.is_ok());
    }

    #[tokio::test]
    async fn test_docs_not_found() {
        let server = MockServer::start().await;
        serve_docs(&server, ResponseTemplate::new(404)).await;

        let client = HttpClient::new().unwrap();
        let err = DocsTest::new(&Settings::new(server.uri()))
            .run(&client)
            .await
            .unwrap_err();

        assert!(err.is_assertion());
    }
}
