// src/api/client.rs
use async_trait::async_trait;
use log::{debug, warn};
use reqwest::{Client, Url};

use super::{GenerationError, GenerationRequest, PasswordService};
use crate::page::{ids, meta::extract_meta_content};

pub const CSRF_HEADER: &str = "X-CSRF-Token";

/// Talks to the generator server over HTTP.
#[derive(Debug, Clone)]
pub struct HttpPasswordService {
    client: Client,
    endpoint: Url,
}

impl HttpPasswordService {
    pub fn new(endpoint: &str) -> Result<Self, GenerationError> {
        let endpoint = Url::parse(endpoint)
            .map_err(|e| GenerationError::Client(format!("{}: {}", endpoint, e)))?;

        let client = Client::builder()
            .user_agent(concat!("rust_passgen/", env!("CARGO_PKG_VERSION")))
            .build()?;

        Ok(Self { client, endpoint })
    }

    pub fn endpoint(&self) -> &Url {
        &self.endpoint
    }

    fn resolve(&self, path: &str) -> Result<Url, GenerationError> {
        self.endpoint
            .join(path)
            .map_err(|e| GenerationError::Client(format!("{}: {}", path, e)))
    }

    /// Probe the server's health endpoint. True only on `200` with body `OK`.
    pub async fn health(&self) -> Result<bool, GenerationError> {
        let url = self.resolve("health")?;
        debug!("🔍 Probing {}", url);

        let response = self.client.get(url).send().await?;
        if !response.status().is_success() {
            warn!("Health probe returned {}", response.status());
            return Ok(false);
        }
        Ok(response.text().await?.trim() == "OK")
    }

    /// Fetch the generator page and read the anti-forgery token the server
    /// rendered into it.
    pub async fn fetch_csrf_token(&self) -> Result<Option<String>, GenerationError> {
        let response = self.client.get(self.endpoint.clone()).send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(GenerationError::Http { status });
        }

        let html = response.text().await?;
        Ok(extract_meta_content(&html, ids::CSRF_META))
    }
}

#[async_trait]
impl PasswordService for HttpPasswordService {
    async fn generate(
        &self,
        request: &GenerationRequest,
        csrf_token: &str,
    ) -> Result<String, GenerationError> {
        debug!("📝 POST {} (length {})", self.endpoint, request.length);

        let response = self
            .client
            .post(self.endpoint.clone())
            .header(CSRF_HEADER, csrf_token)
            .form(request)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(GenerationError::Http { status });
        }

        Ok(response.text().await?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::PasswordLength;
    use actix_web::{http::header, web, App, HttpRequest, HttpResponse, HttpServer};
    use std::collections::HashMap;

    async fn echo_form(req: HttpRequest, form: web::Form<HashMap<String, String>>) -> HttpResponse {
        let header_value = |name: &str| {
            req.headers()
                .get(name)
                .and_then(|v| v.to_str().ok())
                .unwrap_or("")
                .to_string()
        };

        let mut fields: Vec<String> = form.iter().map(|(k, v)| format!("{}={}", k, v)).collect();
        fields.sort();

        HttpResponse::Ok().content_type("text/plain").body(format!(
            "{}|{}|{}",
            header_value(CSRF_HEADER),
            header_value(header::CONTENT_TYPE.as_str()),
            fields.join(";")
        ))
    }

    const STUB_PAGE: &str = concat!(
        r#"<html><head>"#,
        r#"<meta name="csrf-token" content="c3R1Yi10b2tlbg&#61;&#61;">"#,
        r#"</head></html>"#,
    );

    fn stub_routes(cfg: &mut web::ServiceConfig) {
        cfg.route("/", web::post().to(echo_form))
            .route(
                "/",
                web::get().to(|| async {
                    HttpResponse::Ok().content_type("text/html").body(STUB_PAGE)
                }),
            )
            .route("/health", web::get().to(|| async { HttpResponse::Ok().body("OK") }))
            .route(
                "/broken",
                web::post().to(|| async {
                    HttpResponse::InternalServerError().body("not a password")
                }),
            );
    }

    fn spawn_stub() -> String {
        let server = HttpServer::new(|| App::new().configure(stub_routes))
            .workers(1)
            .disable_signals()
            .bind(("127.0.0.1", 0))
            .expect("bind stub server");
        let addr = server.addrs()[0];
        actix_web::rt::spawn(server.run());
        format!("http://{}/", addr)
    }

    fn request() -> GenerationRequest {
        GenerationRequest {
            length: PasswordLength::Eight,
            uppercase: true,
            lowercase: false,
            numbers: true,
            symbols: true,
            custom_symbols: "#&+".to_string(),
        }
    }

    #[actix_web::test]
    async fn posts_form_fields_with_token_header() {
        let service = HttpPasswordService::new(&spawn_stub()).expect("service");

        let body = service.generate(&request(), "tok-123").await.expect("2xx");

        assert_eq!(
            body,
            "tok-123|application/x-www-form-urlencoded|\
             customSymbols=#&+;length=8;lowercase=false;numbers=true;symbols=true;uppercase=true"
        );
    }

    #[actix_web::test]
    async fn non_success_status_is_an_http_error() {
        let base = spawn_stub();
        let service = HttpPasswordService::new(&format!("{}broken", base)).expect("service");

        match service.generate(&request(), "").await {
            Err(GenerationError::Http { status }) => assert_eq!(status.as_u16(), 500),
            other => panic!("expected HTTP error, got {:?}", other),
        }
    }

    #[actix_web::test]
    async fn unreachable_server_is_a_transport_error() {
        let port = {
            let listener = std::net::TcpListener::bind("127.0.0.1:0").expect("bind");
            listener.local_addr().expect("addr").port()
        };
        let service =
            HttpPasswordService::new(&format!("http://127.0.0.1:{}/", port)).expect("service");

        let result = service.generate(&request(), "").await;
        assert!(matches!(result, Err(GenerationError::Transport(_))));
    }

    #[actix_web::test]
    async fn health_and_token_discovery() {
        let service = HttpPasswordService::new(&spawn_stub()).expect("service");

        assert!(service.health().await.expect("health"));
        assert_eq!(
            service.fetch_csrf_token().await.expect("page").as_deref(),
            Some("c3R1Yi10b2tlbg==")
        );
    }

    #[test]
    fn rejects_malformed_endpoint() {
        assert!(matches!(
            HttpPasswordService::new("not a url"),
            Err(GenerationError::Client(_))
        ));
    }
}
