use std::{
    net::{IpAddr, SocketAddr},
    sync::Arc,
};

use anyhow::Context;
use axum::{http::HeaderValue, Router};
use portfolio_core_contact_contracts::ContactFeatureService;
use portfolio_core_health_contracts::HealthFeatureService;
use tokio::net::TcpListener;
use tracing::{error, info};

mod errors;
mod middlewares;
mod models;
mod routes;

#[derive(Debug, Clone)]
pub struct RestServer<Health, Contact> {
    config: RestServerConfig,
    health: Health,
    contact: Contact,
}

#[derive(Debug, Clone)]
pub struct RestServerConfig {
    pub addr: SocketAddr,
    pub real_ip_config: Option<Arc<RestServerRealIpConfig>>,
    pub allowed_origins: Vec<HeaderValue>,
}

/// Trust the client ip reported in `header` if the request comes from
/// `set_from` (i.e. a reverse proxy).
#[derive(Debug, Clone)]
pub struct RestServerRealIpConfig {
    pub header: String,
    pub set_from: IpAddr,
}

impl<Health, Contact> RestServer<Health, Contact>
where
    Health: HealthFeatureService,
    Contact: ContactFeatureService,
{
    pub fn new(config: RestServerConfig, health: Health, contact: Contact) -> Self {
        Self {
            config,
            health,
            contact,
        }
    }

    pub async fn serve(self) -> anyhow::Result<()> {
        let addr = self.config.addr;
        let router = self.router();

        let listener = TcpListener::bind(addr)
            .await
            .with_context(|| format!("Failed to bind to {addr}"))?;
        info!("Listening on {addr}");

        axum::serve(
            listener,
            router.into_make_service_with_connect_info::<SocketAddr>(),
        )
        .with_graceful_shutdown(shutdown_signal())
        .await
        .map_err(Into::into)
    }

    fn router(self) -> Router<()> {
        let RestServerConfig {
            real_ip_config,
            allowed_origins,
            ..
        } = self.config;

        let router = Router::new()
            .merge(routes::health::router(self.health.into()))
            .merge(routes::contact::router(self.contact.into()));

        let router = middlewares::panic_handler::add(router);
        let router = middlewares::trace::add(router);
        let router = middlewares::client_ip::add(real_ip_config)(router);
        let router = middlewares::request_id::add(router);
        middlewares::cors::add(allowed_origins)(router)
    }
}

async fn shutdown_signal() {
    match tokio::signal::ctrl_c().await {
        Ok(()) => info!("Received shutdown signal"),
        Err(err) => error!("Failed to listen for shutdown signal: {err}"),
    }
}

#[cfg(test)]
mod tests {
    use axum::{
        body::Body,
        http::{header, Request, StatusCode},
    };
    use portfolio_core_contact_contracts::MockContactFeatureService;
    use portfolio_core_health_contracts::MockHealthFeatureService;
    use portfolio_models::contact::{ContactMessageContent, ContactSubmission, SenderEmail};
    use tower::ServiceExt;

    use super::*;

    #[tokio::test]
    async fn contact_through_full_stack() {
        let contact = MockContactFeatureService::new().with_send_message(
            ContactSubmission {
                sender: SenderEmail::try_new("a@b.com").unwrap(),
                message: ContactMessageContent::try_new("Hello!").unwrap(),
                project: None,
            },
            Ok(()),
        );
        let server = RestServer::new(
            RestServerConfig {
                addr: "127.0.0.1:0".parse().unwrap(),
                real_ip_config: None,
                allowed_origins: vec![HeaderValue::from_static("https://portfolio.example.com")],
            },
            MockHealthFeatureService::new(),
            contact,
        );

        let response = server
            .router()
            .oneshot(
                Request::builder()
                    .method("POST")
                    .uri("/api/contact")
                    .header(header::CONTENT_TYPE, "application/json")
                    .header(header::ORIGIN, "https://portfolio.example.com")
                    .body(Body::from(r#"{"email":"a@b.com","message":"Hello!"}"#))
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        assert!(response.headers().contains_key("X-Request-Id"));
        assert!(response
            .headers()
            .contains_key(header::ACCESS_CONTROL_ALLOW_ORIGIN));
    }

    #[tokio::test]
    async fn unknown_route() {
        let server = RestServer::new(
            RestServerConfig {
                addr: "127.0.0.1:0".parse().unwrap(),
                real_ip_config: None,
                allowed_origins: Vec::new(),
            },
            MockHealthFeatureService::new(),
            MockContactFeatureService::new(),
        );

        let response = server
            .router()
            .oneshot(
                Request::builder()
                    .uri("/api/unknown")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }
}
