use std::sync::Arc;

use anyhow::Context;
use axum::http::HeaderValue;
use portfolio_api_rest::{RestServerConfig, RestServerRealIpConfig};
use portfolio_config::Config;
use portfolio_core_contact_impl::ContactFeatureConfig;
use portfolio_core_health_impl::HealthFeatureConfig;
use types::{ContactFeature, Email, HealthFeature, RestServer};

pub mod types;

/// Wire up the rest server and all its dependencies.
pub fn rest_server(config: &Config, email: Email) -> anyhow::Result<RestServer> {
    let rest_server_config = RestServerConfig {
        addr: config.http.address,
        real_ip_config: config.http.real_ip.as_ref().map(|real_ip_config| {
            Arc::new(RestServerRealIpConfig {
                header: real_ip_config.header.clone(),
                set_from: real_ip_config.set_from,
            })
        }),
        allowed_origins: config
            .http
            .allowed_origins
            .iter()
            .map(|origin| {
                HeaderValue::from_str(origin)
                    .with_context(|| format!("Invalid origin in http.allowed_origins: {origin:?}"))
            })
            .collect::<anyhow::Result<_>>()?,
    };

    let contact_feature_config = ContactFeatureConfig {
        recipient: config.contact.recipient.clone().into(),
        no_project_placeholder: config.contact.no_project_placeholder.as_str().into(),
    };

    let health_feature_config = HealthFeatureConfig {
        cache_ttl: config.health.cache_ttl.into(),
    };

    let health = HealthFeature::new(email.clone(), health_feature_config);
    let contact = ContactFeature::new(email, contact_feature_config);

    Ok(RestServer::new(rest_server_config, health, contact))
}

#[cfg(test)]
mod tests {
    use super::*;

    async fn load() -> (Config, Email) {
        let config = portfolio_config::load().unwrap();
        let email = crate::email::connect(&config.email).await.unwrap();
        (config, email)
    }

    #[tokio::test]
    async fn provide_rest_server() {
        let (config, email) = load().await;
        let _: RestServer = rest_server(&config, email).unwrap();
    }

    #[tokio::test]
    async fn invalid_origin() {
        let (mut config, email) = load().await;
        config.http.allowed_origins = vec!["https://bad\norigin".into()];

        assert!(rest_server(&config, email).is_err());
    }
}
