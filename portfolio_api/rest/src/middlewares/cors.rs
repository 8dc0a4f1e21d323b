use axum::{
    http::{header, HeaderValue, Method},
    Router,
};
use portfolio_utils::Apply;
use tower_http::cors::{AllowOrigin, CorsLayer};

/// Allow the contact form to be submitted from the given origins.
///
/// Without any origins no CORS headers are sent at all.
pub fn add<S: Clone + Send + Sync + 'static>(
    allowed_origins: Vec<HeaderValue>,
) -> impl FnOnce(Router<S>) -> Router<S> {
    move |router| {
        router.apply_if(!allowed_origins.is_empty(), |router| {
            router.layer(
                CorsLayer::new()
                    .allow_origin(AllowOrigin::list(allowed_origins))
                    .allow_methods([Method::POST])
                    .allow_headers([header::CONTENT_TYPE]),
            )
        })
    }
}
