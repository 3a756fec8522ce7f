//! Static page handlers.
//!
//! One document answers the root path, every unmatched route, and recovered
//! panics. The page is the only UI the service has, so there is nothing more
//! useful to show for a bad path or a broken handler than the page itself;
//! only the status code differs.

use std::any::Any;

use axum::{
    http::StatusCode,
    response::{Html, IntoResponse, Response},
};

/// The embedded landing page, compiled into the binary.
///
/// Served byte-for-byte. The client-side collection script it carries is not
/// part of the server contract beyond "serve these bytes".
pub const INDEX_HTML: &str = include_str!("../../assets/index.html");

/// `GET /` — the landing page.
pub async fn index() -> impl IntoResponse {
    Html(INDEX_HTML)
}

/// Router fallback — unmatched paths get the same page with a 404 status.
pub async fn fallback() -> impl IntoResponse {
    (StatusCode::NOT_FOUND, Html(INDEX_HTML))
}

/// Panic recovery for `tower_http`'s catch-panic layer.
///
/// A panic escaping a handler is logged with its payload (when it is a
/// string) and answered with the page and a 500 status. The process itself
/// never exits on a request-handling error.
pub fn recover_panic(err: Box<dyn Any + Send + 'static>) -> Response {
    let detail = err
        .downcast_ref::<String>()
        .map(String::as_str)
        .or_else(|| err.downcast_ref::<&str>().copied())
        .unwrap_or("non-string panic payload");
    tracing::error!(panic = detail, "handler panicked; serving fallback page");

    (StatusCode::INTERNAL_SERVER_ERROR, Html(INDEX_HTML)).into_response()
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::{
        body::{to_bytes, Body},
        http::Request,
        routing::get,
        Router,
    };
    use tower::ServiceExt; // oneshot
    use tower_http::catch_panic::CatchPanicLayer;

    async fn body_text(body: Body) -> String {
        let bytes = to_bytes(body, usize::MAX).await.unwrap();
        String::from_utf8(bytes.to_vec()).unwrap()
    }

    /// Router with just the page routes; no state needed here.
    fn pages_router() -> Router {
        Router::new()
            .route("/", get(index))
            .fallback(fallback)
            .layer(CatchPanicLayer::custom(recover_panic))
    }

    #[tokio::test]
    async fn root_serves_the_page_with_200() {
        let resp = pages_router()
            .oneshot(Request::builder().uri("/").body(Body::empty()).unwrap())
            .await
            .unwrap();

        assert_eq!(resp.status(), StatusCode::OK);
        assert_eq!(
            resp.headers()["content-type"],
            "text/html; charset=utf-8"
        );
        assert_eq!(body_text(resp.into_body()).await, INDEX_HTML);
    }

    #[tokio::test]
    async fn unmatched_path_serves_the_same_page_with_404() {
        let resp = pages_router()
            .oneshot(
                Request::builder()
                    .uri("/definitely/not/a/route")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(resp.status(), StatusCode::NOT_FOUND);
        assert_eq!(body_text(resp.into_body()).await, INDEX_HTML);
    }

    #[tokio::test]
    async fn panicking_handler_is_recovered_as_500_with_the_page() {
        async fn boom() -> &'static str {
            panic!("kaboom")
        }
        let app = Router::new()
            .route("/boom", get(boom))
            .layer(CatchPanicLayer::custom(recover_panic));

        let resp = app
            .oneshot(Request::builder().uri("/boom").body(Body::empty()).unwrap())
            .await
            .unwrap();

        assert_eq!(resp.status(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body_text(resp.into_body()).await, INDEX_HTML);
    }

    #[test]
    fn recover_panic_handles_non_string_payloads() {
        let resp = recover_panic(Box::new(42_u32));
        assert_eq!(resp.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }
}
