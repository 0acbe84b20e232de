//! Router-level tests for the proxy against a live stub upstream

#[cfg(test)]
mod stub {
    use axum::Router;
    use axum::body::Body;
    use axum::http::{HeaderValue, Request, StatusCode, header};
    use axum::response::{IntoResponse, Response};
    use std::net::SocketAddr;
    use tokio::net::TcpListener;

    /// Raw bytes with odd spacing, so any re-serialization would show
    pub const ORDER_JSON: &[u8] = b"{\"id\": 17,  \"items\":[ {\"sku\":\"A-1\"} ] ,\"note\":\"caf\xc3\xa9\"}";

    /// Stub upstream mounted at `/v1`
    ///
    /// * `/v1/orders`     - fixed JSON bytes
    /// * `/v1/missing`    - 404 with a plain-text body
    /// * `/v1/moved`      - 302 to `/v1/elsewhere`
    /// * `/v1/login`      - two `Set-Cookie` headers
    /// * anything else    - JSON echo of what arrived
    ///
    /// Every response carries `x-seen-method` and `x-seen-uri` so HEAD
    /// requests can be checked without a body.
    pub async fn handle(req: Request<Body>) -> Response {
        let method = req.method().clone();
        let uri = req.uri().to_string();
        let path = req.uri().path().to_string();

        let mut response = match path.as_str() {
            "/v1/orders" => (
                StatusCode::CREATED,
                [(header::CONTENT_TYPE, "application/json")],
                ORDER_JSON,
            )
                .into_response(),
            "/v1/missing" => (
                StatusCode::NOT_FOUND,
                [(header::CONTENT_TYPE, "text/plain")],
                "no such thing <html>",
            )
                .into_response(),
            "/v1/moved" => (
                StatusCode::FOUND,
                [(header::LOCATION, "/v1/elsewhere")],
            )
                .into_response(),
            "/v1/login" => {
                let mut response = StatusCode::NO_CONTENT.into_response();
                let headers = response.headers_mut();
                headers.append(
                    header::SET_COOKIE,
                    HeaderValue::from_static("crm_session=new; Path=/; HttpOnly"),
                );
                headers.append(
                    header::SET_COOKIE,
                    HeaderValue::from_static("csrf=t0k; Path=/"),
                );
                response
            }
            _ => echo(req).await,
        };

        let headers = response.headers_mut();
        headers.insert("x-seen-method", HeaderValue::from_str(method.as_str()).unwrap());
        headers.insert("x-seen-uri", HeaderValue::from_str(&uri).unwrap());
        response
    }

    async fn echo(req: Request<Body>) -> Response {
        let (parts, body) = req.into_parts();
        let body = axum::body::to_bytes(body, usize::MAX).await.unwrap();
        let header = |name: &str| {
            parts
                .headers
                .get(name)
                .and_then(|v| v.to_str().ok())
                .map(str::to_string)
        };

        axum::Json(serde_json::json!({
            "method": parts.method.as_str(),
            "path": parts.uri.path(),
            "query": parts.uri.query(),
            "cookie": header("cookie"),
            "accept": header("accept"),
            "content_type": header("content-type"),
            "host": header("host"),
            "x_forwarded_proto": header("x-forwarded-proto"),
            "connection_hop": header("x-hop"),
            "body": String::from_utf8_lossy(&body),
        }))
        .into_response()
    }

    pub async fn spawn() -> SocketAddr {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, Router::new().fallback(handle))
                .await
                .unwrap();
        });
        addr
    }

    /// An address nothing listens on
    pub async fn dead_addr() -> SocketAddr {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        drop(listener);
        addr
    }
}

#[cfg(test)]
mod proxy_tests {
    use super::stub;
    use crate::{ProxyConfig, proxy_router};
    use axum::Router;
    use axum::body::Body;
    use axum::http::{Method, Request, StatusCode, header};
    use axum::response::Response;
    use std::net::SocketAddr;
    use tower::ServiceExt;

    fn app(upstream: SocketAddr) -> Router {
        let config = ProxyConfig::from_upstream_url(&format!("http://{}/v1/", upstream)).unwrap();
        proxy_router(config).unwrap()
    }

    async fn body_bytes(response: Response) -> Vec<u8> {
        axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap()
            .to_vec()
    }

    async fn body_json(response: Response) -> serde_json::Value {
        serde_json::from_slice(&body_bytes(response).await).unwrap()
    }

    #[tokio::test]
    async fn test_every_method_is_forwarded() {
        let upstream = stub::spawn().await;

        for method in [
            Method::GET,
            Method::POST,
            Method::PUT,
            Method::PATCH,
            Method::DELETE,
            Method::OPTIONS,
            Method::HEAD,
        ] {
            let req = Request::builder()
                .method(method.clone())
                .uri("/api/foo/bar?x=1")
                .header(header::COOKIE, "session_id=abc; theme=dark")
                .header(header::ACCEPT, "application/json")
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(r#"{"qty":2}"#))
                .unwrap();

            let response = app(upstream).oneshot(req).await.unwrap();

            assert_eq!(response.status(), StatusCode::OK, "{method}");
            assert_eq!(response.headers().get("x-seen-method").unwrap(), method.as_str());
            assert_eq!(response.headers().get("x-seen-uri").unwrap(), "/v1/foo/bar?x=1");

            if method == Method::HEAD {
                continue;
            }

            let echoed = body_json(response).await;
            assert_eq!(echoed["method"], method.as_str());
            assert_eq!(echoed["path"], "/v1/foo/bar");
            assert_eq!(echoed["query"], "x=1");
            assert_eq!(echoed["cookie"], "session_id=abc; theme=dark");
            assert_eq!(echoed["accept"], "application/json");
            assert_eq!(echoed["content_type"], "application/json");
            assert_eq!(echoed["body"], r#"{"qty":2}"#, "{method}");
        }
    }

    #[tokio::test]
    async fn test_json_post_round_trip_is_byte_identical() {
        let upstream = stub::spawn().await;

        let req = Request::builder()
            .method(Method::POST)
            .uri("/api/orders")
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(r#"{"items":[{"sku":"A-1"}]}"#))
            .unwrap();

        let response = app(upstream).oneshot(req).await.unwrap();

        assert_eq!(response.status(), StatusCode::CREATED);
        assert_eq!(
            response.headers().get(header::CONTENT_TYPE).unwrap(),
            "application/json"
        );
        assert_eq!(body_bytes(response).await, stub::ORDER_JSON);
    }

    #[tokio::test]
    async fn test_upstream_error_status_is_relayed_verbatim() {
        let upstream = stub::spawn().await;

        let req = Request::builder()
            .uri("/api/missing")
            .body(Body::empty())
            .unwrap();
        let response = app(upstream).oneshot(req).await.unwrap();

        assert_eq!(response.status(), StatusCode::NOT_FOUND);
        assert_eq!(response.headers().get(header::CONTENT_TYPE).unwrap(), "text/plain");
        assert_eq!(body_bytes(response).await, b"no such thing <html>");
    }

    #[tokio::test]
    async fn test_redirects_are_relayed_not_followed() {
        let upstream = stub::spawn().await;

        let req = Request::builder()
            .uri("/api/moved")
            .body(Body::empty())
            .unwrap();
        let response = app(upstream).oneshot(req).await.unwrap();

        assert_eq!(response.status(), StatusCode::FOUND);
        assert_eq!(
            response.headers().get(header::LOCATION).unwrap(),
            "/v1/elsewhere"
        );
    }

    #[tokio::test]
    async fn test_every_set_cookie_is_relayed() {
        let upstream = stub::spawn().await;

        let req = Request::builder()
            .method(Method::POST)
            .uri("/api/login")
            .body(Body::from(r#"{"user":"a","password":"b"}"#))
            .unwrap();
        let response = app(upstream).oneshot(req).await.unwrap();

        assert_eq!(response.status(), StatusCode::NO_CONTENT);
        let cookies: Vec<_> = response
            .headers()
            .get_all(header::SET_COOKIE)
            .iter()
            .map(|v| v.to_str().unwrap().to_string())
            .collect();
        assert_eq!(
            cookies,
            vec!["crm_session=new; Path=/; HttpOnly", "csrf=t0k; Path=/"]
        );
    }

    #[tokio::test]
    async fn test_path_encoding_and_trailing_slash_survive() {
        let upstream = stub::spawn().await;

        let req = Request::builder()
            .uri("/api/products/a%2Fb/?q=red%20shoe")
            .body(Body::empty())
            .unwrap();
        let response = app(upstream).oneshot(req).await.unwrap();

        assert_eq!(
            response.headers().get("x-seen-uri").unwrap(),
            "/v1/products/a%2Fb/?q=red%20shoe"
        );
    }

    #[tokio::test]
    async fn test_bare_mount_prefix_is_forwarded() {
        let upstream = stub::spawn().await;

        for (uri, seen) in [("/api", "/v1"), ("/api/", "/v1/")] {
            let req = Request::builder().uri(uri).body(Body::empty()).unwrap();
            let response = app(upstream).oneshot(req).await.unwrap();

            assert_eq!(response.status(), StatusCode::OK, "{uri}");
            assert_eq!(response.headers().get("x-seen-uri").unwrap(), seen);
        }
    }

    #[tokio::test]
    async fn test_hop_by_hop_and_host_are_not_forwarded() {
        let upstream = stub::spawn().await;

        let req = Request::builder()
            .uri("/api/echo")
            .header(header::HOST, "admin.shop.example")
            .header(header::CONNECTION, "x-hop")
            .header("x-hop", "secret")
            .body(Body::empty())
            .unwrap();
        let response = app(upstream).oneshot(req).await.unwrap();
        let echoed = body_json(response).await;

        assert_eq!(echoed["connection_hop"], serde_json::Value::Null);
        assert_eq!(echoed["host"], upstream.to_string());
        assert_eq!(echoed["x_forwarded_proto"], "http");
    }

    #[tokio::test]
    async fn test_unreachable_upstream_is_bad_gateway() {
        let upstream = stub::dead_addr().await;

        let req = Request::builder()
            .uri("/api/orders")
            .body(Body::empty())
            .unwrap();
        let response = app(upstream).oneshot(req).await.unwrap();

        assert_eq!(response.status(), StatusCode::BAD_GATEWAY);
        assert_eq!(
            response.headers().get(header::CONTENT_TYPE).unwrap(),
            "application/problem+json"
        );
        let problem = body_json(response).await;
        assert_eq!(problem["status"], 502);
        assert_eq!(problem["title"], "Bad Gateway");
    }

    #[tokio::test]
    async fn test_paths_outside_prefix_are_not_routed() {
        let upstream = stub::spawn().await;

        let req = Request::builder()
            .uri("/apix/orders")
            .body(Body::empty())
            .unwrap();
        let response = app(upstream).oneshot(req).await.unwrap();

        assert_eq!(response.status(), StatusCode::NOT_FOUND);
        assert!(response.headers().get("x-seen-uri").is_none());
    }
}
