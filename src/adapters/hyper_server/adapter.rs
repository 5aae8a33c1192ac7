use http_body_util::{combinators::BoxBody, BodyExt, Empty, Full};
use hyper::body::Bytes;
use hyper::header::{HeaderValue, CONTENT_TYPE};
use hyper::http::request::Parts;
use hyper::{Method, Request, Response, StatusCode};
use serde::Serialize;
use std::sync::Arc;
use tracing::{error, info};
use uuid::Uuid;

use super::cors::CorsPolicy;
use crate::domain::{ErrorBody, GatewayError, WeatherGateway, WeatherRequest};

pub type Body = BoxBody<Bytes, hyper::Error>;

const NOT_FOUND_MESSAGE: &str = "Not found";

pub struct HyperGatewayAdapter {
    gateway: Arc<WeatherGateway>,
    cors: CorsPolicy,
}

impl HyperGatewayAdapter {
    pub fn new(gateway: Arc<WeatherGateway>, cors: CorsPolicy) -> Self {
        Self { gateway, cors }
    }

    /// Serve one request. Never fails: every error becomes a JSON response.
    pub async fn handle<B>(&self, req: Request<B>) -> Response<Body> {
        let (parts, _) = req.into_parts();
        let request_id = Uuid::new_v4();
        let preflight = parts.method == Method::OPTIONS;

        let mut response = self.route(&parts).await;
        self.cors.apply(&parts.headers, response.headers_mut(), preflight);

        info!(
            "[{}] {} {} -> {}",
            request_id,
            parts.method,
            parts.uri.path(),
            response.status().as_u16()
        );
        response
    }

    async fn route(&self, parts: &Parts) -> Response<Body> {
        if parts.method == Method::OPTIONS {
            return empty_response(StatusCode::NO_CONTENT);
        }
        if parts.method != Method::GET && parts.method != Method::HEAD {
            return message_response(StatusCode::NOT_FOUND, NOT_FOUND_MESSAGE);
        }

        match parts.uri.path() {
            "/" => json_response(StatusCode::OK, &self.gateway.health()),
            "/api/weather" => {
                let request = WeatherRequest::from_query(parts.uri.query());
                upstream_response(self.gateway.fetch_current_weather(&request).await)
            }
            "/api/forecast" => {
                let request = WeatherRequest::from_query(parts.uri.query());
                upstream_response(self.gateway.fetch_forecast(&request).await)
            }
            _ => message_response(StatusCode::NOT_FOUND, NOT_FOUND_MESSAGE),
        }
    }
}

fn upstream_response(result: Result<Bytes, GatewayError>) -> Response<Body> {
    match result {
        Ok(payload) => bytes_response(StatusCode::OK, payload),
        Err(err) => message_response(err.status(), err.client_message()),
    }
}

fn message_response(status: StatusCode, message: &str) -> Response<Body> {
    json_response(status, &ErrorBody { message })
}

fn json_response<T: Serialize>(status: StatusCode, value: &T) -> Response<Body> {
    match serde_json::to_vec(value) {
        Ok(body) => bytes_response(status, Bytes::from(body)),
        Err(e) => {
            error!("Failed to serialize response body: {}", e);
            bytes_response(
                StatusCode::INTERNAL_SERVER_ERROR,
                Bytes::from_static(br#"{"message":"Internal server error"}"#),
            )
        }
    }
}

fn bytes_response(status: StatusCode, body: Bytes) -> Response<Body> {
    let mut response = Response::new(Full::new(body).map_err(|never| match never {}).boxed());
    *response.status_mut() = status;
    response.headers_mut().insert(
        CONTENT_TYPE,
        HeaderValue::from_static("application/json; charset=utf-8"),
    );
    response
}

fn empty_response(status: StatusCode) -> Response<Body> {
    let mut response = Response::new(Empty::<Bytes>::new().map_err(|never| match never {}).boxed());
    *response.status_mut() = status;
    response
}
