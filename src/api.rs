use async_trait::async_trait;
use reqwest::header::AUTHORIZATION;
use reqwest::{Method, RequestBuilder};
use serde::de::DeserializeOwned;
use std::time::Duration;
use tracing::debug;

use crate::cart::CartApi;
use crate::catalog::SortOrder;
use crate::error::{Result, StoreError};
use crate::models::{
    AddItemRequest, Cart, Category, CheckoutRequest, Dish, Modifier, Order, SignInRequest,
    SignInResponse, SignUpRequest, UpdateItemRequest,
};
use crate::utils::{body_message, remove_trailing_slash};

/// Client for the storefront REST API.
///
/// Protected routes take the session token as an argument; it is sent
/// verbatim in the `Authorization` header.
pub struct StoreApi {
    api_url: String,
    client: reqwest::Client,
}

impl StoreApi {
    pub fn new(api_url: &str) -> Self {
        Self::with_client(api_url, reqwest::Client::new())
    }

    pub fn with_timeout(api_url: &str, timeout: Duration) -> Result<Self> {
        let client = reqwest::Client::builder().timeout(timeout).build()?;
        Ok(Self::with_client(api_url, client))
    }

    pub fn with_client(api_url: &str, client: reqwest::Client) -> Self {
        Self {
            api_url: remove_trailing_slash(api_url),
            client,
        }
    }

    pub fn api_url(&self) -> &str {
        &self.api_url
    }

    fn build_url(&self, path: &str) -> String {
        format!("{}/api/{}", self.api_url, path)
    }

    fn build_category_dishes_url(&self, category_id: &str, sort: SortOrder) -> String {
        let base = self.build_url(&format!("categories/dishes/{}", category_id));
        match sort.as_query() {
            Some(order) => format!("{}?sortOrder={}", base, order),
            None => base,
        }
    }

    fn request(&self, method: Method, url: String, token: Option<&str>) -> RequestBuilder {
        debug!(%method, %url, authorized = token.is_some(), "api request");
        let builder = self.client.request(method, url);
        match token {
            Some(token) => builder.header(AUTHORIZATION, token),
            None => builder,
        }
    }

    /// Sends the request and returns the raw body of a 2xx response.
    async fn send(&self, builder: RequestBuilder, fallback: &str) -> Result<String> {
        let response = builder.send().await.map_err(|e| StoreError::Network {
            status: None,
            message: format!("{}: {}", fallback, e),
        })?;
        let status = response.status();
        let body = response.text().await?;
        if !status.is_success() {
            debug!(status = status.as_u16(), %body, "api error response");
            return Err(StoreError::Network {
                status: Some(status.as_u16()),
                message: body_message(&body, fallback),
            });
        }
        Ok(body)
    }

    async fn send_json<T: DeserializeOwned>(
        &self,
        builder: RequestBuilder,
        fallback: &str,
    ) -> Result<T> {
        let body = self.send(builder, fallback).await?;
        Ok(serde_json::from_str(&body)?)
    }

    pub async fn dishes(&self) -> Result<Vec<Dish>> {
        let req = self.request(Method::GET, self.build_url("dishes"), None);
        self.send_json(req, "Failed to fetch dishes").await
    }

    pub async fn dish(&self, dish_id: &str) -> Result<Dish> {
        let req = self.request(Method::GET, self.build_url(&format!("dishes/{}", dish_id)), None);
        self.send_json(req, "Failed to fetch dish details").await
    }

    pub async fn dishes_by_category(&self, category_id: &str) -> Result<Vec<Dish>> {
        let url = self.build_url(&format!("dishes/category/{}", category_id));
        let req = self.request(Method::GET, url, None);
        self.send_json(req, "Failed to fetch dishes").await
    }

    pub async fn categories(&self) -> Result<Vec<Category>> {
        let req = self.request(Method::GET, self.build_url("categories"), None);
        self.send_json(req, "Failed to fetch categories").await
    }

    /// Dishes of one category, sorted by price on the server.
    pub async fn category_dishes(&self, category_id: &str, sort: SortOrder) -> Result<Vec<Dish>> {
        let url = self.build_category_dishes_url(category_id, sort);
        let req = self.request(Method::GET, url, None);
        self.send_json(req, "Failed to fetch dishes").await
    }

    pub async fn modifiers(&self, token: Option<&str>) -> Result<Vec<Modifier>> {
        let req = self.request(Method::GET, self.build_url("modifiers"), token);
        self.send_json(req, "Failed to fetch modifiers").await
    }

    pub async fn orders(&self, token: Option<&str>) -> Result<Vec<Order>> {
        let req = self.request(Method::GET, self.build_url("orders/"), token);
        self.send_json(req, "Failed to fetch orders").await
    }

    /// Registers a new account. Returns the server's confirmation message.
    pub async fn sign_up(&self, request: &SignUpRequest) -> Result<String> {
        let req = self
            .request(Method::POST, self.build_url("sign-up"), None)
            .json(request);
        let body = self.send(req, "Something went wrong").await?;
        Ok(body_message(&body, "Registered successfully"))
    }

    pub async fn sign_in(&self, request: &SignInRequest) -> Result<SignInResponse> {
        let req = self
            .request(Method::POST, self.build_url("sign-in"), None)
            .json(request);
        self.send_json(req, "Something went wrong").await
    }
}

#[async_trait]
impl CartApi for StoreApi {
    async fn fetch_cart(&self, token: &str) -> Result<Cart> {
        let req = self.request(Method::GET, self.build_url("cart/"), Some(token));
        self.send_json(req, "Failed to fetch cart items").await
    }

    async fn fetch_modifiers(&self, token: &str) -> Result<Vec<Modifier>> {
        self.modifiers(Some(token)).await
    }

    async fn add_item(&self, token: &str, request: &AddItemRequest) -> Result<()> {
        let req = self
            .request(Method::POST, self.build_url("cart/addItems"), Some(token))
            .json(request);
        self.send(req, "Failed to add cart").await.map(|_| ())
    }

    async fn update_item(
        &self,
        token: &str,
        item_id: &str,
        request: &UpdateItemRequest,
    ) -> Result<()> {
        let url = self.build_url(&format!("cart/updateItem/{}", item_id));
        let req = self.request(Method::PATCH, url, Some(token)).json(request);
        self.send(req, "Failed to update item").await.map(|_| ())
    }

    async fn delete_item(&self, token: &str, item_id: &str) -> Result<()> {
        let url = self.build_url(&format!("cart/deleteItem/{}", item_id));
        let req = self.request(Method::DELETE, url, Some(token));
        self.send(req, "Failed to remove item").await.map(|_| ())
    }

    async fn checkout(&self, token: &str, request: &CheckoutRequest) -> Result<()> {
        let req = self
            .request(Method::POST, self.build_url("cart/checkout"), Some(token))
            .json(request);
        self.send(req, "Failed to create order").await.map(|_| ())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tokio::io::{AsyncReadExt, AsyncWriteExt};
    use tokio::net::TcpListener;
    use tokio::task::JoinHandle;

    /// Serves exactly one canned HTTP response and hands back the raw request.
    async fn serve_once(status: &str, body: &str) -> (String, JoinHandle<String>) {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        let response = format!(
            "HTTP/1.1 {}\r\nContent-Type: application/json\r\n\
             Content-Length: {}\r\nConnection: close\r\n\r\n{}",
            status,
            body.len(),
            body
        );
        let handle = tokio::spawn(async move {
            let (mut socket, _) = listener.accept().await.unwrap();
            let mut raw = Vec::new();
            let mut buf = [0u8; 4096];
            loop {
                let n = socket.read(&mut buf).await.unwrap();
                raw.extend_from_slice(&buf[..n]);
                if n == 0 || request_complete(&raw) {
                    break;
                }
            }
            socket.write_all(response.as_bytes()).await.unwrap();
            socket.shutdown().await.ok();
            String::from_utf8_lossy(&raw).to_string()
        });
        (format!("http://{}/", addr), handle)
    }

    fn request_complete(raw: &[u8]) -> bool {
        let text = String::from_utf8_lossy(raw);
        let Some(head_end) = text.find("\r\n\r\n") else {
            return false;
        };
        let content_length = text[..head_end]
            .lines()
            .find_map(|l| {
                let (name, value) = l.split_once(':')?;
                name.eq_ignore_ascii_case("content-length")
                    .then(|| value.trim().parse::<usize>().ok())
                    .flatten()
            })
            .unwrap_or(0);
        raw.len() >= head_end + 4 + content_length
    }

    #[test]
    fn test_build_urls() {
        let api = StoreApi::new("http://localhost:4000/");
        assert_eq!(api.api_url(), "http://localhost:4000");
        assert_eq!(api.build_url("cart/"), "http://localhost:4000/api/cart/");
        assert_eq!(
            api.build_category_dishes_url("c1", SortOrder::Desc),
            "http://localhost:4000/api/categories/dishes/c1?sortOrder=desc"
        );
        assert_eq!(
            api.build_category_dishes_url("c1", SortOrder::None),
            "http://localhost:4000/api/categories/dishes/c1"
        );
    }

    #[tokio::test]
    async fn test_fetch_cart_sends_token() {
        let body = r#"{"items":[{"_id":"li-1","quantity":2,"modifiers":[],
            "dish":{"_id":"d1","title":"Burger","price":10}}]}"#;
        let (url, server) = serve_once("200 OK", body).await;
        let api = StoreApi::new(&url);

        let cart = api.fetch_cart("tok-abc").await.unwrap();
        assert_eq!(cart.total().to_string(), "20.00");

        let raw = server.await.unwrap();
        assert!(raw.starts_with("GET /api/cart/ HTTP/1.1"), "{}", raw);
        assert!(raw.to_ascii_lowercase().contains("authorization: tok-abc"), "{}", raw);
    }

    #[tokio::test]
    async fn test_update_item_surfaces_server_message() {
        let (url, server) =
            serve_once("404 Not Found", r#"{"message":"Cart item not found"}"#).await;
        let api = StoreApi::new(&url);
        let request = UpdateItemRequest {
            quantity: 1,
            modifier_ids: vec!["m1".to_string()],
        };

        let err = api.update_item("tok", "li-9", &request).await.unwrap_err();
        assert_eq!(err.to_string(), "Cart item not found");
        assert_eq!(err.status(), Some(404));

        let raw = server.await.unwrap();
        assert!(raw.starts_with("PATCH /api/cart/updateItem/li-9 HTTP/1.1"), "{}", raw);
        assert!(raw.contains(r#""modifierIds":["m1"]"#), "{}", raw);
    }

    #[tokio::test]
    async fn test_error_without_message_uses_fallback() {
        let (url, server) = serve_once("500 Internal Server Error", "oops").await;
        let api = StoreApi::new(&url);
        let err = api.delete_item("tok", "li-1").await.unwrap_err();
        assert_eq!(err.to_string(), "Failed to remove item");
        server.await.unwrap();
    }

    #[tokio::test]
    async fn test_sign_in_returns_token() {
        let (url, server) = serve_once("200 OK", r#"{"token":"jwt-1","message":"Welcome"}"#).await;
        let api = StoreApi::new(&url);
        let response = api
            .sign_in(&SignInRequest {
                email: "a@b.c".to_string(),
                password: "pw".to_string(),
            })
            .await
            .unwrap();
        assert_eq!(response.token, "jwt-1");
        assert_eq!(response.message.as_deref(), Some("Welcome"));
        let raw = server.await.unwrap();
        assert!(!raw.to_ascii_lowercase().contains("authorization:"), "{}", raw);
    }

    #[tokio::test]
    async fn test_unreachable_server_is_network_error() {
        let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
        let addr = listener.local_addr().unwrap();
        drop(listener);

        let api = StoreApi::new(&format!("http://{}", addr));
        let err = api.dishes().await.unwrap_err();
        assert!(matches!(err, StoreError::Network { status: None, .. }));
        assert!(err.to_string().starts_with("Failed to fetch dishes"));
    }
}
