//! In-process backend stand-ins for tests.

use axum::Router;
use tokio::net::TcpListener;

use crate::shared::api_utils::{ApiClient, ClientConfig};
use crate::system::session::Session;

/// Serve `router` on an ephemeral localhost port, return its base URL
pub async fn spawn_backend(router: Router) -> String {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, router).await.unwrap();
    });
    format!("http://{}", addr)
}

pub fn client_for(base_url: &str) -> (ApiClient, Session) {
    let session = Session::in_memory();
    let api = ApiClient::new(ClientConfig::new(base_url), session.clone()).unwrap();
    (api, session)
}
