use reqwest::Method;

use contracts::system::auth::{LoginRequest, RegisterRequest, TokenResponse, UserInfo};

use crate::shared::api_utils::{ApiClient, ApiError};

const BASE_URL: &str = "/api/auth";

/// Login with username and password, then remember the token in the
/// session. The user profile is loaded right after; if that call fails
/// the session still holds the token and the profile stays empty.
pub async fn login(
    api: &ApiClient,
    username: String,
    password: String,
) -> Result<Option<UserInfo>, ApiError> {
    let request = LoginRequest { username, password };

    let token: TokenResponse = api
        .post_form(&format!("{}/login", BASE_URL), &request)
        .await?;
    api.session().login(token.access_token, None);

    match me(api).await {
        Ok(user) => {
            tracing::info!("Logged in as {}", user.username);
            api.session().set_user(user.clone());
            Ok(Some(user))
        }
        Err(e) => {
            tracing::warn!("Logged in, but failed to load user profile: {}", e);
            Ok(None)
        }
    }
}

/// Get current user info
pub async fn me(api: &ApiClient) -> Result<UserInfo, ApiError> {
    api.get(&format!("{}/me", BASE_URL)).await
}

pub async fn register(api: &ApiClient, request: &RegisterRequest) -> Result<UserInfo, ApiError> {
    api.post(&format!("{}/register", BASE_URL), request).await
}

/// Drop the session locally, then tell the backend with the old token.
/// The backend call is best-effort: its failure is only logged.
pub async fn logout(api: &ApiClient) {
    let token = api.session().token();
    if let Some(user) = api.session().user() {
        tracing::info!("Logging out {}", user.username);
    }
    api.session().clear();

    let Some(token) = token else {
        return;
    };
    let request = api
        .request(Method::POST, &format!("{}/logout", BASE_URL))
        .bearer_auth(token);
    if let Err(e) = api.execute::<serde_json::Value>(request).await {
        tracing::warn!("Logout notification failed: {}", e);
    }
}
