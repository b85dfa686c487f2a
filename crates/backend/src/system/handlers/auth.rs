use axum::http::{header, StatusCode};
use axum::response::{AppendHeaders, IntoResponse, Redirect};
use axum::Form;
use contracts::system::auth::{LoginRequest, SessionUser};

use crate::shared::store::get_store;
use crate::system::auth::jwt;

/// GET / — the login form.
pub async fn login_page() -> &'static str {
    "Sign in with your staff account."
}

/// POST / — authenticate against the store's users collection and start a
/// session. Any credential failure comes back as the same 401 so callers
/// cannot probe for which accounts exist.
pub async fn login(
    Form(request): Form<LoginRequest>,
) -> Result<impl IntoResponse, (StatusCode, String)> {
    let auth = get_store()
        .auth_user_with_password("users", &request.email, &request.password)
        .await
        .map_err(|_| {
            (
                StatusCode::UNAUTHORIZED,
                "Invalid credentials".to_string(),
            )
        })?;

    let user = session_user(&auth.record);
    let token = jwt::issue_session_token(&user, &auth.token).map_err(|e| {
        tracing::error!("Failed to issue session token: {}", e);
        (
            StatusCode::INTERNAL_SERVER_ERROR,
            "Login failed".to_string(),
        )
    })?;

    tracing::info!("User {} logged in", user.email);
    let cookie = format!("session={}; Path=/; HttpOnly", token);
    Ok((
        AppendHeaders([(header::SET_COOKIE, cookie)]),
        Redirect::to("/dashboard"),
    ))
}

/// POST /logout — drop the session cookie.
pub async fn logout() -> impl IntoResponse {
    let cookie = "session=; Path=/; HttpOnly; Max-Age=0".to_string();
    (
        AppendHeaders([(header::SET_COOKIE, cookie)]),
        Redirect::to("/"),
    )
}

/// Project the store's user record onto the session identity. Accounts with
/// no display name fall back to the local part of their email.
fn session_user(record: &serde_json::Value) -> SessionUser {
    let id = record
        .get("id")
        .and_then(|v| v.as_str())
        .unwrap_or_default()
        .to_string();
    let email = record
        .get("email")
        .and_then(|v| v.as_str())
        .unwrap_or_default()
        .to_string();
    let name = record
        .get("name")
        .and_then(|v| v.as_str())
        .filter(|n| !n.is_empty())
        .map(str::to_string)
        .unwrap_or_else(|| email.split('@').next().unwrap_or_default().to_string());

    SessionUser { id, email, name }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn session_user_reads_the_record() {
        let record = json!({"id": "u1", "email": "ops@example.com", "name": "Ops"});
        let user = session_user(&record);
        assert_eq!(user.id, "u1");
        assert_eq!(user.name, "Ops");
    }

    #[test]
    fn blank_name_falls_back_to_the_email_local_part() {
        let record = json!({"id": "u2", "email": "jordan@example.com", "name": ""});
        let user = session_user(&record);
        assert_eq!(user.name, "jordan");
    }
}
