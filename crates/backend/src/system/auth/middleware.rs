use axum::{body::Body, extract::Request, http::StatusCode, middleware::Next, response::Response};

/// Middleware that requires a valid session. The token is taken from the
/// `Authorization: Bearer` header when present, otherwise from the
/// `session` cookie set at login.
pub async fn require_session(mut req: Request<Body>, next: Next) -> Result<Response, StatusCode> {
    let token = bearer_token(&req)
        .or_else(|| cookie_token(&req))
        .ok_or(StatusCode::UNAUTHORIZED)?;

    let claims =
        super::jwt::validate_session_token(&token).map_err(|_| StatusCode::UNAUTHORIZED)?;

    req.extensions_mut().insert(claims);

    Ok(next.run(req).await)
}

fn bearer_token(req: &Request<Body>) -> Option<String> {
    req.headers()
        .get("Authorization")
        .and_then(|h| h.to_str().ok())
        .and_then(|h| h.strip_prefix("Bearer "))
        .map(str::to_string)
}

fn cookie_token(req: &Request<Body>) -> Option<String> {
    let cookies = req.headers().get("Cookie")?.to_str().ok()?;
    cookies
        .split(';')
        .map(str::trim)
        .find_map(|pair| pair.strip_prefix("session="))
        .map(str::to_string)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn request_with_header(name: &str, value: &str) -> Request<Body> {
        Request::builder()
            .header(name, value)
            .body(Body::empty())
            .unwrap()
    }

    #[test]
    fn bearer_header_is_extracted() {
        let req = request_with_header("Authorization", "Bearer abc.def.ghi");
        assert_eq!(bearer_token(&req).as_deref(), Some("abc.def.ghi"));
    }

    #[test]
    fn session_cookie_is_found_among_others() {
        let req = request_with_header("Cookie", "theme=dark; session=tok123; lang=en");
        assert_eq!(cookie_token(&req).as_deref(), Some("tok123"));
    }

    #[test]
    fn missing_credentials_yield_nothing() {
        let req = Request::builder().body(Body::empty()).unwrap();
        assert!(bearer_token(&req).is_none());
        assert!(cookie_token(&req).is_none());
    }
}
