#![allow(dead_code)]
use urlencoding::encode;

const CONNECT_BASE: &str = "https://connect.deezer.com/oauth";

/// Permissions the migration needs: playlist management plus offline access
/// so the token keeps working for unattended runs.
pub const OAUTH_PERMISSIONS: &str = "basic_access,email,manage_library,offline_access";

/// URL to send the user to for granting access to the application.
pub fn authorize_url(app_id: &str, redirect_url: &str) -> String {
    format!(
        "{CONNECT_BASE}/auth.php?app_id={}&redirect_uri={}&perms={OAUTH_PERMISSIONS}",
        encode(app_id),
        encode(redirect_url)
    )
}

/// URL exchanging the code from the redirect for an access token.
pub fn access_token_url(app_id: &str, secret: &str, code: &str) -> String {
    format!(
        "{CONNECT_BASE}/access_token.php?app_id={}&secret={}&code={}",
        encode(app_id),
        encode(secret),
        encode(code)
    )
}
