//! Where the backend lives, as seen from the browser

/// Backend base URL: same protocol and host as the page, port 3000.
///
/// Empty when there is no window (tests, workers), which turns every API
/// path into a relative one.
pub fn api_base() -> String {
    let Some(window) = web_sys::window() else {
        return String::new();
    };
    let location = window.location();
    let protocol = location.protocol().unwrap_or_else(|_| "http:".to_string());
    let hostname = location
        .hostname()
        .unwrap_or_else(|_| "127.0.0.1".to_string());
    format!("{}//{}:3000", protocol, hostname)
}
