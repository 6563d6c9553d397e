// backend location, API_BASE_URL at build time overrides the page host
const API_PORT: u16 = 8081;

pub fn api_base_url() -> String {
    match option_env!("API_BASE_URL") {
        Some(url) => url.trim_end_matches('/').to_string(),
        None => host_url().unwrap_or_else(|| format!("http://127.0.0.1:{API_PORT}")),
    }
}

fn host_url() -> Option<String> {
    let location = web_sys::window()?.location();
    Some(format!(
        "{}//{}:{}",
        location.protocol().ok()?,
        location.hostname().ok()?,
        API_PORT
    ))
}

pub fn join(base: &str, endpoint: &str) -> String {
    format!(
        "{}/{}",
        base.trim_end_matches('/'),
        endpoint.trim_start_matches('/')
    )
}
