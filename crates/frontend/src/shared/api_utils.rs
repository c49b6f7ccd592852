//! Адрес бэкенда для запросов из браузера

/// Бэкенд слушает тот же хост, порт фиксированный
const BACKEND_PORT: u16 = 3000;

/// Base URL like "http://localhost:3000"; empty if there is no window
pub fn api_base() -> String {
    let window = match web_sys::window() {
        Some(w) => w,
        None => return String::new(),
    };
    let location = window.location();
    let protocol = location.protocol().unwrap_or_else(|_| "http:".to_string());
    let hostname = location
        .hostname()
        .unwrap_or_else(|_| "127.0.0.1".to_string());
    format!("{}//{}:{}", protocol, hostname, BACKEND_PORT)
}

/// Full URL for an API path (starts with "/api/")
pub fn api_url(path: &str) -> String {
    format!("{}{}", api_base(), path)
}
