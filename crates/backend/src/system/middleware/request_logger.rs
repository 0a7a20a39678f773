use axum::body::{to_bytes, Body};
use axum::http::{header, Request, StatusCode};
use axum::middleware::Next;
use axum::response::Response;
use chrono::Local;

/// Middleware для логирования HTTP запросов
///
/// Выводит в консоль: время, длительность (ms), размер ответа, статус,
/// метод и путь. Страницы и API дублируются в tracing.
pub async fn request_logger(req: Request<Body>, next: Next) -> Response {
    let start = std::time::Instant::now();
    let method = req.method().clone();
    let path = req.uri().path().to_string();

    let response = next.run(req).await;
    let (parts, body) = response.into_parts();

    // Размер известен из заголовка: тело не трогаем
    let known_size = parts
        .headers
        .get(header::CONTENT_LENGTH)
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.parse::<usize>().ok());

    let (body, size) = match known_size {
        Some(size) => (body, Some(size)),
        None => match to_bytes(body, usize::MAX).await {
            Ok(bytes) => {
                let size = bytes.len();
                (Body::from(bytes), Some(size))
            }
            Err(_) => (Body::default(), None),
        },
    };

    let duration = start.elapsed();
    let size_label = size.map(format_number).unwrap_or_else(|| "error".to_string());

    println!(
        "\x1b[{}m{}\x1b[0m | {:>5}ms | {:>12} | {} {:>6} {}",
        status_color(parts.status),
        Local::now().format("%H:%M:%S"),
        duration.as_millis(),
        size_label,
        parts.status.as_u16(),
        method,
        path
    );

    if path.starts_with("/api/") || path.starts_with("/product/") {
        tracing::debug!(
            status = parts.status.as_u16(),
            elapsed_ms = duration.as_millis() as u64,
            "{} {}",
            method,
            path
        );
    }

    Response::from_parts(parts, body)
}

/// Голубой для 2xx, коричневый для 4xx, красный для 5xx
fn status_color(status: StatusCode) -> &'static str {
    if status.is_success() {
        "36"
    } else if status.is_server_error() {
        "31"
    } else {
        "33"
    }
}

/// Число с разделителями тысяч (точками): 1234567 -> "1.234.567"
fn format_number(n: usize) -> String {
    let s = n.to_string();
    let mut result = String::new();
    for (i, ch) in s.chars().rev().enumerate() {
        if i > 0 && i % 3 == 0 {
            result.push('.');
        }
        result.push(ch);
    }
    result.chars().rev().collect()
}
