// handlers/protected/hello.rs - GET /private/secure/hello handler

/// Authenticated smoke test.
pub async fn hello_get() -> &'static str {
    "Hello World / Olá Mundo"
}
