pub mod trips;

// ─── GET /hello ──────────────────────────────────────────────────

pub async fn hello() -> &'static str {
    "Hello World!"
}
