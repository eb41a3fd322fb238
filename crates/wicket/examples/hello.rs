//! A small demo server.
//!
//! Run with: cargo run -p wicket --example hello

use hyper::StatusCode;
use serde::Deserialize;
use serde_json::json;
use wicket::{Engine, LogFormat};

#[derive(Debug, Deserialize)]
struct Login {
    user: String,
}

#[tokio::main]
async fn main() -> Result<(), wicket::Error> {
    wicket::logging::init("info", LogFormat::Pretty)?;

    let mut engine = Engine::new();

    engine.get("/hello", |ctx| async move {
        ctx.json(StatusCode::OK, &json!({"message": "hello"}))
    })?;

    engine.get("/users/:id", |ctx| async move {
        let id = ctx.param("id").unwrap_or_default();
        ctx.json(StatusCode::OK, &json!({"id": id}))
    })?;

    engine.get("/files/*path", |ctx| async move {
        let path = ctx.param("path").unwrap_or_default();
        ctx.string(StatusCode::OK, format!("would serve {}", path))
    })?;

    let mut api = engine.group("/api");
    api.post("/login", |ctx| async move {
        match ctx.should_bind::<Login>() {
            Ok(login) => ctx.json(StatusCode::OK, &json!({"welcome": login.user})),
            Err(e) => ctx.string(StatusCode::BAD_REQUEST, e.to_string()),
        }
    })?;

    engine.serve(([127, 0, 0, 1], 9091).into()).await
}
