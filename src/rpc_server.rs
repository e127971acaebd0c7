//! ShyNav RPC Server: JSON-RPC over stdin/stdout for an out-of-process UI.
//!
//! Protocol: one JSON object per line (newline-delimited JSON).
//! Request:  {"id":1, "method":"tab.create", "params":{"url":"..."}}
//! Response: {"id":1, "result":{...}} or {"id":1, "error":"..."}
//! Push:     {"event":"notification", "data":{"type":"title_changed", ...}}
//!
//! Tabs run on the headless surface provider; the UI process delivers real
//! surface events back through `surface.event`.

use std::io::{self, Write};
use std::time::Instant;

use serde_json::{json, Value};
use tokio::io::{AsyncBufReadExt, BufReader};

use shynav::app::App;
use shynav::rpc_handler::handle_method;
use shynav::services::settings_engine::{SettingsEngine, SettingsEngineTrait};

/// Simple rate limiter: max requests per one-second window.
struct RateLimiter {
    window_start: Instant,
    request_count: u32,
    max_per_second: u32,
}

impl RateLimiter {
    fn new(max_per_second: u32) -> Self {
        Self { window_start: Instant::now(), request_count: 0, max_per_second }
    }

    /// Returns true if the request is allowed, false if rate-limited.
    fn check(&mut self) -> bool {
        if self.window_start.elapsed().as_secs() >= 1 {
            self.window_start = Instant::now();
            self.request_count = 0;
        }
        self.request_count += 1;
        self.request_count <= self.max_per_second
    }
}

fn emit(message: &Value) {
    let stdout = io::stdout();
    let mut out = stdout.lock();
    if writeln!(out, "{}", message).and_then(|_| out.flush()).is_err() {
        log::error!("stdout closed, dropping message");
    }
}

fn respond(app: &mut App, line: &str, rate_limiter: &mut RateLimiter) -> Value {
    let req: Value = match serde_json::from_str(line) {
        Ok(v) => v,
        Err(e) => return json!({"id": null, "error": format!("parse error: {}", e)}),
    };
    let id = req.get("id").cloned().unwrap_or(Value::Null);

    if !rate_limiter.check() {
        log::warn!("rate limit exceeded, rejecting request {}", id);
        return json!({"id": id, "error": "rate limit exceeded"});
    }

    let method = req.get("method").and_then(|v| v.as_str()).unwrap_or("");
    let params = req.get("params").cloned().unwrap_or(json!({}));
    log::debug!("rpc {} {}", id, method);

    match handle_method(app, method, &params) {
        Ok(val) => json!({"id": id, "result": val}),
        Err(err) => json!({"id": id, "error": err}),
    }
}

#[tokio::main(flavor = "current_thread")]
async fn main() {
    let mut settings_engine = SettingsEngine::new(None);
    if let Err(e) = settings_engine.load() {
        eprintln!("shynav-rpc: {}; falling back to defaults", e);
    }
    let level = settings_engine.get_settings().logging.level.clone();
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level)).init();

    let (mut app, _probe) = App::with_headless(settings_engine);
    let mut notifications = app.subscribe();

    emit(&json!({"event": "ready", "version": env!("CARGO_PKG_VERSION")}));
    log::info!("rpc server ready");

    // Max 200 requests per second.
    let mut rate_limiter = RateLimiter::new(200);
    let mut lines = BufReader::new(tokio::io::stdin()).lines();

    loop {
        tokio::select! {
            line = lines.next_line() => {
                let line = match line {
                    Ok(Some(l)) => l,
                    Ok(None) => break,
                    Err(e) => {
                        log::error!("stdin read failed: {}", e);
                        break;
                    }
                };
                if line.trim().is_empty() {
                    continue;
                }
                let response = respond(&mut app, &line, &mut rate_limiter);
                emit(&response);
                app.pump_events();
            }
            Some(notification) = notifications.recv() => {
                match serde_json::to_value(&notification) {
                    Ok(data) => emit(&json!({"event": "notification", "data": data})),
                    Err(e) => log::warn!("could not encode notification: {}", e),
                }
            }
        }
    }

    app.shutdown();
    log::info!("stdin closed, exiting");
}
