//! Structured logging for the dashboard core.
//!
//! Every entry is one JSON object per line on stdout:
//! 1. Level threshold from `LOG_LEVEL` (trace → fatal)
//! 2. Domain categories for filtering via `LOG_DOMAINS`
//! 3. Monotonic sequence numbers so a refresh round trip can be followed in order
//! 4. Snapshot digests on refresh for audit/replay

use chrono::Utc;
use serde::{Deserialize, Serialize};
use serde_json::{json, Map, Value};
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Instant;

// =============================================================================
// Log Levels
// =============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Level {
    Trace = 0,
    Debug = 1,
    Info = 2,
    Warn = 3,
    Error = 4,
    Fatal = 5,
}

impl Level {
    pub fn from_env() -> Self {
        match std::env::var("LOG_LEVEL").as_deref() {
            Ok("trace") => Level::Trace,
            Ok("debug") => Level::Debug,
            Ok("info") => Level::Info,
            Ok("warn") => Level::Warn,
            Ok("error") => Level::Error,
            Ok("fatal") => Level::Fatal,
            _ => Level::Info,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Level::Trace => "trace",
            Level::Debug => "debug",
            Level::Info => "info",
            Level::Warn => "warn",
            Level::Error => "error",
            Level::Fatal => "fatal",
        }
    }
}

// =============================================================================
// Log Domains (categories for filtering)
// =============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Domain {
    Store,      // Team create/update/delete
    Projection, // Series recomputation on selector/dataset change
    Query,      // Search and sort application
    Refresh,    // Refresh round trips
    System,     // Startup, shutdown, config
    Profile,    // Timing scopes
    Audit,      // Snapshot digests
}

impl Domain {
    pub fn as_str(&self) -> &'static str {
        match self {
            Domain::Store => "store",
            Domain::Projection => "projection",
            Domain::Query => "query",
            Domain::Refresh => "refresh",
            Domain::System => "system",
            Domain::Profile => "profile",
            Domain::Audit => "audit",
        }
    }

    pub fn is_enabled(&self) -> bool {
        // LOG_DOMAINS is a comma-separated list or "all"
        match std::env::var("LOG_DOMAINS").as_deref() {
            Ok("all") | Err(_) => true,
            Ok(domains) => domains.split(',').any(|d| d.trim() == self.as_str()),
        }
    }
}

// =============================================================================
// Sequence counter for ordering
// =============================================================================

static LOG_SEQ: AtomicU64 = AtomicU64::new(0);

fn next_seq() -> u64 {
    LOG_SEQ.fetch_add(1, Ordering::SeqCst)
}

// =============================================================================
// Core logging functions
// =============================================================================

/// RFC3339 timestamp with milliseconds
pub fn ts_now() -> String {
    Utc::now().to_rfc3339_opts(chrono::SecondsFormat::Millis, true)
}

/// Emit a structured log entry
pub fn log(level: Level, domain: Domain, event: &str, fields: Map<String, Value>) {
    if level < Level::from_env() || !domain.is_enabled() {
        return;
    }
    println!("{}", render(level, domain.as_str(), event, fields));
}

fn render(level: Level, component: &str, event: &str, mut fields: Map<String, Value>) -> String {
    let msg = fields.remove("msg").unwrap_or(Value::String(String::new()));
    let mut entry = Map::new();
    entry.insert("ts".to_string(), json!(ts_now()));
    entry.insert("seq".to_string(), json!(next_seq()));
    entry.insert("lvl".to_string(), json!(level.as_str().to_uppercase()));
    entry.insert("component".to_string(), json!(component));
    entry.insert("event".to_string(), json!(event));
    entry.insert("msg".to_string(), msg);
    entry.insert("data".to_string(), Value::Object(fields));
    Value::Object(entry).to_string()
}

// =============================================================================
// Domain helpers
// =============================================================================

/// Log a team mutation (create/update/delete)
pub fn log_team_mutation(op: &str, id: u32, team_count: usize) {
    log(
        Level::Info,
        Domain::Store,
        op,
        obj(&[("team_id", json!(id)), ("team_count", json!(team_count))]),
    );
}

/// Log a rejected store operation; these are caller bugs, never user input
pub fn log_precondition_failure(op: &str, reason: &str) {
    log(
        Level::Error,
        Domain::Store,
        "precondition_failed",
        obj(&[("op", v_str(op)), ("msg", v_str(reason))]),
    );
}

pub fn log_projection(region: &str, product: &str, points: usize, total_actual: f64) {
    log(
        Level::Debug,
        Domain::Projection,
        "recompute",
        obj(&[
            ("region", v_str(region)),
            ("product", v_str(product)),
            ("points", json!(points)),
            ("total_actual", v_num(total_actual)),
        ]),
    );
}

pub fn log_query(search: &str, sort_key: &str, order: &str, matched: usize, total: usize) {
    log(
        Level::Debug,
        Domain::Query,
        "apply",
        obj(&[
            ("search", v_str(search)),
            ("sort_key", v_str(sort_key)),
            ("order", v_str(order)),
            ("matched", json!(matched)),
            ("total", json!(total)),
        ]),
    );
}

pub fn log_refresh_started(context: &str, ticket: u64) {
    log(
        Level::Info,
        Domain::Refresh,
        "started",
        obj(&[("context", v_str(context)), ("ticket", json!(ticket))]),
    );
}

pub fn log_refresh_completed(context: &str, ticket: u64, elapsed_ms: f64) {
    log(
        Level::Info,
        Domain::Refresh,
        "completed",
        obj(&[
            ("context", v_str(context)),
            ("ticket", json!(ticket)),
            ("elapsed_ms", v_num(elapsed_ms)),
        ]),
    );
}

/// Audit entry linking the snapshot a refresh replaced to the one it installed
pub fn log_audit(context: &str, before_digest: &str, after_digest: &str) {
    log(
        Level::Info,
        Domain::Audit,
        "snapshot_replaced",
        obj(&[
            ("context", v_str(context)),
            ("before", v_str(before_digest)),
            ("after", v_str(after_digest)),
        ]),
    );
}

/// A snapshot could not be digested; the audit entry for this refresh is missing
pub fn log_digest_failure(context: &str, reason: &str) {
    log(
        Level::Error,
        Domain::Audit,
        "digest_failed",
        obj(&[("context", v_str(context)), ("reason", v_str(reason))]),
    );
}

// =============================================================================
// Utility Functions
// =============================================================================

pub fn obj(pairs: &[(&str, Value)]) -> Map<String, Value> {
    let mut map = Map::new();
    for (k, v) in pairs {
        map.insert((*k).to_string(), v.clone());
    }
    map
}

pub fn v_str(s: &str) -> Value {
    Value::String(s.to_string())
}

pub fn v_num(n: f64) -> Value {
    json!(n)
}

// =============================================================================
// Profiling Scope
// =============================================================================

/// Profiling scope that emits structured timing on drop.
pub struct ProfileScope {
    label: &'static str,
    context: Option<Map<String, Value>>,
    started: Instant,
    enabled: bool,
}

impl ProfileScope {
    pub fn new(label: &'static str) -> Self {
        Self::with_context(label, &[])
    }

    /// Fields are only captured when profile entries would actually be written.
    pub fn with_context(label: &'static str, fields: &[(&str, Value)]) -> Self {
        let enabled = Level::Trace >= Level::from_env() && Domain::Profile.is_enabled();
        Self {
            label,
            context: if enabled { Some(obj(fields)) } else { None },
            started: Instant::now(),
            enabled,
        }
    }
}

impl Drop for ProfileScope {
    fn drop(&mut self) {
        if !self.enabled {
            return;
        }
        let elapsed_ms = self.started.elapsed().as_secs_f64() * 1000.0;
        let mut fields = self.context.take().unwrap_or_default();
        fields.insert("label".to_string(), v_str(self.label));
        fields.insert("elapsed_ms".to_string(), v_num(elapsed_ms));
        log(Level::Trace, Domain::Profile, "profile", fields);
    }
}

// =============================================================================
// Tests
// =============================================================================
