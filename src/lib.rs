//! Medibook — dialogue core of a medical appointment assistant.
//!
//! Routes free-text patient messages to a domain handler (doctor, specialty,
//! clinic, general), resolves conversational context from the stored
//! transcript, grounds an instruction in live booking data and dispatches it
//! to a text-generation backend, persisting each completed exchange.
//!
//! Entry points:
//! - [`pipeline::orchestrator::ChatPipeline`] — one message in, one reply out
//! - [`pipeline::session::SessionManager`] — transcript reads and deletes
//! - [`pipeline::gemini::GeminiClient`] — production generation backend

pub mod config;
pub mod db;
pub mod models;
pub mod pipeline;

use tracing_subscriber::EnvFilter;

/// Install the global tracing subscriber. Safe to call more than once; later
/// calls are no-ops.
pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(config::default_log_filter())),
        )
        .try_init();
}
