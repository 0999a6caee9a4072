//! Tracing subscriber initialisation.

use anyhow::Result;
use tracing::Subscriber;
use tracing_subscriber::{fmt::MakeWriter, util::SubscriberInitExt, EnvFilter};

use crate::config::Environment;

/// Initialise the global tracing subscriber.
///
/// `local` gets compact human-readable output; every other environment gets
/// one JSON object per line on stdout.
///
/// # Errors
///
/// Returns an error if a global subscriber has already been set.
pub fn init_telemetry(env: Environment, log_level: &str) -> Result<()> {
    build_subscriber(env, log_level, std::io::stdout)
        .try_init()
        .map_err(|e| anyhow::anyhow!("failed to initialise tracing subscriber: {e}"))
}

fn build_subscriber<W>(
    env: Environment,
    log_level: &str,
    writer: W,
) -> Box<dyn Subscriber + Send + Sync>
where
    W: for<'w> MakeWriter<'w> + Send + Sync + 'static,
{
    let builder = tracing_subscriber::fmt()
        .with_env_filter(env_filter(log_level))
        .with_writer(writer);

    match env {
        Environment::Local => Box::new(builder.compact().finish()),
        Environment::Dev | Environment::Production => Box::new(builder.json().finish()),
    }
}

fn env_filter(log_level: &str) -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(log_level))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::{
        io,
        sync::{Arc, Mutex},
    };

    #[derive(Clone, Default)]
    struct Captured(Arc<Mutex<Vec<u8>>>);

    impl io::Write for Captured {
        fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
            self.0.lock().unwrap().extend_from_slice(buf);
            Ok(buf.len())
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    fn capture(env: Environment) -> String {
        let out = Captured::default();
        let sink = out.clone();
        let subscriber = build_subscriber(env, "info", move || sink.clone());
        tracing::subscriber::with_default(subscriber, || {
            tracing::info!(id = 7, "student created");
        });
        let bytes = out.0.lock().unwrap().clone();
        String::from_utf8(bytes).unwrap()
    }

    #[test]
    fn local_logs_are_compact_text() {
        let out = capture(Environment::Local);
        assert!(out.contains("student created"), "unexpected output: {out}");
        assert!(serde_json::from_str::<serde_json::Value>(out.trim()).is_err());
    }

    #[test]
    fn dev_and_production_log_json_lines() {
        for env in [Environment::Dev, Environment::Production] {
            let out = capture(env);
            let line: serde_json::Value = serde_json::from_str(out.trim()).unwrap();
            assert_eq!(line["level"], "INFO");
            assert_eq!(line["fields"]["message"], "student created");
            assert_eq!(line["fields"]["id"], 7);
        }
    }

    #[test]
    fn second_init_fails() {
        // Whichever call wins the race, the other must report an error
        // instead of panicking.
        let first = init_telemetry(Environment::Production, "warn");
        let second = init_telemetry(Environment::Local, "warn");
        assert!(first.is_err() || second.is_err());
    }
}
