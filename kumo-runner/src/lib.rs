//! Kumo Runner — one watcher invocation from fetch to publish.
//!
//! Sequences the core components (fetch → compute → evaluate → dedup/notify
//! → publish), resolves configuration, and owns the e-mail channel. The
//! binary in `kumo-cli` is a thin wrapper over [`runner::run_once`].

pub mod config;
pub mod notify;
pub mod publish;
pub mod runner;

pub use config::{Config, SmtpConfig};
pub use notify::{EmailNotifier, Notifier, NotifyError};
pub use publish::publish_snapshot;
pub use runner::{run_once, RunOutcome, MIN_BARS};
