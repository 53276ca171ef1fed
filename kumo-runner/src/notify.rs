//! Outbound notification channel.
//!
//! Delivery is best-effort: the runner attempts each recipient independently
//! and logs failures without aborting the run. A lost e-mail is recoverable
//! (the snapshot still updates); a crashed run is not.

use crate::config::SmtpConfig;
use chrono::NaiveDate;
use kumo_core::signal::Signal;
use lettre::message::{Mailbox, MultiPart};
use lettre::transport::smtp::authentication::Credentials;
use lettre::{Message, SmtpTransport, Transport};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum NotifyError {
    #[error("invalid message: {0}")]
    Message(String),

    #[error("smtp transport: {0}")]
    Transport(String),
}

/// Port for the notification channel: one delivery attempt per call.
pub trait Notifier {
    fn notify(
        &self,
        recipient: &str,
        subject: &str,
        text: &str,
        html: &str,
    ) -> Result<(), NotifyError>;
}

/// SMTP notifier over STARTTLS with credentials from the config.
pub struct EmailNotifier {
    transport: SmtpTransport,
    from: Mailbox,
}

impl EmailNotifier {
    pub fn from_config(smtp: &SmtpConfig) -> Result<Self, NotifyError> {
        let transport = SmtpTransport::starttls_relay(&smtp.host)
            .map_err(|e| NotifyError::Transport(e.to_string()))?
            .port(smtp.port)
            .credentials(Credentials::new(smtp.user.clone(), smtp.password.clone()))
            .build();

        let from = smtp
            .from
            .parse()
            .map_err(|e: lettre::address::AddressError| NotifyError::Message(e.to_string()))?;

        Ok(Self { transport, from })
    }
}

impl Notifier for EmailNotifier {
    fn notify(
        &self,
        recipient: &str,
        subject: &str,
        text: &str,
        html: &str,
    ) -> Result<(), NotifyError> {
        let to: Mailbox = recipient
            .parse()
            .map_err(|e: lettre::address::AddressError| NotifyError::Message(e.to_string()))?;

        let message = Message::builder()
            .from(self.from.clone())
            .to(to)
            .subject(subject)
            .multipart(MultiPart::alternative_plain_html(
                text.to_string(),
                html.to_string(),
            ))
            .map_err(|e| NotifyError::Message(e.to_string()))?;

        self.transport
            .send(&message)
            .map_err(|e| NotifyError::Transport(e.to_string()))?;
        Ok(())
    }
}

/// Subject line for a signal alert.
pub fn alert_subject(signal: Signal, ticker: &str) -> String {
    format!("{signal} Signal Alert: {ticker}")
}

/// Plain-text alert body.
pub fn alert_text(signal: Signal, ticker: &str, price: f64, date: NaiveDate) -> String {
    format!(
        "{ticker} closed at {price:.2} on {date}.\n\
         Ichimoku signal: {signal}.\n"
    )
}

/// HTML alert body.
pub fn alert_html(signal: Signal, ticker: &str, price: f64, date: NaiveDate) -> String {
    format!(
        "<html><body>\
         <h2>{signal} Signal Alert: {ticker}</h2>\
         <p>{ticker} closed at <strong>{price:.2}</strong> on {date}.</p>\
         <p>The Ichimoku Cloud evaluation for the day is <strong>{signal}</strong>.</p>\
         </body></html>"
    )
}
