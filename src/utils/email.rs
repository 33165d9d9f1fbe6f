use lettre::message::{MultiPart, SinglePart, header};
use lettre::transport::smtp::authentication::Credentials;
use lettre::{Message, SmtpTransport, Transport};
use tracing::{info, instrument};

use crate::config::email::EmailConfig;
use crate::utils::errors::AppError;

/// Mail collaborator consumed by the account service. Only recovery email
/// dispatch crosses this seam, so the interface stays that narrow.
pub trait RecoveryMailer: Send + Sync {
    fn send_recovery_email(
        &self,
        to_email: &str,
        code: &str,
    ) -> impl Future<Output = Result<(), AppError>> + Send;
}

#[derive(Clone, Debug)]
pub struct EmailService {
    config: EmailConfig,
}

impl EmailService {
    pub fn new(config: EmailConfig) -> Self {
        Self { config }
    }

    #[instrument(skip(self, html_body, text_body))]
    async fn send_email(
        &self,
        to_email: &str,
        subject: &str,
        text_body: &str,
        html_body: &str,
    ) -> Result<(), AppError> {
        let from = format!("{} <{}>", self.config.from_name, self.config.from_email);

        let email = Message::builder()
            .from(from.parse().map_err(|e| {
                AppError::internal(anyhow::anyhow!("Invalid from email: {}", e))
            })?)
            .to(to_email.parse().map_err(|e| {
                AppError::bad_request(anyhow::anyhow!("Invalid recipient address: {}", e))
            })?)
            .subject(subject)
            .multipart(
                MultiPart::alternative()
                    .singlepart(
                        SinglePart::builder()
                            .header(header::ContentType::TEXT_PLAIN)
                            .body(text_body.to_string()),
                    )
                    .singlepart(
                        SinglePart::builder()
                            .header(header::ContentType::TEXT_HTML)
                            .body(html_body.to_string()),
                    ),
            )
            .map_err(|e| AppError::internal(anyhow::anyhow!("Failed to build email: {}", e)))?;

        if !self.config.enabled {
            info!(to = %to_email, subject = %subject, "SMTP disabled, skipping send");
            return Ok(());
        }

        let mailer = if self.config.smtp_username.is_empty() {
            SmtpTransport::builder_dangerous(&self.config.smtp_host)
                .port(self.config.smtp_port)
                .build()
        } else {
            let creds = Credentials::new(
                self.config.smtp_username.clone(),
                self.config.smtp_password.clone(),
            );

            SmtpTransport::relay(&self.config.smtp_host)
                .map_err(|e| {
                    AppError::internal(anyhow::anyhow!("Failed to create SMTP relay: {}", e))
                })?
                .port(self.config.smtp_port)
                .credentials(creds)
                .build()
        };

        tokio::task::spawn_blocking(move || mailer.send(&email))
            .await
            .map_err(|e| AppError::internal(anyhow::anyhow!("Task join error: {}", e)))?
            .map_err(|e| AppError::internal(anyhow::anyhow!("Failed to send email: {}", e)))?;

        Ok(())
    }
}

impl RecoveryMailer for EmailService {
    async fn send_recovery_email(&self, to_email: &str, code: &str) -> Result<(), AppError> {
        let text_body = format!(
            "Your recovery code is: {}\n\n\
             The code expires in 1 hour. If you didn't request a password\n\
             reset, you can ignore this email.",
            code
        );
        let html_body = format!(
            "<p>Your recovery code is: <b>{}</b></p>\
             <p>The code expires in 1 hour. If you didn't request a password \
             reset, you can ignore this email.</p>",
            code
        );

        self.send_email(to_email, "Password Recovery", &text_body, &html_body)
            .await
    }
}
