//! Email service for account confirmation and password reset messages.

use lettre::{
    AsyncFileTransport, AsyncSmtpTransport, AsyncTransport, Message, Tokio1Executor,
    message::{Mailbox, header::ContentType},
    transport::smtp::authentication::Credentials,
};
use minijinja::{Environment, Value, context};
use std::{path::Path, sync::Arc};
use tracing::{debug, instrument, warn};

use crate::{
    config::{Config, EmailTransportConfig},
    errors::Error,
};

#[derive(Clone)]
pub struct EmailService {
    transport: EmailTransport,
    from_email: String,
    from_name: String,
    reply_to: Option<String>,
}

#[derive(Clone)]
enum EmailTransport {
    Smtp(AsyncSmtpTransport<Tokio1Executor>),
    File(AsyncFileTransport<Tokio1Executor>),
}

impl EmailService {
    pub fn new(config: &Config) -> Result<Self, Error> {
        let email_config = &config.email;

        let transport = match &email_config.transport {
            EmailTransportConfig::Smtp {
                host,
                port,
                username,
                password,
                use_tls,
            } => {
                if !use_tls {
                    warn!("SMTP TLS is disabled - this is not recommended for production");
                }

                let smtp_builder = match (*use_tls, *port) {
                    (true, 465) => AsyncSmtpTransport::<Tokio1Executor>::relay(host),
                    (true, _) => AsyncSmtpTransport::<Tokio1Executor>::starttls_relay(host),
                    (false, _) => Ok(AsyncSmtpTransport::<Tokio1Executor>::builder_dangerous(host)),
                }
                .map_err(|e| Error::Internal {
                    operation: format!("create SMTP transport: {e}"),
                })?
                .port(*port)
                .credentials(Credentials::new(username.clone(), password.clone()));

                EmailTransport::Smtp(smtp_builder.build())
            }
            EmailTransportConfig::File { path } => {
                let emails_dir = Path::new(path);
                if !emails_dir.exists() {
                    std::fs::create_dir_all(emails_dir).map_err(|e| Error::Internal {
                        operation: format!("create emails directory: {e}"),
                    })?;
                }
                EmailTransport::File(AsyncFileTransport::<Tokio1Executor>::new(emails_dir))
            }
        };

        Ok(Self {
            transport,
            from_email: email_config.from_email.clone(),
            from_name: email_config.from_name.clone(),
            reply_to: email_config.reply_to.clone(),
        })
    }

    /// Send the account confirmation link to a newly registered user.
    #[instrument(skip(self, confirm_link), err)]
    pub async fn send_confirmation_email(&self, to_email: &str, to_name: &str, confirm_link: &str) -> Result<(), Error> {
        let body = create_confirmation_body(to_name, confirm_link)?;
        self.send_email(to_email, Some(to_name), "Confirm your Brewchemy account", &body)
            .await
    }

    #[instrument(skip(self, reset_link), err)]
    pub async fn send_password_reset_email(&self, to_email: &str, to_name: &str, reset_link: &str) -> Result<(), Error> {
        let body = create_password_reset_body(to_name, reset_link)?;
        self.send_email(to_email, Some(to_name), "Change Password", &body).await
    }

    async fn send_email(&self, to_email: &str, to_name: Option<&str>, subject: &str, body: &str) -> Result<(), Error> {
        let from = format!("{} <{}>", self.from_name, self.from_email)
            .parse::<Mailbox>()
            .map_err(|e| Error::Internal {
                operation: format!("parse from email: {e}"),
            })?;

        let to = if let Some(name) = to_name {
            format!("{name} <{to_email}>")
        } else {
            to_email.to_string()
        }
        .parse::<Mailbox>()
        .map_err(|e| Error::Internal {
            operation: format!("parse to email: {e}"),
        })?;

        let mut builder = Message::builder().from(from).to(to).subject(subject).header(ContentType::TEXT_HTML);
        if let Some(reply_to) = &self.reply_to {
            let reply_to = reply_to.parse::<Mailbox>().map_err(|e| Error::Internal {
                operation: format!("parse reply-to email: {e}"),
            })?;
            builder = builder.reply_to(reply_to);
        }

        let message = builder.body(body.to_string()).map_err(|e| Error::Internal {
            operation: format!("build email message: {e}"),
        })?;

        match &self.transport {
            EmailTransport::Smtp(smtp) => {
                smtp.send(message).await.map_err(|e| Error::Internal {
                    operation: format!("send SMTP email: {e}"),
                })?;
            }
            EmailTransport::File(file) => {
                file.send(message).await.map_err(|e| Error::Internal {
                    operation: format!("send file email: {e}"),
                })?;
            }
        }

        debug!(subject, "Email sent");
        Ok(())
    }
}

/// A message to deliver off the request path.
#[derive(Debug, Clone)]
pub enum OutgoingEmail {
    Confirmation { to_email: String, to_name: String, link: String },
    PasswordReset { to_email: String, to_name: String, link: String },
}

/// Deliver in the background. Failures are logged; the request that triggered the email has
/// already succeeded by the time they happen.
pub fn send_in_background(service: Arc<EmailService>, email: OutgoingEmail) {
    tokio::spawn(async move {
        let result = match &email {
            OutgoingEmail::Confirmation { to_email, to_name, link } => service.send_confirmation_email(to_email, to_name, link).await,
            OutgoingEmail::PasswordReset { to_email, to_name, link } => {
                service.send_password_reset_email(to_email, to_name, link).await
            }
        };
        if let Err(e) = result {
            warn!(error = %e, "Failed to send email");
        }
    });
}

/// Templates are named `*.html`, so every value except the marked-safe link is HTML-escaped.
const CONFIRMATION_TEMPLATE: &str = r#"<!DOCTYPE html>
<html>
<head>
    <meta charset="utf-8">
    <title>Confirm your account</title>
    <style>
        body { font-family: Arial, sans-serif; line-height: 1.6; color: #333; }
        .container { max-width: 600px; margin: 0 auto; padding: 20px; }
        .footer { margin-top: 30px; font-size: 12px; color: #666; }
    </style>
</head>
<body>
    <div class="container">
        <h2>Welcome to Brewchemy</h2>

        <p>Hello {{ to_name }},</p>

        <p>Thanks for signing up. Please confirm your email address to activate your account:</p>

        <p><a href="{{ link }}">Confirm my account</a></p>

        <p>Or copy and paste this link into your browser:</p>
        <p>{{ link }}</p>

        <div class="footer">
            <p>If you didn't create an account, you can safely ignore this email.</p>
        </div>
    </div>
</body>
</html>"#;

const PASSWORD_RESET_TEMPLATE: &str = r#"<!DOCTYPE html>
<html>
<head>
    <meta charset="utf-8">
    <title>Change Password</title>
    <style>
        body { font-family: Arial, sans-serif; line-height: 1.6; color: #333; }
        .container { max-width: 600px; margin: 0 auto; padding: 20px; }
        .footer { margin-top: 30px; font-size: 12px; color: #666; }
    </style>
</head>
<body>
    <div class="container">
        <h2>Change Password</h2>

        <p>Hello {{ to_name }},</p>

        <p>We received a request to change your password. If you didn't make this request, you can safely ignore this email.</p>

        <p><a href="{{ link }}">Change your password</a></p>

        <p>Or copy and paste this link into your browser:</p>
        <p>{{ link }}</p>

        <div class="footer">
            <p>This is an automated message, please do not reply to this email.</p>
        </div>
    </div>
</body>
</html>"#;

fn render_body(template_name: &str, source: &str, to_name: &str, link: &str) -> Result<String, Error> {
    let render_error = |e: minijinja::Error| Error::Internal {
        operation: format!("render {template_name}: {e}"),
    };

    let mut env = Environment::new();
    env.add_template(template_name, source).map_err(render_error)?;
    // Links are built from configured base URLs and generated tokens
    let link = Value::from_safe_string(link.to_string());
    env.get_template(template_name)
        .and_then(|template| template.render(context! { to_name, link }))
        .map_err(render_error)
}

fn create_confirmation_body(to_name: &str, confirm_link: &str) -> Result<String, Error> {
    render_body("confirmation.html", CONFIRMATION_TEMPLATE, to_name, confirm_link)
}

fn create_password_reset_body(to_name: &str, reset_link: &str) -> Result<String, Error> {
    render_body("password_reset.html", PASSWORD_RESET_TEMPLATE, to_name, reset_link)
}
