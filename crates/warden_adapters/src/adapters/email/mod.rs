//! Email service adapters.

mod mailgun;
mod resend;
mod sendgrid;

pub use mailgun::MailgunAdapter;
pub use resend::ResendAdapter;
pub use sendgrid::SendGridAdapter;
