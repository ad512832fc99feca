use std::fmt::Write;

use common::FormSubmission;
use lettre::message::Mailbox;
use maud::{html, PreEscaped, DOCTYPE};

use crate::config::Config;
use crate::utils::mailer::ContactEmail;

const EMAIL_CSS: &str = r#"
    body { font-family: Arial, sans-serif; line-height: 1.6; color: #333; }
    .container { max-width: 600px; margin: 0 auto; padding: 20px; }
    .header { background-color: #0369A1; color: white; padding: 20px; text-align: center; }
    .content { background-color: #f9f9f9; padding: 20px; }
    .field { margin-bottom: 15px; }
    .label { font-weight: bold; color: #0369A1; }
    .value { margin-top: 5px; }
    .message-box { background-color: white; padding: 15px; border-left: 4px solid #0369A1; margin-top: 10px; }
    .footer { text-align: center; padding: 20px; color: #666; font-size: 12px; }
"#;

/// "web-development" -> "Web development"
pub fn inquiry_label(help_type: &str) -> String {
    let spaced = help_type.replace('-', " ");
    let mut chars = spaced.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

pub fn subject(prefix: &str, submission: &FormSubmission) -> String {
    format!(
        "{} {} Inquiry from {} {}",
        prefix,
        inquiry_label(&submission.help_type),
        submission.first_name,
        submission.last_name
    )
    .trim()
    .to_string()
}

/// Builds the enquiry email for an already validated submission.
pub fn compose(config: &Config, submission: &FormSubmission) -> ContactEmail {
    let reply_to = if config.reply_to_submitter {
        submitter_mailbox(submission)
    } else {
        None
    };

    ContactEmail {
        from: config.from.clone(),
        to: config.recipient.clone(),
        reply_to,
        subject: subject(&config.subject_prefix, submission),
        html: render_html(submission),
        text: render_text(submission),
    }
}

fn submitter_mailbox(submission: &FormSubmission) -> Option<Mailbox> {
    match submission.email.parse() {
        Ok(address) => {
            let name = format!("{} {}", submission.first_name, submission.last_name);
            Some(Mailbox::new(Some(name.trim().to_string()), address))
        }
        Err(e) => {
            tracing::warn!("Skipping Reply-To, submitter address rejected: {}", e);
            None
        }
    }
}

pub fn render_html(submission: &FormSubmission) -> String {
    let email = &submission.email;
    html! {
        (DOCTYPE)
        html {
            head {
                meta charset="utf-8";
                style { (PreEscaped(EMAIL_CSS)) }
            }
            body {
                div.container {
                    div.header {
                        h2 { "New Contact Form Submission" }
                    }
                    div.content {
                        div.field {
                            div.label { "Name:" }
                            div.value { (submission.first_name) " " (submission.last_name) }
                        }
                        div.field {
                            div.label { "Email:" }
                            div.value { a href={ "mailto:" (email) } { (email) } }
                        }
                        @if !submission.phone.is_empty() {
                            div.field {
                                div.label { "Phone:" }
                                div.value { (submission.phone) }
                            }
                        }
                        @if !submission.company.is_empty() {
                            div.field {
                                div.label { "Company:" }
                                div.value { (submission.company) }
                            }
                        }
                        div.field {
                            div.label { "Inquiry Type:" }
                            div.value { (inquiry_label(&submission.help_type)) }
                        }
                        div.field {
                            div.label { "Message:" }
                            div."message-box" {
                                @for (i, line) in submission.message.lines().enumerate() {
                                    @if i > 0 { br; }
                                    (line)
                                }
                            }
                        }
                    }
                    div.footer {
                        p { "This email was sent from the website contact form." }
                    }
                }
            }
        }
    }
    .into_string()
}

pub fn render_text(submission: &FormSubmission) -> String {
    let mut out = String::from("New Contact Form Submission\n\n");
    let _ = writeln!(out, "Name: {} {}", submission.first_name, submission.last_name);
    let _ = writeln!(out, "Email: {}", submission.email);
    if !submission.phone.is_empty() {
        let _ = writeln!(out, "Phone: {}", submission.phone);
    }
    if !submission.company.is_empty() {
        let _ = writeln!(out, "Company: {}", submission.company);
    }
    let _ = writeln!(out, "Inquiry Type: {}", inquiry_label(&submission.help_type));
    let _ = write!(out, "\nMessage:\n{}\n", submission.message);
    out
}
