use askama::Template;

use crate::models::Submission;

#[derive(Template)]
#[template(path = "email/notification.html")]
struct NotificationHtml<'a> {
    name: &'a str,
    email: &'a str,
    message: &'a str,
    date: String,
}

#[derive(Template)]
#[template(path = "email/notification.txt")]
struct NotificationText<'a> {
    name: &'a str,
    email: &'a str,
    message: &'a str,
    date: String,
}

pub fn subject(name: &str) -> String {
    format!("New Contact Form Submission from {name}")
}

pub fn render_notification_text(submission: &Submission) -> Result<String, String> {
    NotificationText {
        name: &submission.name,
        email: &submission.email,
        message: &submission.message,
        date: format_date(submission),
    }
    .render()
    .map_err(|e| format!("Failed to render text body: {e}"))
}

pub fn render_notification_html(submission: &Submission) -> Result<String, String> {
    NotificationHtml {
        name: &submission.name,
        email: &submission.email,
        message: &submission.message,
        date: format_date(submission),
    }
    .render()
    .map_err(|e| format!("Failed to render HTML body: {e}"))
}

fn format_date(submission: &Submission) -> String {
    submission.date.format("%Y-%m-%d %H:%M:%S UTC").to_string()
}
