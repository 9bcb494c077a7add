use crate::domain::models::event::Event;
use crate::domain::models::guest::Guest;
use crate::error::AppError;
use tera::Tera;

/// Renders the self-contained HTML invitation a guest can be sent as an
/// attachment or printed.
pub fn render_invite(
    templates: &Tera,
    event: &Event,
    guest: &Guest,
    confirmation_link: &str,
) -> Result<String, AppError> {
    let mut context = tera::Context::new();
    context.insert("event_name", &event.name);
    context.insert("event_date", &event.formatted_date());
    context.insert("event_time", &event.formatted_time());
    context.insert("event_location", &event.location);
    context.insert("banner_url", &event.banner_url);
    context.insert("guest_name", &guest.name);
    context.insert("guest_formal_name", &guest.formal_name());
    context.insert("guest_email", &guest.email);
    context.insert("confirmation_link", confirmation_link);

    templates.render("invite.html", &context).map_err(|e| {
        AppError::InternalWithMsg(format!("Invite template render error: {:?}", e))
    })
}

/// Download filename: `convite-<event>-<guest>.html`, lowercased,
/// whitespace collapsed to dashes, everything else stripped.
pub fn invite_filename(event: &Event, guest: &Guest) -> String {
    format!("convite-{}-{}.html", slugify(&event.name), slugify(&guest.name))
}

pub fn slugify(text: &str) -> String {
    let mut slug = String::with_capacity(text.len());
    let mut last_dash = true;
    for ch in text.to_lowercase().chars() {
        if ch.is_ascii_alphanumeric() {
            slug.push(ch);
            last_dash = false;
        } else if ch.is_whitespace() && !last_dash {
            slug.push('-');
            last_dash = true;
        }
    }
    slug.trim_end_matches('-').to_string()
}
