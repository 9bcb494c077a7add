use crate::domain::models::event::Event;
use crate::domain::models::guest::Guest;

/// Literal `{{token}}` substitution for guest-authored email templates.
///
/// Deliberately not a template engine: organizers paste arbitrary text,
/// and anything that is not a known token (stray braces included) must
/// pass through unchanged instead of being rejected as a syntax error.
pub fn substitute(text: &str, event: &Event, guest: &Guest, confirmation_link: &str) -> String {
    let replacements = [
        ("{{nome}}", guest.name.clone()),
        ("{{email}}", guest.email.clone()),
        ("{{cargo}}", guest.role_title.clone().unwrap_or_default()),
        ("{{nome_formal}}", guest.formal_name()),
        ("{{link}}", confirmation_link.to_string()),
        ("{{evento}}", event.name.clone()),
        ("{{data}}", event.formatted_date()),
        ("{{hora}}", event.formatted_time()),
        ("{{local}}", event.location.clone()),
    ];

    let mut out = text.to_string();
    for (token, value) in replacements {
        out = out.replace(token, &value);
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{NaiveDate, NaiveTime};

    fn fixtures() -> (Event, Guest) {
        let event = Event::new(
            "Gala 2026".to_string(),
            NaiveDate::from_ymd_opt(2026, 3, 7).unwrap(),
            NaiveTime::from_hms_opt(20, 0, 0).unwrap(),
            "Teatro Municipal".to_string(),
            None,
            None,
        );
        let guest = Guest::new(
            event.id.clone(),
            "Ana Costa".to_string(),
            "ana@example.com".to_string(),
            Some("Eng.ª".to_string()),
            None,
        );
        (event, guest)
    }

    #[test]
    fn test_substitutes_all_known_tokens() {
        let (event, guest) = fixtures();
        let body = "Caro(a) {{nome_formal}},\n{{evento}} em {{data}} às {{hora}}, {{local}}.\nLink: {{link}}";
        let out = substitute(body, &event, &guest, "http://x/confirmar?id=1");

        assert!(out.contains("Eng.ª Ana Costa"));
        assert!(out.contains("Gala 2026 em 7 de março de 2026 às 20:00, Teatro Municipal."));
        assert!(out.contains("Link: http://x/confirmar?id=1"));
        assert!(!out.contains("{{"));
    }

    #[test]
    fn test_unknown_tokens_pass_through() {
        let (event, guest) = fixtures();
        let out = substitute("Olá {{nome}}, {{desconhecido}} {% raw %}", &event, &guest, "L");
        assert_eq!(out, "Olá Ana Costa, {{desconhecido}} {% raw %}");
    }

    #[test]
    fn test_missing_title_renders_empty_cargo() {
        let (event, mut guest) = fixtures();
        guest.role_title = None;
        let out = substitute("[{{cargo}}] {{nome_formal}}", &event, &guest, "L");
        assert_eq!(out, "[] Ana Costa");
    }
}
