use crate::domain::models::guest::Guest;
use crate::error::AppError;
use serde::Deserialize;

/// A validated row from an uploaded guest list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImportedGuest {
    pub name: String,
    pub email: String,
    pub table_label: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ImportRow {
    #[serde(default)]
    nome: String,
    #[serde(default)]
    email: String,
    #[serde(default)]
    mesa: String,
}

/// Parses the semicolon-delimited upload format `nome;email;mesa`.
///
/// Rows missing a name or an email are silently dropped; when an email
/// cell carries several `;`-separated addresses only the first is kept.
/// `mesa` is optional. No duplicate detection is performed.
pub fn parse_import(data: &str) -> Result<Vec<ImportedGuest>, AppError> {
    let mut reader = csv::ReaderBuilder::new()
        .delimiter(b';')
        .flexible(true)
        .trim(csv::Trim::All)
        .from_reader(data.as_bytes());

    let mut guests = Vec::new();
    for row in reader.deserialize::<ImportRow>() {
        let row = row.map_err(|e| AppError::Validation(format!("Invalid CSV: {}", e)))?;

        let name = row.nome.trim();
        let email = row.email.trim();
        if name.is_empty() || email.is_empty() {
            continue;
        }

        let first_email = email
            .split(';')
            .map(str::trim)
            .find(|part| !part.is_empty())
            .unwrap_or_default();
        if first_email.is_empty() {
            continue;
        }

        let mesa = row.mesa.trim();
        guests.push(ImportedGuest {
            name: name.to_string(),
            email: first_email.to_string(),
            table_label: if mesa.is_empty() {
                None
            } else {
                Some(mesa.to_string())
            },
        });
    }

    Ok(guests)
}

/// Renders the dashboard export: comma-separated, every field quoted,
/// booleans as Sim/Não.
pub fn render_export(guests: &[Guest]) -> Result<String, AppError> {
    let mut writer = csv::WriterBuilder::new()
        .quote_style(csv::QuoteStyle::Always)
        .from_writer(Vec::new());

    writer
        .write_record([
            "Nome",
            "Email",
            "Cargo",
            "Mesa",
            "Confirmado",
            "Rejeitado",
            "Check-in",
        ])
        .map_err(|e| AppError::InternalWithMsg(format!("CSV export failed: {}", e)))?;

    for guest in guests {
        writer
            .write_record([
                guest.name.as_str(),
                guest.email.as_str(),
                guest.role_title.as_deref().unwrap_or(""),
                guest.table_label.as_deref().unwrap_or(""),
                sim_nao(guest.confirmed),
                sim_nao(guest.rejected),
                sim_nao(guest.checked_in),
            ])
            .map_err(|e| AppError::InternalWithMsg(format!("CSV export failed: {}", e)))?;
    }

    let bytes = writer
        .into_inner()
        .map_err(|e| AppError::InternalWithMsg(format!("CSV export failed: {}", e)))?;
    String::from_utf8(bytes).map_err(|_| AppError::Internal)
}

fn sim_nao(value: bool) -> &'static str {
    if value {
        "Sim"
    } else {
        "Não"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_import_drops_rows_missing_name_or_email() {
        let csv = "nome;email;mesa\nJoão;joao@x.com;5\n;bad@x.com;6";
        let guests = parse_import(csv).unwrap();

        assert_eq!(guests.len(), 1);
        assert_eq!(guests[0].name, "João");
        assert_eq!(guests[0].email, "joao@x.com");
        assert_eq!(guests[0].table_label.as_deref(), Some("5"));
    }

    #[test]
    fn test_import_keeps_first_email_only() {
        let csv = "nome;email;mesa\nAna;\"ana@x.com; ana2@y.com\";";
        let guests = parse_import(csv).unwrap();

        assert_eq!(guests.len(), 1);
        assert_eq!(guests[0].email, "ana@x.com");
        assert_eq!(guests[0].table_label, None);
    }

    #[test]
    fn test_import_mesa_column_optional() {
        let csv = "nome;email\nRui;rui@x.com";
        let guests = parse_import(csv).unwrap();

        assert_eq!(guests.len(), 1);
        assert_eq!(guests[0].table_label, None);
    }

    #[test]
    fn test_export_renders_sim_nao_row() {
        let mut guest = Guest::new(
            "evt".to_string(),
            "João".to_string(),
            "joao@x.com".to_string(),
            None,
            Some("5".to_string()),
        );
        guest.confirmed = true;

        let out = render_export(&[guest]).unwrap();
        let mut lines = out.lines();
        assert_eq!(
            lines.next().unwrap(),
            "\"Nome\",\"Email\",\"Cargo\",\"Mesa\",\"Confirmado\",\"Rejeitado\",\"Check-in\""
        );
        assert_eq!(
            lines.next().unwrap(),
            "\"João\",\"joao@x.com\",\"\",\"5\",\"Sim\",\"Não\",\"Não\""
        );
    }

    #[test]
    fn test_export_empty_roster_is_header_only() {
        let out = render_export(&[]).unwrap();
        assert_eq!(out.lines().count(), 1);
    }
}
