use crate::domain::models::guest::Guest;
use crate::error::AppError;
use image::Luma;
use qrcode::QrCode;
use serde::{Deserialize, Serialize};
use std::io::Cursor;

/// Wire format carried inside every guest QR code. The field names are
/// part of the external contract with the scanner and the printed codes:
/// `{"id": "<guest-id>", "nome": "<name>"}`.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
pub struct QrPayload {
    pub id: String,
    pub nome: String,
}

impl QrPayload {
    pub fn for_guest(guest: &Guest) -> Self {
        Self {
            id: guest.id.clone(),
            nome: guest.name.clone(),
        }
    }

    pub fn encode(&self) -> String {
        // Two plain string fields cannot fail to serialize.
        serde_json::to_string(self).unwrap_or_default()
    }

    pub fn decode(text: &str) -> Result<Self, AppError> {
        let payload: QrPayload = serde_json::from_str(text)
            .map_err(|_| AppError::Validation("Invalid QR code payload".into()))?;
        if payload.id.trim().is_empty() {
            return Err(AppError::Validation("QR code payload has no id".into()));
        }
        Ok(payload)
    }
}

/// Renders the payload as a PNG for the stored copy of the guest's code.
pub fn render_png(payload: &QrPayload) -> Result<Vec<u8>, AppError> {
    let code = QrCode::new(payload.encode().as_bytes())
        .map_err(|e| AppError::InternalWithMsg(format!("QR encoding failed: {}", e)))?;

    let img = code
        .render::<Luma<u8>>()
        .min_dimensions(256, 256)
        .build();

    let mut buf = Vec::new();
    image::DynamicImage::ImageLuma8(img)
        .write_to(&mut Cursor::new(&mut buf), image::ImageFormat::Png)
        .map_err(|e| AppError::InternalWithMsg(format!("QR PNG encoding failed: {}", e)))?;

    Ok(buf)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_payload_round_trip() {
        let guest = Guest::new(
            "evt".to_string(),
            "João Pereira".to_string(),
            "joao@example.com".to_string(),
            None,
            None,
        );

        let payload = QrPayload::for_guest(&guest);
        let text = payload.encode();
        let decoded = QrPayload::decode(&text).unwrap();

        assert_eq!(decoded.id, guest.id);
        assert_eq!(decoded.nome, "João Pereira");
    }

    #[test]
    fn test_encode_uses_wire_field_names() {
        let payload = QrPayload {
            id: "abc".to_string(),
            nome: "Ana".to_string(),
        };
        let value: serde_json::Value = serde_json::from_str(&payload.encode()).unwrap();
        assert_eq!(value["id"], "abc");
        assert_eq!(value["nome"], "Ana");
    }

    #[test]
    fn test_decode_rejects_garbage_and_missing_id() {
        assert!(QrPayload::decode("not json").is_err());
        assert!(QrPayload::decode(r#"{"nome":"Ana"}"#).is_err());
        assert!(QrPayload::decode(r#"{"id":"  ","nome":"Ana"}"#).is_err());
    }

    #[test]
    fn test_render_png_produces_png_magic() {
        let payload = QrPayload {
            id: "abc".to_string(),
            nome: "Ana".to_string(),
        };
        let png = render_png(&payload).unwrap();
        assert_eq!(&png[..8], &[0x89, b'P', b'N', b'G', 0x0D, 0x0A, 0x1A, 0x0A]);
    }
}
