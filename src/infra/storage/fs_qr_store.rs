use crate::domain::ports::QrStore;
use crate::error::AppError;
use async_trait::async_trait;
use std::path::PathBuf;

/// Writes rendered QR codes to a local directory, one PNG per guest.
/// Re-confirmations overwrite the previous file.
pub struct FsQrStore {
    base_dir: PathBuf,
}

impl FsQrStore {
    pub fn new(base_dir: impl Into<PathBuf>) -> Self {
        Self {
            base_dir: base_dir.into(),
        }
    }
}

#[async_trait]
impl QrStore for FsQrStore {
    async fn store(&self, guest_id: &str, png: &[u8]) -> Result<(), AppError> {
        tokio::fs::create_dir_all(&self.base_dir)
            .await
            .map_err(|e| AppError::InternalWithMsg(format!("QR storage dir error: {}", e)))?;

        let path = self.base_dir.join(format!("{}.png", guest_id));
        tokio::fs::write(&path, png)
            .await
            .map_err(|e| AppError::InternalWithMsg(format!("QR storage write error: {}", e)))?;

        Ok(())
    }
}
