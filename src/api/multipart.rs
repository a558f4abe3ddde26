//! Reading the registration forms out of `multipart/form-data` bodies.

use std::collections::HashMap;

use axum::extract::Multipart;
use axum::extract::multipart::MultipartError;
use axum::http::StatusCode;

use crate::error::AppError;
use crate::storage::ProofUpload;

/// Name of the file part carrying the transfer proof.
pub const PROOF_FIELD: &str = "proof";

/// Text fields and the optional proof file of a submitted form.
#[derive(Debug, Default)]
pub struct FormData {
    fields: HashMap<String, String>,
    proof: Option<ProofUpload>,
}

impl FormData {
    /// Drains `multipart`. Later parts with the same name replace earlier ones.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::PayloadTooLarge`] when the body exceeds the
    /// configured limit, [`AppError::InvalidRequest`] for malformed bodies.
    pub async fn read(mut multipart: Multipart, limit: usize) -> Result<Self, AppError> {
        let mut form = Self::default();
        while let Some(field) = multipart
            .next_field()
            .await
            .map_err(|e| multipart_error(&e, limit))?
        {
            let Some(name) = field.name().map(str::to_string) else {
                continue;
            };
            if name == PROOF_FIELD {
                let file_name = field.file_name().map(str::to_string);
                let content_type = field.content_type().map(str::to_string);
                let bytes = field.bytes().await.map_err(|e| multipart_error(&e, limit))?;
                form.proof = Some(ProofUpload {
                    file_name,
                    content_type,
                    bytes: bytes.to_vec(),
                });
            } else {
                let value = field.text().await.map_err(|e| multipart_error(&e, limit))?;
                form.fields.insert(name, value);
            }
        }
        Ok(form)
    }

    /// Trimmed value of a text field, empty when absent.
    #[must_use]
    pub fn text(&self, name: &str) -> String {
        self.fields
            .get(name)
            .map(|v| v.trim().to_string())
            .unwrap_or_default()
    }

    /// Parses a ticket count. Empty or absent means zero.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::InvalidRequest`] for anything but a non-negative integer.
    pub fn count(&self, name: &str) -> Result<u32, AppError> {
        let raw = self.text(name);
        if raw.is_empty() {
            return Ok(0);
        }
        raw.parse()
            .map_err(|_| AppError::InvalidRequest(format!("{name} harus berupa angka: {raw}")))
    }

    /// Takes the proof file, if one was sent.
    pub fn take_proof(&mut self) -> Option<ProofUpload> {
        self.proof.take()
    }

    /// Builds a form directly, for tests.
    #[cfg(test)]
    pub(crate) fn from_parts(fields: &[(&str, &str)], proof: Option<ProofUpload>) -> Self {
        Self {
            fields: fields
                .iter()
                .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
                .collect(),
            proof,
        }
    }
}

fn multipart_error(err: &MultipartError, limit: usize) -> AppError {
    if err.status() == StatusCode::PAYLOAD_TOO_LARGE {
        AppError::PayloadTooLarge { limit }
    } else {
        AppError::InvalidRequest(err.body_text())
    }
}
