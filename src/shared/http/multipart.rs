use actix_multipart::Multipart;
use futures::TryStreamExt;
use std::collections::HashMap;

use crate::shared::api::AppError;

const MAX_TEXT_FIELD_BYTES: usize = 64 * 1024;

#[derive(Debug, Clone)]
pub struct UploadedFile {
    pub field: String,
    pub original_name: String,
    pub content_type: String,
    pub bytes: Vec<u8>,
}

/// A fully buffered multipart body: text fields by name plus the file parts.
#[derive(Debug, Default)]
pub struct MultipartForm {
    fields: HashMap<String, String>,
    files: Vec<UploadedFile>,
}

#[derive(Debug, Clone, thiserror::Error, PartialEq, Eq)]
pub enum MultipartError {
    #[error("Malformed multipart body: {0}")]
    Malformed(String),

    #[error("File in field '{field}' exceeds {limit} bytes")]
    FileTooLarge { field: String, limit: usize },

    #[error("Text field '{0}' is too large")]
    FieldTooLarge(String),
}

impl From<MultipartError> for AppError {
    fn from(err: MultipartError) -> Self {
        match err {
            MultipartError::FileTooLarge { .. } => {
                AppError::bad_request("FILE_TOO_LARGE", err.to_string())
            }
            other => AppError::bad_request("INVALID_FORM", other.to_string()),
        }
    }
}

impl MultipartForm {
    pub fn text(&self, name: &str) -> Option<&str> {
        self.fields
            .get(name)
            .map(|v| v.as_str())
            .filter(|v| !v.trim().is_empty())
    }

    pub fn take_file(&mut self, field: &str) -> Option<UploadedFile> {
        let idx = self.files.iter().position(|f| f.field == field)?;
        Some(self.files.swap_remove(idx))
    }

    #[cfg(test)]
    pub fn from_parts(fields: Vec<(&str, &str)>, files: Vec<UploadedFile>) -> Self {
        Self {
            fields: fields
                .into_iter()
                .map(|(k, v)| (k.to_string(), v.to_string()))
                .collect(),
            files,
        }
    }
}

/// Buffers every part of the request. Parts with a filename are files and are capped
/// at `max_file_bytes`; the rest are UTF-8 text fields.
pub async fn read_multipart(
    mut payload: Multipart,
    max_file_bytes: usize,
) -> Result<MultipartForm, MultipartError> {
    let mut form = MultipartForm::default();

    while let Some(mut field) = payload
        .try_next()
        .await
        .map_err(|e| MultipartError::Malformed(e.to_string()))?
    {
        let name = field.name().unwrap_or_default().to_string();
        let file_name = field
            .content_disposition()
            .and_then(|cd| cd.get_filename())
            .map(|s| s.to_string());
        let content_type = field
            .content_type()
            .map(|m| m.essence_str().to_string())
            .unwrap_or_else(|| "application/octet-stream".to_string());

        let limit = if file_name.is_some() {
            max_file_bytes
        } else {
            MAX_TEXT_FIELD_BYTES
        };

        let mut buf: Vec<u8> = Vec::new();
        while let Some(chunk) = field
            .try_next()
            .await
            .map_err(|e| MultipartError::Malformed(e.to_string()))?
        {
            if buf.len() + chunk.len() > limit {
                return Err(match file_name {
                    Some(_) => MultipartError::FileTooLarge {
                        field: name,
                        limit: max_file_bytes,
                    },
                    None => MultipartError::FieldTooLarge(name),
                });
            }
            buf.extend_from_slice(&chunk);
        }

        match file_name {
            Some(original_name) => form.files.push(UploadedFile {
                field: name,
                original_name,
                content_type,
                bytes: buf,
            }),
            None => {
                let value = String::from_utf8(buf)
                    .map_err(|_| MultipartError::Malformed(format!("field '{name}' is not UTF-8")))?;
                form.fields.insert(name, value);
            }
        }
    }

    Ok(form)
}
