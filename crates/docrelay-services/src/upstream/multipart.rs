//! Owned multipart payload.
//!
//! `reqwest::multipart::Form` is consumed by `send`, so a retried request needs a
//! fresh form. The payload keeps the parts as owned bytes and builds a new form for
//! every attempt.

use bytes::Bytes;
use reqwest::multipart::{Form, Part};

#[derive(Clone, Debug, PartialEq)]
pub enum FormPart {
    Text {
        name: String,
        value: String,
    },
    File {
        name: String,
        file_name: Option<String>,
        content_type: Option<String>,
        data: Bytes,
    },
}

impl FormPart {
    pub fn name(&self) -> &str {
        match self {
            FormPart::Text { name, .. } | FormPart::File { name, .. } => name,
        }
    }

    fn to_part(&self) -> Result<Part, reqwest::Error> {
        match self {
            FormPart::Text { value, .. } => Ok(Part::text(value.clone())),
            FormPart::File {
                file_name,
                content_type,
                data,
                ..
            } => {
                let mut part = Part::bytes(data.to_vec());
                if let Some(file_name) = file_name {
                    part = part.file_name(file_name.clone());
                }
                match content_type {
                    Some(content_type) => part.mime_str(content_type),
                    None => Ok(part),
                }
            }
        }
    }
}

/// Multipart form fields in arrival order.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct MultipartPayload {
    parts: Vec<FormPart>,
}

impl MultipartPayload {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push_text(&mut self, name: impl Into<String>, value: impl Into<String>) {
        self.parts.push(FormPart::Text {
            name: name.into(),
            value: value.into(),
        });
    }

    pub fn push_file(
        &mut self,
        name: impl Into<String>,
        file_name: Option<String>,
        content_type: Option<String>,
        data: Bytes,
    ) {
        self.parts.push(FormPart::File {
            name: name.into(),
            file_name,
            content_type,
            data,
        });
    }

    /// First part with the given field name, text or file.
    pub fn get(&self, name: &str) -> Option<&FormPart> {
        self.parts.iter().find(|p| p.name() == name)
    }

    /// First text value with the given field name.
    pub fn text(&self, name: &str) -> Option<&str> {
        self.parts.iter().find_map(|p| match p {
            FormPart::Text { name: n, value } if n == name => Some(value.as_str()),
            _ => None,
        })
    }

    /// Build a fresh reqwest form. Fails only on an unparseable content type.
    pub fn to_form(&self) -> Result<Form, reqwest::Error> {
        let mut form = Form::new();
        for part in &self.parts {
            form = form.part(part.name().to_string(), part.to_part()?);
        }
        Ok(form)
    }
}
