//! Request field extraction
//!
//! Endpoints read their parameters as plain named fields. Query strings,
//! url-encoded bodies and multipart bodies all collapse into [`Fields`];
//! when a name repeats, the first value wins.

use std::convert::Infallible;

use axum::async_trait;
use axum::extract::{Form, FromRequest, FromRequestParts, Multipart, Query, Request};
use axum::http::StatusCode;
use axum::http::header::CONTENT_TYPE;
use axum::http::request::Parts;
use log::debug;

use crate::error::GatewayError;

/// A multipart part that carried a filename
#[derive(Debug)]
pub struct FilePart {
    pub filename: String,
    pub data: Vec<u8>,
}

/// Named text fields plus the first file part named `file`, if any
#[derive(Debug, Default)]
pub struct Fields {
    pairs: Vec<(String, String)>,
    file: Option<FilePart>,
}

impl Fields {
    pub fn from_pairs(pairs: Vec<(String, String)>) -> Self {
        Self { pairs, file: None }
    }

    pub fn with_file(mut self, filename: &str, data: Vec<u8>) -> Self {
        self.file = Some(FilePart {
            filename: filename.to_string(),
            data,
        });
        self
    }

    /// First value sent under `name`
    pub fn get(&self, name: &str) -> Option<String> {
        self.pairs
            .iter()
            .find(|(key, _)| key == name)
            .map(|(_, value)| value.clone())
    }

    pub fn take_file(&mut self) -> Option<FilePart> {
        self.file.take()
    }
}

/// Fields from the query string. An undecodable query yields no fields.
#[derive(Debug)]
pub struct QueryFields(pub Fields);

#[async_trait]
impl<S> FromRequestParts<S> for QueryFields
where
    S: Send + Sync,
{
    type Rejection = Infallible;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        match Query::<Vec<(String, String)>>::from_request_parts(parts, state).await {
            Ok(Query(pairs)) => Ok(Self(Fields::from_pairs(pairs))),
            Err(e) => {
                debug!("Ignoring unreadable query string: {}", e.body_text());
                Ok(Self(Fields::default()))
            }
        }
    }
}

/// Fields from a url-encoded or multipart body.
///
/// Any other content type (or none) yields no fields, so the endpoint
/// answers with its own "required" message.
#[derive(Debug)]
pub struct FormFields(pub Fields);

#[async_trait]
impl<S> FromRequest<S> for FormFields
where
    S: Send + Sync,
{
    type Rejection = GatewayError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let content_type = req
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|value| value.to_str().ok())
            .map(str::to_ascii_lowercase)
            .unwrap_or_default();

        if content_type.starts_with("multipart/form-data") {
            let multipart = Multipart::from_request(req, state)
                .await
                .map_err(|e| bad_body(e.status(), e.body_text()))?;
            read_multipart(multipart).await.map(Self)
        } else if content_type.starts_with("application/x-www-form-urlencoded") {
            let Form(pairs) = Form::<Vec<(String, String)>>::from_request(req, state)
                .await
                .map_err(|e| bad_body(e.status(), e.body_text()))?;
            Ok(Self(Fields::from_pairs(pairs)))
        } else {
            debug!("No form body (content type {:?})", content_type);
            Ok(Self(Fields::default()))
        }
    }
}

fn bad_body(status: StatusCode, message: String) -> GatewayError {
    GatewayError::BadBody {
        status: status.as_u16(),
        message,
    }
}

/// Parts with a filename are files; everything else is a text field.
async fn read_multipart(mut multipart: Multipart) -> Result<Fields, GatewayError> {
    let mut fields = Fields::default();

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| bad_body(e.status(), e.body_text()))?
    {
        let name = field.name().unwrap_or_default().to_string();
        match field.file_name().map(str::to_string) {
            Some(filename) => {
                let data = field
                    .bytes()
                    .await
                    .map_err(|e| bad_body(e.status(), e.body_text()))?;
                if name == "file" && fields.file.is_none() {
                    fields.file = Some(FilePart {
                        filename,
                        data: data.to_vec(),
                    });
                }
            }
            None => {
                let value = field
                    .text()
                    .await
                    .map_err(|e| bad_body(e.status(), e.body_text()))?;
                fields.pairs.push((name, value));
            }
        }
    }

    Ok(fields)
}
