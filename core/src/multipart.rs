//! multipart/form-data body assembly.

use bytes::{BufMut, Bytes, BytesMut};
use http::header::CONTENT_TYPE;
use http::HeaderValue;

use crate::hash::hex_random;
use crate::{Error, Result};

/// Longest boundary allowed by RFC 2046.
const MAX_BOUNDARY_LEN: usize = 70;

/// Multipart is a multipart/form-data body under construction.
///
/// ```
/// use publitio_core::{FormDataPart, Multipart};
///
/// let mp = Multipart::with_boundary("xyz")
///     .unwrap()
///     .part(FormDataPart::new("file").file_name("a.png").content("abc"));
/// assert_eq!(mp.content_type(), "multipart/form-data; boundary=xyz");
/// ```
#[derive(Debug, Clone)]
pub struct Multipart {
    boundary: String,
    parts: Vec<FormDataPart>,
}

impl Multipart {
    /// Create a multipart body with a random boundary.
    pub fn new() -> Result<Self> {
        let boundary = hex_random(30).ok_or_else(|| {
            Error::random_source("failed to generate multipart boundary from os entropy")
        })?;

        Ok(Self {
            boundary,
            parts: Vec::new(),
        })
    }

    /// Create a multipart body with the given boundary.
    ///
    /// The boundary must be 1 to 70 characters from the RFC 2046 set and must
    /// not end with a space.
    pub fn with_boundary(boundary: impl Into<String>) -> Result<Self> {
        let boundary = boundary.into();

        let valid_chars = boundary.bytes().all(|b| {
            b.is_ascii_alphanumeric() || b"'()+_,-./:=? ".contains(&b)
        });
        if boundary.is_empty()
            || boundary.len() > MAX_BOUNDARY_LEN
            || boundary.ends_with(' ')
            || !valid_chars
        {
            return Err(Error::multipart_invalid(format!(
                "invalid multipart boundary: {boundary:?}"
            )));
        }

        Ok(Self {
            boundary,
            parts: Vec::new(),
        })
    }

    /// Append a part.
    pub fn part(mut self, part: FormDataPart) -> Self {
        self.parts.push(part);
        self
    }

    /// The boundary separating parts.
    pub fn boundary(&self) -> &str {
        &self.boundary
    }

    /// The value of the `Content-Type` header for this body.
    ///
    /// The boundary is quoted if it holds characters that are not allowed in
    /// a header token.
    pub fn content_type(&self) -> String {
        if self.boundary.bytes().any(|b| b" ()<>@,;:\\\"/[]?=".contains(&b)) {
            format!("multipart/form-data; boundary=\"{}\"", self.boundary)
        } else {
            format!("multipart/form-data; boundary={}", self.boundary)
        }
    }

    /// Encode all parts into the request body.
    pub fn build(&self) -> Result<Bytes> {
        let size = self
            .parts
            .iter()
            .map(|p| p.content.len() + 256)
            .sum::<usize>();
        let mut buf = BytesMut::with_capacity(size);

        for part in &self.parts {
            buf.put_slice(b"--");
            buf.put_slice(self.boundary.as_bytes());
            buf.put_slice(b"\r\n");
            part.write_headers(&mut buf)?;
            buf.put_slice(b"\r\n");
            buf.put_slice(&part.content);
            buf.put_slice(b"\r\n");
        }
        buf.put_slice(b"--");
        buf.put_slice(self.boundary.as_bytes());
        buf.put_slice(b"--\r\n");

        Ok(buf.freeze())
    }

    /// Set the body and its content type on a request builder.
    pub fn apply(&self, builder: http::request::Builder) -> Result<http::Request<Bytes>> {
        let content_type = HeaderValue::from_str(&self.content_type())?;
        let body = self.build()?;

        builder
            .header(CONTENT_TYPE, content_type)
            .body(body)
            .map_err(|e| {
                Error::multipart_invalid("failed to build multipart request").with_source(e)
            })
    }
}

/// FormDataPart is one field of a multipart/form-data body.
#[derive(Debug, Clone)]
pub struct FormDataPart {
    name: String,
    file_name: Option<String>,
    content_type: Option<String>,
    content: Bytes,
}

impl FormDataPart {
    /// Create a part for the form field `name`.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            file_name: None,
            content_type: None,
            content: Bytes::new(),
        }
    }

    /// Mark this part as a file upload with the given file name.
    ///
    /// File parts default to `application/octet-stream`.
    pub fn file_name(mut self, file_name: impl Into<String>) -> Self {
        self.file_name = Some(file_name.into());
        self
    }

    /// Override the content type of this part.
    pub fn content_type(mut self, content_type: impl Into<String>) -> Self {
        self.content_type = Some(content_type.into());
        self
    }

    /// Set the content of this part.
    pub fn content(mut self, content: impl Into<Bytes>) -> Self {
        self.content = content.into();
        self
    }

    fn write_headers(&self, buf: &mut BytesMut) -> Result<()> {
        let mut disposition = format!("form-data; name=\"{}\"", escape_quotes(&self.name));
        if let Some(file_name) = &self.file_name {
            disposition.push_str(&format!("; filename=\"{}\"", escape_quotes(file_name)));
        }
        let content_type = match (&self.content_type, &self.file_name) {
            (Some(v), _) => Some(v.as_str()),
            (None, Some(_)) => Some("application/octet-stream"),
            (None, None) => None,
        };

        // Header values end at CRLF, so a bare CR or LF would corrupt the body.
        let has_newline = |s: &str| s.contains(['\r', '\n']);
        if has_newline(disposition.as_str()) || content_type.is_some_and(has_newline) {
            return Err(Error::multipart_invalid(format!(
                "multipart part {:?} contains a line break in its headers",
                self.name
            )));
        }

        buf.put_slice(b"Content-Disposition: ");
        buf.put_slice(disposition.as_bytes());
        buf.put_slice(b"\r\n");
        if let Some(v) = content_type {
            buf.put_slice(b"Content-Type: ");
            buf.put_slice(v.as_bytes());
            buf.put_slice(b"\r\n");
        }

        Ok(())
    }
}

fn escape_quotes(s: &str) -> String {
    s.replace('\\', "\\\\").replace('"', "\\\"")
}
