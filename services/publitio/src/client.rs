use bytes::Bytes;
use http::header::CONTENT_TYPE;
use http::Method;
use log::debug;
use publitio_core::{Context, Error, FormDataPart, Multipart, Result};
use tokio::io::{AsyncRead, AsyncReadExt};

use crate::constants::*;
use crate::response::{parse_response, Response};
use crate::sign_request::RequestSigner;
use crate::{Config, Credential, Params};

/// Client performs signed calls against the publit.io api.
///
/// Every call signs a fresh url, sends it through the context's
/// [`HttpSend`](publitio_core::HttpSend) and decodes the json body. Nothing is
/// cached between calls, so a client can be cloned and shared across tasks.
///
/// Errors carry the http `method` and `path` of the call as context; their
/// [`ErrorKind`](publitio_core::ErrorKind) tells which stage failed.
#[derive(Debug, Clone)]
pub struct Client {
    ctx: Context,
    credential: Credential,
    signer: RequestSigner,
}

/// Body of an outgoing request.
enum Payload {
    Empty,
    RemoteUpload,
    Multipart(Multipart),
}

impl Client {
    /// Create a client from a context and a config.
    ///
    /// Fails with `ConfigInvalid` if the api key or secret is missing.
    pub fn new(ctx: Context, config: Config) -> Result<Self> {
        let api_key = config
            .api_key
            .ok_or_else(|| Error::config_invalid("api_key is required"))?;
        let api_secret = config
            .api_secret
            .ok_or_else(|| Error::config_invalid("api_secret is required"))?;
        let endpoint = config.endpoint.as_deref().unwrap_or(DEFAULT_ENDPOINT);

        Ok(Self {
            ctx,
            credential: Credential::new(api_key, api_secret),
            signer: RequestSigner::new(endpoint),
        })
    }

    /// The credential every call is signed with.
    pub fn credential(&self) -> &Credential {
        &self.credential
    }

    /// Perform a GET request, for example to list files.
    pub async fn get(&self, path: &str, params: &Params) -> Result<Response> {
        self.call(Method::GET, path, params).await
    }

    /// Perform a PUT request, for example to update a file.
    pub async fn put(&self, path: &str, params: &Params) -> Result<Response> {
        self.call(Method::PUT, path, params).await
    }

    /// Perform a DELETE request, for example to delete a file.
    pub async fn delete(&self, path: &str, params: &Params) -> Result<Response> {
        self.call(Method::DELETE, path, params).await
    }

    /// Perform a request with any method and an empty body.
    ///
    /// Use [`Client::upload_file`] to create files.
    pub async fn call(&self, method: Method, path: &str, params: &Params) -> Result<Response> {
        self.send(method, path, params, Payload::Empty).await
    }

    /// Upload a file.
    ///
    /// - With `Some(content)`, the content is read into memory and sent as
    ///   the single `file` part of a multipart/form-data body.
    /// - With `None`, nothing is sent but the params, which must tell the
    ///   service where to fetch the file (`file_url`).
    ///
    /// ```no_run
    /// # use publitio::{Client, Params};
    /// # async fn example(client: Client) -> publitio_core::Result<()> {
    /// let file = tokio::fs::File::open("path/to/file").await.unwrap();
    /// client.upload_file(Some(file), &Params::from([("title", "My file")])).await?;
    ///
    /// client
    ///     .upload_file(
    ///         None::<&[u8]>,
    ///         &Params::from([("file_url", "https://example.org"), ("public_id", "xxGh332")]),
    ///     )
    ///     .await?;
    /// # Ok(())
    /// # }
    /// ```
    pub async fn upload_file<R>(&self, content: Option<R>, params: &Params) -> Result<Response>
    where
        R: AsyncRead + Unpin + Send,
    {
        let payload = read_payload(content)
            .await
            .map_err(|e| call_context(e, &Method::POST, UPLOAD_PATH))?;

        self.send(Method::POST, UPLOAD_PATH, params, payload).await
    }

    /// Let the service fetch the file itself, shorthand for
    /// `upload_file(None, params)`. `params` must carry the `file_url`.
    pub async fn upload_remote_file(&self, params: &Params) -> Result<Response> {
        self.upload_file(None::<&[u8]>, params).await
    }

    /// Upload the local file at `path`, read through the context's
    /// [`FileRead`](publitio_core::FileRead).
    pub async fn upload_file_from_path(&self, path: &str, params: &Params) -> Result<Response> {
        let payload = async {
            let content = self.ctx.file_read(path).await?;
            Ok::<_, Error>(Payload::Multipart(upload_form(content)?))
        }
        .await
        .map_err(|e| call_context(e, &Method::POST, UPLOAD_PATH))?;

        self.send(Method::POST, UPLOAD_PATH, params, payload).await
    }

    async fn send(
        &self,
        method: Method,
        path: &str,
        params: &Params,
        payload: Payload,
    ) -> Result<Response> {
        let method_name = method.clone();
        self.send_inner(method, path, params, payload)
            .await
            .map_err(|e| call_context(e, &method_name, path))
    }

    async fn send_inner(
        &self,
        method: Method,
        path: &str,
        params: &Params,
        payload: Payload,
    ) -> Result<Response> {
        // Sign as late as possible, the timestamp must be fresh when it
        // reaches the service.
        let signed = self.signer.sign(&self.credential, path, params)?;
        debug!("sending {method} {path}");

        let builder = http::Request::builder().method(method).uri(signed.uri);
        let req = match payload {
            Payload::Empty => builder.body(Bytes::new())?,
            Payload::RemoteUpload => builder
                .header(CONTENT_TYPE, REMOTE_UPLOAD_CONTENT_TYPE)
                .body(Bytes::new())?,
            Payload::Multipart(mp) => mp.apply(builder)?,
        };

        let resp = self.ctx.http_send(req).await?;
        parse_response(resp)
    }
}

fn call_context(err: Error, method: &Method, path: &str) -> Error {
    err.with_context("method", method.as_str())
        .with_context("path", path)
}

async fn read_payload<R>(content: Option<R>) -> Result<Payload>
where
    R: AsyncRead + Unpin + Send,
{
    let Some(mut r) = content else {
        return Ok(Payload::RemoteUpload);
    };

    let mut buf = Vec::new();
    r.read_to_end(&mut buf)
        .await
        .map_err(|e| Error::content_read("failed to read upload content").with_source(e))?;
    Ok(Payload::Multipart(upload_form(buf)?))
}

fn upload_form(content: Vec<u8>) -> Result<Multipart> {
    let mp = Multipart::new()?.part(
        FormDataPart::new(UPLOAD_FIELD_NAME)
            .file_name(UPLOAD_FILE_NAME)
            .content(content),
    );
    Ok(mp)
}
