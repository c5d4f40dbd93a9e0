use async_trait::async_trait;
use bytes::Bytes;
use publitio_core::{Context, FormDataPart, HttpSend, Multipart, Result};

// A transport that never leaves the process, useful to see what a client sends.
#[derive(Debug)]
struct DumpHttpSend;

#[async_trait]
impl HttpSend for DumpHttpSend {
    async fn http_send(&self, req: http::Request<Bytes>) -> Result<http::Response<Bytes>> {
        println!("{} {}", req.method(), req.uri());
        for (name, value) in req.headers() {
            println!("{name}: {value:?}");
        }
        println!();
        println!("{}", String::from_utf8_lossy(req.body()));

        Ok(http::Response::new(Bytes::from_static(br#"{"success":true}"#)))
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let ctx = Context::new().with_http_send(DumpHttpSend);

    let body = Multipart::new()?.part(
        FormDataPart::new("file")
            .file_name("hello.txt")
            .content_type("text/plain")
            .content("Hello, World!"),
    );
    let req = body.apply(
        http::Request::post("https://api.publit.io/v1/files/create").header("user-agent", "dump"),
    )?;

    let resp = ctx.http_send(req).await?;
    println!("-> {}", String::from_utf8_lossy(resp.body()));
    Ok(())
}
