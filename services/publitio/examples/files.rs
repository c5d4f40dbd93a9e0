use std::env;

use anyhow::Result;
use publitio::{Client, Config, Params};
use publitio_core::{Context, OsEnv};
use publitio_file_read_tokio::TokioFileRead;
use publitio_http_send_reqwest::ReqwestHttpSend;

#[tokio::main]
async fn main() -> Result<()> {
    let _ = env_logger::builder().try_init();

    let ctx = Context::new()
        .with_file_read(TokioFileRead)
        .with_http_send(ReqwestHttpSend::default())
        .with_env(OsEnv);

    // Needs PUBLITIO_API_KEY and PUBLITIO_API_SECRET.
    let client = Client::new(ctx.clone(), Config::new().from_env(&ctx))?;

    // List at most 12 files.
    let files = client
        .get("files/list", &Params::from([("limit", "12")]))
        .await?;
    println!("files: {files:#}");

    // Upload a local file and give it a title.
    if let Some(path) = env::args().nth(1) {
        let created = client
            .upload_file_from_path(&path, &Params::from([("title", "My file")]))
            .await?;
        println!("created: {created:#}");

        if let Some(id) = created["id"].as_str() {
            let updated = client
                .put(
                    &format!("files/update/{id}"),
                    &Params::from([("title", "New title")]),
                )
                .await?;
            println!("updated: {updated:#}");

            let deleted = client
                .delete(&format!("files/delete/{id}"), &Params::new())
                .await?;
            println!("deleted: {deleted:#}");
        }
    }

    // Let the service fetch a file itself and give it a custom id.
    if let Ok(url) = env::var("PUBLITIO_REMOTE_FILE_URL") {
        let created = client
            .upload_remote_file(&Params::from([
                ("file_url", url.as_str()),
                ("public_id", "xxGh332"),
            ]))
            .await?;
        println!("created from url: {created:#}");
    }

    Ok(())
}
