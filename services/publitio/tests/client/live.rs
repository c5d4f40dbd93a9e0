use std::env;

use anyhow::Result;
use log::{debug, warn};
use publitio::{Client, Config, Params};
use publitio_core::{Context, OsEnv};
use publitio_file_read_tokio::TokioFileRead;
use publitio_http_send_reqwest::ReqwestHttpSend;

/// Build a client against the real service, only if PUBLITIO_TEST is on.
///
/// Credentials come from PUBLITIO_API_KEY and PUBLITIO_API_SECRET.
fn init_live_client() -> Option<Client> {
    let _ = env_logger::builder().is_test(true).try_init();

    if env::var("PUBLITIO_TEST").ok().as_deref() != Some("on") {
        return None;
    }

    let ctx = Context::new()
        .with_file_read(TokioFileRead)
        .with_http_send(ReqwestHttpSend::default())
        .with_env(OsEnv);
    let config = Config::new().from_env(&ctx);

    Some(Client::new(ctx, config).expect("PUBLITIO_API_KEY and PUBLITIO_API_SECRET must be set"))
}

#[tokio::test]
async fn test_live_list_files() -> Result<()> {
    let Some(client) = init_live_client() else {
        warn!("PUBLITIO_TEST is not set, skipped");
        return Ok(());
    };

    let resp = client
        .get("/files/list", &Params::from([("limit", "1")]))
        .await?;
    debug!("got response: {resp}");

    assert_eq!(resp["success"], serde_json::json!(true), "{resp}");
    Ok(())
}

#[tokio::test]
async fn test_live_show_missing_file() -> Result<()> {
    let Some(client) = init_live_client() else {
        warn!("PUBLITIO_TEST is not set, skipped");
        return Ok(());
    };

    let resp = client
        .get("/files/show/not-exist-file", &Params::new())
        .await?;
    debug!("got response: {resp}");

    assert_eq!(resp["success"], serde_json::json!(false), "{resp}");
    Ok(())
}
