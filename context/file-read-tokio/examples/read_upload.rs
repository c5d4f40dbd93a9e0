use anyhow::Result;
use publitio_core::Context;
use publitio_file_read_tokio::TokioFileRead;
use std::env;

#[tokio::main]
async fn main() -> Result<()> {
    let ctx = Context::new().with_file_read(TokioFileRead);

    // Get the path from command line arguments or use a default
    let path = env::args()
        .nth(1)
        .unwrap_or_else(|| "path/to/file".to_string());

    println!("Attempting to read file: {path}");

    match ctx.file_read(&path).await {
        Ok(content) => {
            println!("Successfully read {} bytes, ready to upload", content.len());
        }
        Err(e) => {
            eprintln!("Failed to read file: {e}");
            eprintln!("Make sure the file exists and you have permission to read it.");
        }
    }

    Ok(())
}
