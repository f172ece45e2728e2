//! Serves a single request: reads a JSON `FunctionRequest` from stdin and
//! writes the JSON `FunctionResponse` to stdout.

use anyhow::Context;
use dotenv::dotenv;
use tokio::io::AsyncReadExt;

use contribution_tracker::{
    functions::{self, FunctionRequest},
    telemetry,
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenv().ok();
    telemetry::init_stderr();

    let mut input = String::new();
    tokio::io::stdin()
        .read_to_string(&mut input)
        .await
        .context("Failed to read request from stdin")?;
    let request: FunctionRequest =
        serde_json::from_str(&input).context("Request must be a JSON object with a method")?;

    let response = functions::invoke(request).await;
    println!("{}", serde_json::to_string(&response)?);

    Ok(())
}
