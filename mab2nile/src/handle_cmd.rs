use std::fs;
use std::io::Read;

use anyhow::{bail, Context, Result};
use mab2nile::request::handle_body;
use tracing::warn;

use crate::cli::HandleArgs;

/// Print the response body for one request; rejected requests print the
/// error body and exit non-zero.
pub fn run_handle(args: HandleArgs) -> Result<()> {
    let body = if args.request.as_os_str() == "-" {
        let mut body = String::new();
        std::io::stdin()
            .read_to_string(&mut body)
            .context("failed to read request from stdin")?;
        body
    } else {
        fs::read_to_string(&args.request)
            .with_context(|| format!("failed to read request {}", args.request.display()))?
    };

    match handle_body(&body) {
        Ok(response) => {
            println!("{}", serde_json::to_string_pretty(&response)?);
            Ok(())
        }
        Err(err) => {
            warn!(status = err.status(), "request rejected");
            println!("{}", serde_json::to_string_pretty(&err.body())?);
            bail!("request rejected with status {}: {err}", err.status());
        }
    }
}
