//! Print the OpenAPI document as JSON, or YAML with `--yaml`.
//!
//! Usage: `cargo run --bin openapi-dump -- --yaml > openapi.yaml`

use user_projects_api::doc::ApiDoc;
use utoipa::OpenApi;

fn main() -> anyhow::Result<()> {
    let doc = ApiDoc::openapi();
    let rendered = if std::env::args().skip(1).any(|arg| arg == "--yaml") {
        doc.to_yaml()?
    } else {
        doc.to_pretty_json()?
    };
    println!("{rendered}");
    Ok(())
}
