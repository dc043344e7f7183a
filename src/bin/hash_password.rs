//! Print an argon2id hash for a password, for seeding accounts by hand.
//!
//! Usage: `cargo run --bin hash-password -- <password>` (defaults to the
//! bootstrap password when no argument is given).

use user_projects_api::config::DEFAULT_BOOTSTRAP_PASSWORD;
use user_projects_api::services::auth::{hash_password, verify_password};

fn main() -> anyhow::Result<()> {
    let password = std::env::args()
        .nth(1)
        .unwrap_or_else(|| DEFAULT_BOOTSTRAP_PASSWORD.to_string());

    let hash = hash_password(&password)?;
    anyhow::ensure!(
        verify_password(&password, &hash)?,
        "Generated hash does not verify"
    );

    println!("{hash}");
    Ok(())
}
