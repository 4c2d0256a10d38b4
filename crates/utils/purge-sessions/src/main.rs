//! # Purge Sessions Utility
//!
//! Deletes every session whose expiry has passed.
//!
//! ## Usage
//!
//! ```bash
//! cargo run --package purge-sessions --bin purge_sessions
//! cargo run --package purge-sessions --bin purge_sessions -- --yes
//! ```
//!
//! The program will:
//! 1. Connect to the database named by `DATABASE_URL`
//! 2. Count expired sessions
//! 3. Ask for confirmation unless `--yes` is given
//! 4. Delete them and report the number removed

use lib_core::model::store::SessionRepository;
use lib_core::{create_pool, Config};
use lib_utils::{format_time, now_utc};
use std::io::{self, Write};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    let assume_yes = std::env::args().skip(1).any(|arg| arg == "--yes" || arg == "-y");

    println!("============================================");
    println!("  Purge Expired Sessions");
    println!("============================================");
    println!();

    let config = Config::from_env().map_err(|e| anyhow::anyhow!(e))?;
    config.validate().map_err(|e| anyhow::anyhow!(e))?;

    println!("Connecting to {}...", config.database_url);
    let pool = create_pool(&config.database_url).await?;
    let sessions = SessionRepository::new(pool);
    println!("Connected successfully.");
    println!();

    let now = now_utc();
    let expired = sessions.count_expired(now).await?;

    if expired == 0 {
        println!("No sessions expired as of {}.", format_time(now));
        println!("Nothing to delete.");
        return Ok(());
    }

    println!("Found {} expired session(s) as of {}.", expired, format_time(now));
    println!();

    if !assume_yes {
        print!("Delete them? (yes/no): ");
        io::stdout().flush()?;

        let mut confirmation = String::new();
        io::stdin().read_line(&mut confirmation)?;
        let confirmation = confirmation.trim().to_lowercase();

        if confirmation != "yes" && confirmation != "y" {
            println!("Operation cancelled.");
            return Ok(());
        }
        println!();
    }

    println!("Deleting expired sessions...");
    let deleted = sessions.delete_expired(now).await?;

    println!("Successfully deleted {} session(s).", deleted);

    Ok(())
}
