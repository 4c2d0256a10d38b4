//! # Backend Service
//!
//! Thin entry point that delegates to lib-web for server setup.
//!
//! | Variable | Default |
//! |----------|---------|
//! | `BIND_ADDRESS` | `127.0.0.1:3001` |
//! | `CORS_ALLOWED_ORIGINS` | local dev origins; comma-separated, `*` for any |

use lib_utils::get_env;
use lib_web::{start_server, ServerConfig};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load environment variables
    dotenvy::dotenv().ok();

    let mut config = ServerConfig::default();

    if let Ok(bind_address) = get_env("BIND_ADDRESS") {
        config.bind_address = bind_address;
    }

    if let Ok(origins) = get_env("CORS_ALLOWED_ORIGINS") {
        config.allowed_origins = origins
            .split(',')
            .map(str::trim)
            .filter(|origin| !origin.is_empty())
            .map(str::to_string)
            .collect();
    }

    start_server(config).await
}
