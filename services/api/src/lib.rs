mod cli;
mod exports;
mod infra;
mod routes;
mod server;

use bolivia_stats::error::AppError;

pub async fn run() -> Result<(), AppError> {
    cli::run().await
}
