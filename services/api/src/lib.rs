mod cli;
mod console;
mod infra;
mod routes;
mod server;

use happy_menu::error::AppError;

pub async fn run() -> Result<(), AppError> {
    cli::run().await
}
