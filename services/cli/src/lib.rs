mod cli;
mod commands;
mod demo;
mod infra;

use gpu_quote::error::AppError;

pub fn run() -> Result<(), AppError> {
    cli::run()
}
