use std::process;
use timesheet::{
    commands::Cli,
    libs::messages::{macros::is_debug_mode, Message},
    msg_error,
};
use tracing_subscriber::EnvFilter;

fn main() {
    dotenv::dotenv().ok();

    if is_debug_mode() {
        tracing_subscriber::fmt()
            .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("timesheet=debug")))
            .with_writer(std::io::stderr)
            .init();
    }

    if let Err(e) = Cli::menu() {
        msg_error!(Message::CommandFailed(format!("{:#}", e)));
        process::exit(1);
    }
}
