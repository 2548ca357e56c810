mod refresh;
mod server;

pub use refresh::run_refresh_once;
pub use server::run_server;
