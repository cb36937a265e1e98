mod health;
mod process;

pub use health::health_handler;
pub use process::{process_handler, API_KEY_HEADER};
