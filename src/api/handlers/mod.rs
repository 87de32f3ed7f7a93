//! HTTP request handlers for API endpoints.

pub mod generate;
pub mod hello;
pub mod redirect;

pub use generate::generate_handler;
pub use hello::hello_handler;
pub use redirect::redirect_handler;
