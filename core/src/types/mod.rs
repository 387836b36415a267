pub mod config;
pub mod response;
pub mod step;
pub mod window;
