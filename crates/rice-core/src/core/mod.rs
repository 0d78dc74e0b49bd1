pub mod io;
pub mod models;
pub mod scoring;
pub mod utils;
