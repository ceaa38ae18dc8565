pub mod config;
pub mod content;
pub mod feed;
pub mod hooks;
pub mod logger;
pub mod pages;
pub mod post_render;
pub mod server;
pub mod site_build;
mod test_data;
mod text_utils;
pub mod view;
