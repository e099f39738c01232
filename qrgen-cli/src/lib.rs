// ABOUTME: Library exports for qrgen CLI modules for testing and external use
// ABOUTME: Makes internal modules available to integration tests and benchmarks

pub mod cli;
pub mod cli_output;
pub mod completions;
pub mod config;
pub mod constants;
pub mod downloader;
pub mod image_protocols;
pub mod interactive;
pub mod markup;
pub mod output;
