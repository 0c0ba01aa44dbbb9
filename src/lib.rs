pub mod app;
pub mod cli;
pub mod client;
pub mod config;
pub mod controller;
pub mod filter;
pub mod model;
pub mod output;
pub mod pager;
pub mod shell;
pub mod submission;

#[cfg(test)]
mod tests;
