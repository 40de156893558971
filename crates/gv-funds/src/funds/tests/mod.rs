mod common;
mod filter;
mod scoring;
