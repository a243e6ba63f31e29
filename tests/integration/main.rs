//! Integration tests for audiomark

mod helpers;

mod cli_test;
mod link_test;
mod player_test;
