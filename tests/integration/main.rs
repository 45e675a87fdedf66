mod common;
mod server_test;
