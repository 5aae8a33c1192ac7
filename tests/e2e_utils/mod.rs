#![cfg(test)]
#![allow(dead_code)]

pub mod relay_server;

pub use relay_server::TestRelayServer;
