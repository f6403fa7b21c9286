//! Mailinator HTTP API

mod client;

pub use client::{MailinatorClient, BASE_URL};
