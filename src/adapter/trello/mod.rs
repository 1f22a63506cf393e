pub mod client;

pub use client::TrelloAdapter;
