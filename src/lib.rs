pub mod feed;
pub mod sim;
pub mod web;
