#![allow(clippy::new_without_default)]

pub mod api;
pub mod cache;
pub mod config;
pub mod error;
pub mod filter;
pub mod graphql;
pub mod model;
pub mod pagination;
pub mod promise;
pub mod route;
pub mod search;
pub mod view;
