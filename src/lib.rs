pub mod api;
pub mod config;
pub mod dto;
pub mod entities;
pub mod error;
pub mod middleware;
pub mod services;
