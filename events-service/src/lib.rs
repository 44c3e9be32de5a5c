//! Events Service - lists approved events as a Lambda function.

pub mod config;
pub mod handlers;
pub mod models;
pub mod services;
