pub mod activities;
pub mod analytics;
pub mod api;
pub mod config;
pub mod db;
pub mod schedule;
