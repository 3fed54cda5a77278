//! Database library providing the PostgreSQL connector and utilities.
//!
//! This library owns connection management, startup retry, migration running,
//! and health checking for the relational store. Domain crates depend on it
//! for a `sea_orm::DatabaseConnection` and never open connections themselves.
//!
//! # Examples
//!
//! ```ignore
//! use core_config::FromEnv;
//! use database::postgres::{self, PostgresConfig};
//! use migration::Migrator;
//!
//! let config = PostgresConfig::from_env()?;
//! let db = postgres::connect_from_config(config).await?;
//! postgres::run_migrations::<Migrator>(&db, "knowledge").await?;
//! ```

pub mod common;
pub mod postgres;

pub use common::{DatabaseError, DatabaseResult};
