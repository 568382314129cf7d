//! External system integrations for HealthX.
//!
//! - [`store`] - The persistence collaborator the exchange engine reads
//!   reference data from and hands validated aggregates to
//!
//! # Design Pattern
//!
//! Adapters follow the **Adapter Pattern** to isolate persistence from the
//! exchange engine. The engine only sees the [`store::HealthStore`] trait,
//! so tests and the CLI can plug in the in-memory store.

pub mod store;
