//! HTTP front end for the Intent Guard classifier.
//!
//! Exposes a single `POST /predict` route; see [`gateway`].

pub mod gateway;
