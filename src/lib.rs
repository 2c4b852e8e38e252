//! Terminal viewer for XML documents.
//!
//! A document is parsed once into an [`model::element::Element`] tree. Each
//! redraw lays the tree out from the top, keeping only the rows that fall in
//! the visible window and stopping as soon as the window is full.

pub mod app;
pub mod config;
pub mod input;
pub mod model;
pub mod services;
pub mod view;
