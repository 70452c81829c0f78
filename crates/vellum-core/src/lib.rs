//! Vellum Core Types and Definitions
//!
//! This crate provides the foundational types for the Vellum diagram editor:
//!
//! - **Geometry**: Points, sizes, bounding boxes, and grid snapping
//!   ([`geometry`] module)
//! - **Colors**: Color handling with CSS color support ([`color::Color`])
//! - **Catalog**: The static registry of placeable shape templates
//!   ([`catalog`] module)
//! - **Draw**: SVG primitive emission for shapes, connectors, and labels
//!   ([`draw`] module)

pub mod catalog;
pub mod color;
pub mod draw;
pub mod geometry;
