//! Soundmap - Geometry and data pipeline for a sound map overlay
//!
//! This library computes everything the map overlay needs that is not
//! rendering: which green areas fall inside the delimiting neighbourhoods,
//! the circular region enclosing every sound location, the mask darkening
//! everything outside it, and the bounding boxes used to query
//! OpenStreetMap's Overpass API.
//!
//! The geometry is planar ray casting on (longitude, latitude) pairs with
//! a spherical-earth approximation for circles; it is meant for
//! neighbourhood to city scale areas.

pub mod circle;
pub mod config;
pub mod delimit;
pub mod feature;
pub mod fetch;
pub mod geometry;
pub mod locations;
pub mod logging;
pub mod overlay;
pub mod overpass;
