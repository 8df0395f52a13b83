//! Separation process models.

pub mod pervaporation;
