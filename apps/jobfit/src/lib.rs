//! JobFit client: submits a resume and a job description to the analysis
//! service and renders the returned fit assessment.

pub mod analysis;
pub mod app;
pub mod config;
pub mod controller;
pub mod errors;
pub mod models;
pub mod picker;
pub mod view;
