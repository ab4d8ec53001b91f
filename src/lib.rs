#![doc(test(attr(deny(warnings))))]

//! Lead Intake captures prospective-student leads for an overseas-education
//! consultancy through a four-step wizard (personal details, application
//! preferences, contact details, preview) and submits them to the
//! consultancy's contact endpoint as a multipart request.

pub mod cli;
pub mod config;
pub mod errors;
pub mod redirect;
pub mod schema;
pub mod submit;
pub mod wizard;

use std::sync::Once;

static INIT_TRACING: Once = Once::new();

/// Initializes global tracing and emits a startup info log.
pub fn init() {
    INIT_TRACING.call_once(|| {
        use tracing_subscriber::{fmt, EnvFilter};

        let filter =
            EnvFilter::from_default_env().add_directive("lead_intake=info".parse().unwrap());

        fmt().with_env_filter(filter).init();
        tracing::info!("Lead Intake tracing initialized.");
    });
}
