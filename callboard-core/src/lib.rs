//! Core state for the Callboard dashboard.
//!
//! - `model`: sample records and palette
//! - `surface`: the chart surface and its editable slot
//! - `edit`: the identity/confirm/value workflow
//! - `settings`: file and environment configuration
//! - `charts`: geometry shared by the renderers

pub mod charts;
pub mod edit;
pub mod format;
pub mod model;
pub mod settings;
pub mod surface;
pub mod validation;

pub use edit::{
    EditError, EditOutcome, EditSession, EditStep, EditWorkflow, LookupRequest, SaveRequest,
    SaveSync, SessionId,
};
pub use model::{SentimentSlice, TimeSeriesPoint};
pub use settings::{Settings, SettingsError};
pub use surface::{ChartSurface, SurfaceError};
pub use validation::{ValidationError, Validator};
