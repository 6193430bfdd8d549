//! Voice-guided face enrollment.
//!
//! One run asks for a person's name and phone number, records them in the
//! identity store, captures crops of their face from several angles and
//! retrains the recognizer on every crop collected so far.

pub mod abort;
pub mod angle;
pub mod camera;
pub mod capture;
pub mod config;
pub mod error;
pub mod logging;
pub mod preview;
pub mod store;
pub mod workflow;

pub use abort::AbortSwitch;
pub use angle::{Angle, AngleSet};
pub use camera::{Camera, CameraError, FileCamera, SnapshotCamera};
pub use capture::{Capture, CaptureConfig, CaptureReport, Detectors};
pub use config::{Cli, EnrollConfig, Relabel};
pub use error::{EnrollError, Result};
pub use logging::init_logging;
pub use preview::{FilePreview, NoPreview, Preview};
pub use store::{IdentityRecord, IdentityStore, StoreError};
pub use workflow::{Enrollment, Outcome};
