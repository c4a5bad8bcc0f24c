//! Identity verification form: camera capture with a blur and face-count gate,
//! document upload, form validation and multipart submission to a `/verify`
//! backend.
//!
//! Browser-side collaborators such as the camera and the file picker are
//! modelled as a trait or plain data so the whole flow runs headless.

pub mod capture;
pub mod config;
pub mod data_url;
pub mod detector;
pub mod error;
pub mod form;
pub mod i18n;
pub mod quality;
pub mod submission;
pub mod toast;
pub mod upload;
pub mod validation;
