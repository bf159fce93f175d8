//! Artifact extractor implementations

pub(crate) mod axml;
mod apk;

pub use apk::ApkExtractor;
