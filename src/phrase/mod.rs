//! Key-phrase selection and reconstruction

pub mod extraction;
