//! pbmm2_index turns command-line or pipeline input into validated
//! settings for building a reference index.

pub mod catalog;
pub mod cli;
pub mod logging;
pub mod options;
pub mod settings;
