pub mod averager;
pub mod composite;
pub mod constants;
pub mod detector;
pub mod error;
pub mod format;
pub mod measurement;
pub mod output;
