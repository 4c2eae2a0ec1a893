//! Accelerometer drivers

pub mod batch;
pub mod lis3dh;

pub use batch::BatchCollector;
pub use lis3dh::{AccelError, Lis3dh};
