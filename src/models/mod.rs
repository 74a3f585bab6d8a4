/*!
models module defines the values flowing through the conversion: address families and ranges,
delegation records, and the SLURM document with its prefix assertions.
*/
pub mod delegation;
pub mod network;
pub mod slurm;

pub use delegation::*;
pub use network::*;
pub use slurm::*;
