#![deny(clippy::all)]
#![deny(clippy::pedantic)]
#![deny(clippy::nursery)]

pub mod common;
pub mod csv_reader;
pub mod data_dir;
pub mod moviebase;
pub mod query;
pub mod schema;
pub mod status;
