pub mod common;

mod reqwest_transport;
