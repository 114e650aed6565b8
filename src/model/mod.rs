//! Wire types shared by the REST clients and the desk.

pub mod book;

pub use book::*;
