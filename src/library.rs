//! Local audio discovery for the terminal host.

mod scan;

pub use scan::scan;
