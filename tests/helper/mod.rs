mod upstream;

pub use upstream::*;
