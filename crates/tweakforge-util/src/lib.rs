pub mod diagnostics;
pub mod number;
pub mod split;
