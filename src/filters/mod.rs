pub mod ignore;

pub use ignore::{IgnorePatterns, WildcardPattern};
