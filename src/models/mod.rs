pub mod financial;
pub mod revenue;
pub mod project;
pub mod dashboard;

pub use financial::*;
pub use revenue::*;
pub use project::*;
pub use dashboard::*;
