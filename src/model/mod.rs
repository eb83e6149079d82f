pub mod area;
pub mod ksm;
pub mod project;
pub mod scenario;
pub mod workspace;

pub use area::{AreaDescriptor, AREAS};
pub use ksm::Ksm;
pub use project::{BudgetRange, Project};
pub use scenario::{AreaPlan, Scenario};
pub use workspace::Workspace;
