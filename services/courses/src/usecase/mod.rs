pub mod content;
pub mod enrollment;
pub mod entitlement;
pub mod exam;
