pub mod pricing;
pub mod validation;
