pub mod correlation;
pub mod template;
