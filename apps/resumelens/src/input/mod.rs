// Input step: holds the raw resume and job description and decides whether
// they are ready to be sent for scoring.

pub mod store;
pub mod validation;

pub use store::InputStore;
