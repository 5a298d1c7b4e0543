pub mod analysis;
pub mod input;

pub use analysis::{
    AnalysisResult, CategoryAnalysis, KeyPhraseCount, PresentationHints, Priority, Recommendation,
};
pub use input::{JobDescriptionInput, ResumeContent, ResumeInput};
