use crate::config::ScoringMode;
use crate::errors::ValidationError;
use crate::input::validation::{check_mode_compatible, validate_upload};
use crate::models::{JobDescriptionInput, ResumeInput};

/// Holds the latest resume and job description supplied by the user.
///
/// Every setter replaces the previous value wholesale; nothing is appended.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct InputStore {
    resume: Option<ResumeInput>,
    job_description: Option<JobDescriptionInput>,
}

impl InputStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_resume(&mut self, resume: ResumeInput) {
        self.resume = Some(resume);
    }

    /// Pasted resume text.
    pub fn set_resume_text(&mut self, source_name: impl Into<String>, text: impl Into<String>) {
        self.set_resume(ResumeInput::text(source_name, text));
    }

    /// Uploaded resume file. On rejection the previously stored resume is left
    /// untouched.
    pub fn set_resume_file(
        &mut self,
        file_name: &str,
        bytes: Vec<u8>,
    ) -> Result<(), ValidationError> {
        let resume = validate_upload(file_name, bytes)?;
        self.set_resume(resume);
        Ok(())
    }

    pub fn set_job_description(&mut self, text: impl Into<String>) {
        self.job_description = Some(JobDescriptionInput::new(text));
    }

    pub fn resume(&self) -> Option<&ResumeInput> {
        self.resume.as_ref()
    }

    pub fn job_description(&self) -> Option<&JobDescriptionInput> {
        self.job_description.as_ref()
    }

    /// Reports the first missing field, resume before job description.
    pub fn validate(&self) -> Result<(), ValidationError> {
        match &self.resume {
            Some(resume) if !resume.is_blank() => {}
            _ => return Err(ValidationError::MissingResume),
        }
        match &self.job_description {
            Some(jd) if !jd.is_blank() => Ok(()),
            _ => Err(ValidationError::MissingJobDescription),
        }
    }

    pub fn is_submittable(&self) -> bool {
        self.validate().is_ok()
    }

    /// `validate`, plus the check that the resume can be encoded for `mode`.
    pub fn validate_for(&self, mode: ScoringMode) -> Result<(), ValidationError> {
        self.validate()?;
        match &self.resume {
            Some(resume) => check_mode_compatible(resume, mode),
            None => Err(ValidationError::MissingResume),
        }
    }

    pub fn is_submittable_for(&self, mode: ScoringMode) -> bool {
        self.validate_for(mode).is_ok()
    }

    /// Snapshot of both inputs for an outbound request. `None` unless submittable.
    pub fn snapshot(&self) -> Option<(ResumeInput, JobDescriptionInput)> {
        if !self.is_submittable() {
            return None;
        }
        Some((self.resume.clone()?, self.job_description.clone()?))
    }

    pub fn clear(&mut self) {
        self.resume = None;
        self.job_description = None;
    }

    pub fn is_empty(&self) -> bool {
        self.resume.is_none() && self.job_description.is_none()
    }
}
