use std::collections::BTreeSet;
use std::path::{Path, PathBuf};

use serde::Serialize;
use thiserror::Error;
use tracing::info;

use crate::extraction::skills::SkillExtractor;

#[derive(Debug, Error)]
pub enum ProfileError {
    #[error("PDF extraction failed: {0}")]
    Pdf(#[from] pdf_extract::OutputError),

    #[error("PDF extraction task failed: {0}")]
    Task(#[from] tokio::task::JoinError),

    #[error("Resume contains no readable text")]
    EmptyText,
}

/// The candidate a posting is scored against.
#[derive(Debug, Clone, Serialize)]
pub struct CandidateProfile {
    pub resume_text: String,
    /// Catalog skills found anywhere in the resume.
    pub skills: BTreeSet<String>,
}

impl CandidateProfile {
    pub fn from_text(resume_text: String, skills: &SkillExtractor) -> Result<Self, ProfileError> {
        if resume_text.trim().is_empty() {
            return Err(ProfileError::EmptyText);
        }
        let found = skills.extract_from_text(&resume_text);
        Ok(Self {
            resume_text,
            skills: found,
        })
    }

    /// Reads a resume PDF from disk.
    pub async fn from_pdf_path(path: &Path, skills: &SkillExtractor) -> Result<Self, ProfileError> {
        let owned: PathBuf = path.to_path_buf();
        let text = tokio::task::spawn_blocking(move || pdf_extract::extract_text(&owned)).await??;
        info!("Loaded resume from {} ({} chars)", path.display(), text.len());
        Self::from_text(text, skills)
    }

    /// Reads an uploaded resume PDF.
    pub async fn from_pdf_bytes(bytes: Vec<u8>, skills: &SkillExtractor) -> Result<Self, ProfileError> {
        let text =
            tokio::task::spawn_blocking(move || pdf_extract::extract_text_from_mem(&bytes)).await??;
        Self::from_text(text, skills)
    }
}
