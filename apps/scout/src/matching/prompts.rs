/// System prompt for posting-vs-resume scoring.
pub const MATCH_SYSTEM: &str = "You are a job matching AI. Your task is to analyze the \
    similarity between a job description and a resume.";

pub const MATCH_PROMPT_TEMPLATE: &str = "\
Evaluate the match percentage between this job description and resume:

Job Description:
{job_description}

Resume:
{resume_text}

Return only a number from 0 to 100.";
