// All LLM prompt text for the generation module.
// Reuses cross-cutting fragments from llm_client::prompts.

use crate::llm_client::prompts::SINGLE_JSON_OBJECT_INSTRUCTION;

/// Role line used when the caller leaves the target role blank.
pub const DEFAULT_ROLE: &str = "unspecified";

/// Tone line used when the caller leaves the tone blank.
pub const DEFAULT_TONE: &str = "professional, confident, friendly";

/// System instruction for tailored application generation.
pub const GENERATION_SYSTEM: &str = "\
You are an expert, ATS-savvy resume writer and career coach.
Rewrite resumes to match the job while keeping truthful experience from the provided CV.
Optimize for ATS (clear section headers, bullet points, measurable impact, targeted keywords).
Keep it concise: 1-2 pages resume, 1 page cover letter.
Use UK/International English by default unless the job location suggests otherwise.
Never fabricate employment, dates, or skills.";

/// Output directions appended after the CV and job description.
const OUTPUT_INSTRUCTIONS: &[&str] = &[
    "Return **JSON only** that matches this schema keys: resume_markdown, cover_letter_markdown, linkedin_summary, key_skills, tweaks.",
    "Use Markdown formatting for resume and cover letter (headers, bullet points).",
    "Include a concise LinkedIn About summary (3-6 lines).",
    SINGLE_JSON_OBJECT_INSTRUCTION,
];

/// Builds the user instruction. Inputs are expected to be bounded already.
pub fn build_user_prompt(role: &str, tone: &str, resume_text: &str, job_desc: &str) -> String {
    let mut lines = vec![
        format!("ROLE (optional): {role}"),
        format!("TONE (optional): {tone}"),
        String::new(),
        "SOURCE CV:".to_string(),
        resume_text.to_string(),
        String::new(),
        "JOB DESCRIPTION:".to_string(),
        job_desc.to_string(),
        String::new(),
        "INSTRUCTIONS:".to_string(),
    ];
    lines.extend(OUTPUT_INSTRUCTIONS.iter().map(|s| s.to_string()));
    lines.join("\n")
}
