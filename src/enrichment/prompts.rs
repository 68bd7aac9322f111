//! Prompt templates for the enrichment service

/// Char-boundary-safe prefix of a text, to keep prompts bounded.
fn head(text: &str, cap: usize) -> &str {
    match text.char_indices().nth(cap) {
        Some((idx, _)) => &text[..idx],
        None => text,
    }
}

pub fn skills_to_add(job_text: &str, missing: &[String]) -> String {
    format!(
        "You are a resume expert. Based on this job description, list the EXACT skills the \
         candidate should add to their resume.\n\n\
         Job Description: {}\n\n\
         Missing Skills: {}\n\n\
         Instructions:\n\
         - List each skill on a new line starting with a dash (-)\n\
         - Use the EXACT terminology from the job description\n\
         - Prioritize the most important skills first\n\
         - Keep it to 8-10 skills maximum\n\n\
         Generate the skills list:",
        head(job_text, 600),
        missing.join(", ")
    )
}

pub fn professional_summary(job_text: &str, skills: &[String]) -> String {
    format!(
        "You are a professional resume writer. Write a compelling professional summary \
         tailored specifically for this job.\n\n\
         Job Description: {}\n\n\
         Key Skills to Include: {}\n\n\
         Instructions:\n\
         - Write 3-4 sentences maximum\n\
         - Start with a strong professional title or descriptor\n\
         - Naturally incorporate the key skills listed above\n\
         - Use active voice and achievement-focused language\n\n\
         Write the professional summary:",
        head(job_text, 500),
        skills.join(", ")
    )
}

pub fn experience_bullets(job_text: &str, skills: &[String]) -> String {
    format!(
        "You are a professional resume writer. Generate 4 specific, achievement-oriented \
         bullet points that incorporate the missing skills.\n\n\
         Job Description: {}\n\n\
         Missing Skills to Incorporate: {}\n\n\
         Instructions:\n\
         - Start with powerful action verbs (Led, Developed, Implemented, Optimized)\n\
         - Include specific metrics\n\
         - Use past tense, 1-2 lines per bullet\n\
         - Focus on achievements and impact, not tasks\n\n\
         Generate 4 bullet points, one per line, starting with a dash (-).",
        head(job_text, 500),
        skills.join(", ")
    )
}

pub fn skills_integration(job_text: &str, skills: &[String]) -> String {
    format!(
        "You are a professional resume writer. Write 2-3 sentences that showcase these \
         skills for a Skills section.\n\n\
         Job Requirements: {}\n\n\
         Skills to Showcase: {}\n\n\
         Instructions:\n\
         - Show proficiency and experience level\n\
         - Incorporate ALL the skills listed above\n\
         - Keep each sentence complete and professional\n\n\
         Generate 2-3 sentences, one per line.",
        head(job_text, 400),
        skills.join(", ")
    )
}

pub fn summary_enhancement(job_text: &str, skills: &[String]) -> String {
    format!(
        "You are a professional resume writer. Generate a compelling 2-3 sentence \
         professional summary for a resume.\n\n\
         Job Description: {}\n\n\
         Key Skills to highlight: {}\n\n\
         Requirements:\n\
         - Include the key skills naturally\n\
         - Focus on value proposition\n\
         - Keep it to 2-3 sentences total\n\n\
         Generate the professional summary:",
        head(job_text, 400),
        skills.join(", ")
    )
}

pub fn project_ideas(job_text: &str, skills: &[String], has_projects: bool) -> String {
    format!(
        "You are a technical career advisor. Based on this job description, suggest 3-4 \
         specific project ideas that would strengthen the candidate's resume.\n\n\
         Job Description: {}\n\n\
         Missing Technical Skills: {}\n\n\
         Current Projects Status: {}\n\n\
         Instructions:\n\
         - Suggest specific, realistic projects achievable within 1-2 weeks each\n\
         - Each project should demonstrate 2-3 of the missing skills\n\
         - Name what the project should do and which technologies to use\n\
         - One complete sentence per idea, starting with a dash (-)\n\n\
         Generate 3-4 project ideas:",
        head(job_text, 500),
        skills.join(", "),
        if has_projects {
            "Has some projects"
        } else {
            "No projects section found"
        }
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_prompts_embed_inputs() {
        let skills = vec!["python".to_string(), "aws".to_string()];
        let prompt = skills_to_add("Backend role with cloud focus", &skills);

        assert!(prompt.contains("Backend role with cloud focus"));
        assert!(prompt.contains("python, aws"));
    }

    #[test]
    fn test_job_text_is_truncated() {
        let long_job = "x".repeat(2000);
        let prompt = professional_summary(&long_job, &["python".to_string()]);

        assert!(prompt.len() < 1400);
    }

    #[test]
    fn test_project_prompt_reflects_projects_status() {
        let with = project_ideas("job", &["python".to_string()], true);
        let without = project_ideas("job", &["python".to_string()], false);

        assert!(with.contains("Has some projects"));
        assert!(without.contains("No projects section found"));
    }
}
