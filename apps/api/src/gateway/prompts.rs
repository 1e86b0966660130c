// Prompt constants for every gateway operation. Templates use `{name}`
// placeholders replaced before sending.

pub const ABOUT_ME_SYSTEM: &str =
    "You are a career coach helping software developers build portfolios. \
    Respond with the requested text only. \
    Do NOT include preambles, explanations, or markdown formatting.";

pub const ABOUT_ME_PROMPT_TEMPLATE: &str = r#"Based on this resume text, generate a creative 3-line "About Me" section.

Resume text:
{resume_text}"#;

/// System prompt for skill-tag suggestion — enforces JSON-only output.
pub const SKILL_TAGS_SYSTEM: &str =
    "You are a career coach specializing in helping software developers create \
    professional portfolios. \
    You MUST respond with valid JSON only — a JSON array of strings. \
    Do NOT include any text outside the JSON array. \
    Do NOT use markdown code fences.";

pub const SKILL_TAGS_PROMPT_TEMPLATE: &str = r#"Based on the following list of skills, suggest a categorized list of skill tags.

Skills: {skills}

Provide the skill tags as a JSON array of strings.
For example:
["JavaScript", "React", "Node.js", "MongoDB"]"#;

pub const EXPERIENCE_DESCRIPTION_SYSTEM: &str =
    "You are a career coach who is an expert at writing job descriptions for \
    software developer portfolios. \
    Respond with the description text only, no preamble.";

/// Soft cap of ~60 words is advisory — stated in the prompt, not enforced.
pub const EXPERIENCE_DESCRIPTION_PROMPT_TEMPLATE: &str = r#"Based on the role, company, and summary of tasks provided, generate a detailed and professional job description of no more than 60 words.

Role: {role}
Company: {company}
Tasks: {tasks}"#;

pub const PROJECT_DESCRIPTION_SYSTEM: &str =
    "You are a career coach who writes concise, impactful project descriptions \
    for software developer portfolios. \
    Respond with the description text only, no preamble.";

pub const PROJECT_DESCRIPTION_PROMPT_TEMPLATE: &str = r#"Write a short, professional description (2-3 sentences) for the following portfolio project. Highlight what it does and the technologies involved.

Project Title: {title}
Tech Stack: {tech_stack}"#;

pub const PROJECT_IMAGE_PROMPT_TEMPLATE: &str = r#"Generate a visually appealing and professional image that abstractly represents a software project.

Project Title: {title}
Project Description: {description}

The image should be suitable for a developer's portfolio. Think abstract, clean, modern, and tech-oriented. Avoid text. Use a cool color palette."#;

pub const COVER_LETTER_SYSTEM: &str =
    "You are a professional career coach and expert cover letter writer for \
    software developers. \
    Generate only the cover letter text, with no preamble or commentary.";

pub const COVER_LETTER_PROMPT_TEMPLATE: &str = r#"Your task is to generate a compelling and professional cover letter.

The user's name is: {name}

Here is the user's "About Me" section:
"{about_me}"

Here are the user's skills:
{skills}

Here is the user's work experience:
{experience}

Here are some of the user's projects:
{projects}

Now, carefully analyze the following job description and write a cover letter that highlights the most relevant skills and experiences from the user's portfolio. The tone should be professional but enthusiastic. Keep the cover letter concise and impactful, around 3-4 paragraphs.

Job Description:
"{job_description}"

Generate only the cover letter text."#;

pub const TESTIMONIAL_SYSTEM: &str =
    "You are a professional writer who specializes in crafting compelling \
    testimonials for developer portfolios. \
    Generate only the testimonial text.";

pub const TESTIMONIAL_PROMPT_TEMPLATE: &str = r#"Based on the name, role, and key traits provided, write a professional and enthusiastic testimonial of about 2-3 sentences. The testimonial should sound authentic and highlight the person's positive qualities.

Name of reviewer: {name}
Role of reviewer: {role}
Key Traits: {traits}"#;

/// System prompt for portfolio evaluation — enforces JSON-only output.
pub const EVALUATE_SYSTEM: &str =
    "You are an expert career coach and hiring manager for a top tech company. \
    You MUST respond with valid JSON only, matching the requested schema. \
    Do NOT include any text outside the JSON object. \
    Do NOT use markdown code fences.";

pub const EVALUATE_PROMPT_TEMPLATE: &str = r#"Your task is to evaluate a software developer's portfolio based on the provided data.

Provide an overall score out of 100. A score of 85 or higher is excellent and job-ready.
Provide a summary of the portfolio's strengths in a single paragraph.
Provide a list of 3-5 concrete, actionable suggestions for improvement. Focus on clarity, impact, and what a recruiter wants to see.

Here is the portfolio data:

Name: {name}
Headline: {headline}

About Me:
"{about_me}"

Skills:
{skills}

Experience:
{experience}

Projects:
{projects}

Return a JSON object with this EXACT schema (no extra fields):
{
  "score": 85,
  "strengths": "A single paragraph summarizing the portfolio's strong points.",
  "suggestions": ["First suggestion", "Second suggestion", "Third suggestion"]
}"#;
