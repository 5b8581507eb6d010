/// Resume text extractor
///
/// Applies a fixed sequence of regular expressions to raw resume text to
/// pull out an email, a phone number, a name, a skills list, years of
/// experience, education, a job title, a company, and a location.
///
/// This is deliberately best-effort: the first match wins for every field,
/// there is no disambiguation or confidence model, and a field with no match
/// comes back as an empty string (or empty list for skills).
///
/// Labeled lines (`Email: ...`, `Location: ...`) are preferred; free-text
/// fallback patterns run only when no labeled line matched.
///
/// # Example
///
/// ```
/// use jobwala_shared::resume::extractor::extract;
///
/// let parsed = extract("Name: Asha Verma\nEmail: asha@example.com\nSkills: Rust, SQL");
/// assert_eq!(parsed.email, "asha@example.com");
/// assert_eq!(parsed.name, "Asha Verma");
/// assert!(parsed.skills.contains(&"Rust".to_string()));
/// ```

use regex::Regex;
use serde::{Deserialize, Serialize};
use std::sync::OnceLock;

/// Structured record produced by the extractor
///
/// Every scalar field is an empty string when nothing matched.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExtractedResume {
    pub email: String,
    pub phone: String,
    pub name: String,
    pub skills: Vec<String>,
    pub experience_years: String,
    pub education: String,
    pub job_title: String,
    pub company: String,
    pub location: String,
}

/// Skills recognized by the extractor
///
/// Matched case-insensitively on word boundaries; the canonical casing below
/// is what ends up in the output.
const KNOWN_SKILLS: &[&str] = &[
    "Java",
    "JavaScript",
    "TypeScript",
    "Python",
    "Rust",
    "Go",
    "C++",
    "C#",
    "SQL",
    "PostgreSQL",
    "MySQL",
    "MongoDB",
    "Redis",
    "HTML",
    "CSS",
    "React",
    "Angular",
    "Vue",
    "Node.js",
    "Django",
    "Spring",
    "Docker",
    "Kubernetes",
    "AWS",
    "Azure",
    "GCP",
    "Git",
    "Linux",
    "Excel",
    "Photoshop",
    "Figma",
];

/// Job titles recognized by the free-text fallback
const KNOWN_TITLES: &[&str] = &[
    "Software Engineer",
    "Senior Software Engineer",
    "Software Developer",
    "Web Developer",
    "Frontend Developer",
    "Backend Developer",
    "Full Stack Developer",
    "Data Analyst",
    "Data Scientist",
    "Product Manager",
    "Project Manager",
    "Business Analyst",
    "QA Engineer",
    "DevOps Engineer",
    "UI/UX Designer",
    "Graphic Designer",
    "HR Executive",
    "Sales Executive",
    "Marketing Manager",
    "Consultant",
];

/// Compiled patterns, built once on first use
struct Patterns {
    email: Regex,
    phone: Regex,
    name_label: Regex,
    name_line: Regex,
    experience: Regex,
    education: Regex,
    title_label: Regex,
    company_label: Regex,
    company_at: Regex,
    location_label: Regex,
    skill_word: Vec<(Regex, &'static str)>,
    title_word: Vec<(Regex, &'static str)>,
}

fn patterns() -> &'static Patterns {
    static PATTERNS: OnceLock<Patterns> = OnceLock::new();
    PATTERNS.get_or_init(|| Patterns {
        email: Regex::new(r"[A-Za-z0-9._%+-]+@[A-Za-z0-9.-]+\.[A-Za-z]{2,}")
            .expect("valid email pattern"),
        phone: Regex::new(r"\+?\d[\d\s()./-]{7,14}\d").expect("valid phone pattern"),
        name_label: Regex::new(r"(?im)^\s*name\s*[:\-]\s*(\S.*?)\s*$")
            .expect("valid name label pattern"),
        name_line: Regex::new(r"^\s*([A-Z][a-z]+(?:\s+[A-Z][a-z]+){1,3})\s*$")
            .expect("valid name line pattern"),
        experience: Regex::new(
            r"(?i)(\d+(?:\.\d+)?)\s*\+?\s*(?:years?|yrs?)(?:\s+of)?(?:\s+\w+)?\s+experience",
        )
        .expect("valid experience pattern"),
        // Case-sensitive: a case-insensitive B.E./B.Sc pattern would match the
        // ordinary words "be" and "bsc"-like tokens
        education: Regex::new(
            r"\b(B\.?\s?Tech|B\.E\.?|BE\b|B\.?Sc|B\.?Com|BBA|BCA|M\.?\s?Tech|M\.?Sc|M\.?Com|MBA|MCA|Ph\.?D|Bachelor(?:\s+of\s+\w+)?|Master(?:\s+of\s+\w+)?|Diploma)\b",
        )
        .expect("valid education pattern"),
        title_label: Regex::new(r"(?im)^\s*(?:job\s+title|title|designation|role)\s*[:\-]\s*(\S.*?)\s*$")
            .expect("valid title label pattern"),
        company_label: Regex::new(r"(?im)^\s*(?:company|employer|organization)\s*[:\-]\s*(\S.*?)\s*$")
            .expect("valid company label pattern"),
        company_at: Regex::new(
            r"(?m)\bat\s+([A-Z][A-Za-z0-9&.\- ]*(?:Inc|Ltd|LLC|Pvt\.?\s?Ltd|Technologies|Solutions|Systems|Labs|Corp)\.?)",
        )
        .expect("valid company fallback pattern"),
        location_label: Regex::new(r"(?im)^\s*(?:location|address|city)\s*[:\-]\s*(\S.*?)\s*$")
            .expect("valid location label pattern"),
        skill_word: KNOWN_SKILLS
            .iter()
            .map(|skill| {
                let pattern = format!(r"(?i)(^|[^A-Za-z0-9+#.]){}($|[^A-Za-z0-9+#])", regex::escape(skill));
                (Regex::new(&pattern).expect("valid skill pattern"), *skill)
            })
            .collect(),
        title_word: KNOWN_TITLES
            .iter()
            .map(|title| {
                let pattern = format!(r"(?i)\b{}\b", regex::escape(title));
                (Regex::new(&pattern).expect("valid title pattern"), *title)
            })
            .collect(),
    })
}

/// Extracts a structured record from raw resume text
///
/// Each field is filled independently by the first matching pattern.
pub fn extract(text: &str) -> ExtractedResume {
    let p = patterns();

    let email = p
        .email
        .find(text)
        .map(|m| m.as_str().to_string())
        .unwrap_or_default();

    // Strip email matches before looking for a phone number so an address
    // like user.1234567890@mail.com can't be mistaken for one
    let without_emails = p.email.replace_all(text, " ");
    let phone = p
        .phone
        .find(&without_emails)
        .map(|m| m.as_str().trim().to_string())
        .unwrap_or_default();

    let name = extract_name(text);

    let skills = p
        .skill_word
        .iter()
        .filter(|(re, _)| re.is_match(text))
        .map(|(_, skill)| skill.to_string())
        .collect();

    let experience_years = p
        .experience
        .captures(text)
        .and_then(|c| c.get(1))
        .map(|m| m.as_str().to_string())
        .unwrap_or_default();

    let education = p
        .education
        .captures(text)
        .and_then(|c| c.get(1))
        .map(|m| m.as_str().to_string())
        .unwrap_or_default();

    let job_title = p
        .title_label
        .captures(text)
        .and_then(|c| c.get(1))
        .map(|m| m.as_str().to_string())
        .or_else(|| {
            p.title_word
                .iter()
                .find(|(re, _)| re.is_match(text))
                .map(|(_, title)| title.to_string())
        })
        .unwrap_or_default();

    let company = p
        .company_label
        .captures(text)
        .and_then(|c| c.get(1))
        .map(|m| m.as_str().to_string())
        .or_else(|| {
            p.company_at
                .captures(text)
                .and_then(|c| c.get(1))
                .map(|m| m.as_str().trim().to_string())
        })
        .unwrap_or_default();

    let location = p
        .location_label
        .captures(text)
        .and_then(|c| c.get(1))
        .map(|m| m.as_str().to_string())
        .unwrap_or_default();

    ExtractedResume {
        email,
        phone,
        name,
        skills,
        experience_years,
        education,
        job_title,
        company,
        location,
    }
}

/// Name extraction: labeled `Name:` line first, then the first line of the
/// document if it looks like a 2-4 word capitalized name
fn extract_name(text: &str) -> String {
    let p = patterns();

    if let Some(c) = p.name_label.captures(text) {
        if let Some(m) = c.get(1) {
            return m.as_str().to_string();
        }
    }

    if let Some(first_line) = text.lines().find(|l| !l.trim().is_empty()) {
        if let Some(c) = p.name_line.captures(first_line) {
            if let Some(m) = c.get(1) {
                return m.as_str().to_string();
            }
        }
    }

    String::new()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extract_email_labeled() {
        let parsed = extract("Email: foo@bar.com");
        assert_eq!(parsed.email, "foo@bar.com");
    }

    #[test]
    fn test_extract_email_inline() {
        let parsed = extract("Reach me at jane.doe+jobs@example.co.in for roles.");
        assert_eq!(parsed.email, "jane.doe+jobs@example.co.in");
    }

    #[test]
    fn test_extract_email_missing() {
        let parsed = extract("No contact details in this resume at all.");
        assert_eq!(parsed.email, "");
    }

    #[test]
    fn test_extract_phone() {
        let parsed = extract("Phone: +91 98765 43210");
        assert_eq!(parsed.phone, "+91 98765 43210");
    }

    #[test]
    fn test_extract_phone_not_from_email() {
        // The digits inside an email address must not be read as a phone number
        let parsed = extract("Contact: user.1234567890@mail.com");
        assert_eq!(parsed.phone, "");
    }

    #[test]
    fn test_extract_name_labeled() {
        let parsed = extract("Name: Asha Verma\nEmail: asha@example.com");
        assert_eq!(parsed.name, "Asha Verma");
    }

    #[test]
    fn test_extract_name_first_line() {
        let parsed = extract("Rahul Sharma\nSoftware Engineer\nPune");
        assert_eq!(parsed.name, "Rahul Sharma");
    }

    #[test]
    fn test_extract_name_first_line_not_a_name() {
        let parsed = extract("CURRICULUM VITAE\nsomething else");
        assert_eq!(parsed.name, "");
    }

    #[test]
    fn test_extract_skills() {
        let parsed = extract("Skills: Rust, PostgreSQL, Docker and a bit of Excel");
        assert!(parsed.skills.contains(&"Rust".to_string()));
        assert!(parsed.skills.contains(&"PostgreSQL".to_string()));
        assert!(parsed.skills.contains(&"Docker".to_string()));
        assert!(parsed.skills.contains(&"Excel".to_string()));
    }

    #[test]
    fn test_extract_skills_case_insensitive() {
        let parsed = extract("worked with PYTHON and javascript");
        assert!(parsed.skills.contains(&"Python".to_string()));
        assert!(parsed.skills.contains(&"JavaScript".to_string()));
    }

    #[test]
    fn test_extract_skills_word_boundary() {
        // "Going" must not match "Go"
        let parsed = extract("Going forward I want to learn new things");
        assert!(!parsed.skills.contains(&"Go".to_string()));
    }

    #[test]
    fn test_extract_skills_empty() {
        let parsed = extract("I enjoy gardening and chess.");
        assert!(parsed.skills.is_empty());
    }

    #[test]
    fn test_extract_experience_years() {
        let parsed = extract("I have 5 years of experience in backend work");
        assert_eq!(parsed.experience_years, "5");

        let parsed = extract("7+ yrs experience");
        assert_eq!(parsed.experience_years, "7");

        let parsed = extract("3.5 years of professional experience");
        assert_eq!(parsed.experience_years, "3.5");
    }

    #[test]
    fn test_extract_education() {
        let parsed = extract("Education: B.Tech in Computer Science, 2018");
        assert_eq!(parsed.education, "B.Tech");

        let parsed = extract("Completed MBA from a state university");
        assert_eq!(parsed.education, "MBA");
    }

    #[test]
    fn test_extract_job_title_labeled() {
        let parsed = extract("Designation: Principal Engineer");
        assert_eq!(parsed.job_title, "Principal Engineer");
    }

    #[test]
    fn test_extract_job_title_fallback() {
        let parsed = extract("Worked as a Full Stack Developer on several products");
        assert_eq!(parsed.job_title, "Full Stack Developer");
    }

    #[test]
    fn test_extract_company_labeled() {
        let parsed = extract("Company: Initech");
        assert_eq!(parsed.company, "Initech");
    }

    #[test]
    fn test_extract_company_fallback() {
        let parsed = extract("Software Developer at Acme Technologies since 2021");
        assert_eq!(parsed.company, "Acme Technologies");
    }

    #[test]
    fn test_extract_location() {
        let parsed = extract("Location: Bengaluru, Karnataka");
        assert_eq!(parsed.location, "Bengaluru, Karnataka");
    }

    #[test]
    fn test_extract_full_resume() {
        let text = "Asha Verma\n\
                    Email: asha@example.com\n\
                    Phone: 98765 43210\n\
                    Location: Pune\n\
                    Designation: Backend Developer\n\
                    Company: Initrode Solutions\n\
                    6 years of experience\n\
                    Education: M.Tech\n\
                    Skills: Rust, SQL, Docker";

        let parsed = extract(text);
        assert_eq!(parsed.name, "Asha Verma");
        assert_eq!(parsed.email, "asha@example.com");
        assert_eq!(parsed.phone, "98765 43210");
        assert_eq!(parsed.location, "Pune");
        assert_eq!(parsed.job_title, "Backend Developer");
        assert_eq!(parsed.company, "Initrode Solutions");
        assert_eq!(parsed.experience_years, "6");
        assert_eq!(parsed.education, "M.Tech");
        assert_eq!(
            parsed.skills,
            vec!["Rust".to_string(), "SQL".to_string(), "Docker".to_string()]
        );
    }

    #[test]
    fn test_extract_empty_input() {
        let parsed = extract("");
        assert_eq!(parsed, ExtractedResume::default());
    }
}
