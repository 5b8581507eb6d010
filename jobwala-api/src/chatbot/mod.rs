/// Keyword-matched help chatbot
///
/// Matches the lowercased user message against fixed keyword lists and picks
/// one canned response at random from the first matching category. There is
/// no conversation state and no language understanding; unmatched input gets
/// a fallback response.

use rand::seq::SliceRandom;
use serde::Serialize;

/// A canned-response category
struct Category {
    /// Stable category name returned to the client
    name: &'static str,

    /// Lowercase keywords checked against the lowercased input
    keywords: &'static [&'static str],

    /// Responses to choose from when the category matches
    responses: &'static [&'static str],
}

/// Categories checked in order; first match wins
const CATEGORIES: &[Category] = &[
    Category {
        name: "greeting",
        keywords: &["hello", "hi", "hey", "namaste", "good morning", "good evening"],
        responses: &[
            "Hello! How can I help you with your job search today?",
            "Hi there! Ask me about jobs, resumes, or applications.",
            "Namaste! What would you like to know?",
        ],
    },
    Category {
        name: "employer",
        keywords: &["post a job", "employer", "recruit", "company account", "consultancy"],
        responses: &[
            "Employers can post jobs from the company dashboard after registering an employer account.",
            "Register as a company or consultancy to post jobs and manage incoming applications.",
            "From the employer dashboard you can post jobs, review applications, and invite team members.",
        ],
    },
    Category {
        name: "job_search",
        keywords: &["job", "vacancy", "opening", "hiring", "position", "work"],
        responses: &[
            "You can browse all open positions on the Jobs page. Use the filters to narrow by category, location, and experience level.",
            "Search for jobs by title or company from the Jobs page. New openings are posted every day!",
            "Looking for work? Head to the Jobs page and filter by what matters to you.",
        ],
    },
    Category {
        name: "resume",
        keywords: &["resume", "cv", "upload", "curriculum"],
        responses: &[
            "You can upload your resume as a PDF, DOC, DOCX, or TXT file up to 5 MB.",
            "A clear resume helps employers find you. Upload yours from your profile, and we'll extract your skills automatically.",
            "Keep your resume under 5 MB in PDF, DOC, DOCX, or TXT format and upload it from your profile.",
        ],
    },
    Category {
        name: "application",
        keywords: &["apply", "application", "applied", "status", "shortlist"],
        responses: &[
            "You can apply to any open job from its detail page. Track every application and its status under My Applications.",
            "Application statuses move from pending to reviewed, shortlisted, and finally hired or rejected. Check My Applications for updates.",
            "You can only apply once per job. Your submitted applications are listed under My Applications.",
        ],
    },
];

/// Responses for input that matches no category
const FALLBACK_RESPONSES: &[&str] = &[
    "I'm not sure about that. Try asking about jobs, resumes, or applications.",
    "Sorry, I didn't catch that. I can help with job search, resumes, and applications.",
    "Could you rephrase? I know about jobs, resumes, applications, and employer accounts.",
];

/// A chatbot reply with the category that produced it
#[derive(Debug, Clone, Serialize)]
pub struct BotReply {
    /// Matched category name, or "fallback"
    pub category: &'static str,

    /// The canned response text
    pub reply: &'static str,
}

/// Checks a single keyword against normalized input
///
/// Phrases use plain containment; single words must match a whole word so
/// "hi" doesn't fire on "hiring".
fn keyword_matches(normalized: &str, keyword: &str) -> bool {
    if keyword.contains(' ') {
        normalized.contains(keyword)
    } else {
        normalized
            .split(|c: char| !c.is_alphanumeric())
            .any(|word| word == keyword)
    }
}

/// Name of the first category whose keywords appear in the input
///
/// Matching is case-insensitive, in declaration order.
pub fn category_for(input: &str) -> Option<&'static str> {
    let normalized = input.to_lowercase();

    CATEGORIES
        .iter()
        .find(|c| c.keywords.iter().any(|k| keyword_matches(&normalized, k)))
        .map(|c| c.name)
}

/// Produces a reply for a user message
///
/// Picks a random response from the matched category (or the fallback list).
pub fn respond(input: &str) -> BotReply {
    let normalized = input.to_lowercase();
    let mut rng = rand::thread_rng();

    let matched = CATEGORIES
        .iter()
        .find(|c| c.keywords.iter().any(|k| keyword_matches(&normalized, k)));

    match matched {
        Some(category) => BotReply {
            category: category.name,
            reply: category
                .responses
                .choose(&mut rng)
                .copied()
                .unwrap_or(FALLBACK_RESPONSES[0]),
        },
        None => BotReply {
            category: "fallback",
            reply: FALLBACK_RESPONSES
                .choose(&mut rng)
                .copied()
                .unwrap_or(FALLBACK_RESPONSES[0]),
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_category_matching() {
        assert_eq!(category_for("Hello there"), Some("greeting"));
        assert_eq!(category_for("any JOB openings?"), Some("job_search"));
        assert_eq!(category_for("how do I upload my cv"), Some("resume"));
        assert_eq!(category_for("what is my application status"), Some("application"));
        assert_eq!(category_for("I want to post a job"), Some("employer"));
    }

    #[test]
    fn test_category_first_match_wins() {
        // "hi" (greeting) appears before "job" in category order
        assert_eq!(category_for("hi, any job for me?"), Some("greeting"));
    }

    #[test]
    fn test_keyword_word_boundaries() {
        assert!(keyword_matches("hi there", "hi"));
        assert!(!keyword_matches("anyone hiring", "hi"));
        assert!(keyword_matches("please post a job for us", "post a job"));
    }

    #[test]
    fn test_category_no_match() {
        assert_eq!(category_for("what is the weather like"), None);
    }

    #[test]
    fn test_respond_uses_matched_category() {
        let reply = respond("Is anyone hiring?");
        assert_eq!(reply.category, "job_search");

        let responses: &[&str] = CATEGORIES
            .iter()
            .find(|c| c.name == "job_search")
            .unwrap()
            .responses;
        assert!(responses.contains(&reply.reply));
    }

    #[test]
    fn test_respond_fallback() {
        let reply = respond("zzz qqq");
        assert_eq!(reply.category, "fallback");
        assert!(FALLBACK_RESPONSES.contains(&reply.reply));
    }
}
