//! Built-in classification rules.

use super::Rule;
use crate::model::Category;

/// Case-insensitive substring test.
fn contains(haystack: &str, needle: &str) -> bool {
    haystack.to_lowercase().contains(needle)
}

/// The built-in rules, highest priority first.
#[must_use]
pub fn builtin_rules() -> Vec<Rule> {
    vec![job_offer(), marketing(), support(), cold_email(), newsletter()]
}

/// Recruiters pitching a position.
#[must_use]
pub fn job_offer() -> Rule {
    Rule::new(
        Category::JobOffer,
        |email| {
            contains(&email.subject, "position")
                || (contains(&email.body, "opportunity") && contains(&email.body, "experience"))
        },
        |email| {
            vec![
                format!("Recruiter from {} is offering a position", email.from.name),
                "Position requires experience with specific technologies".to_string(),
                "They want to schedule a call to discuss".to_string(),
            ]
        },
        |email| {
            format!(
                "Dear {},\n\n\
                 Thank you for reaching out about the position. I'm interested in learning more \
                 about this opportunity and would be happy to schedule a call to discuss the \
                 details further.\n\n\
                 Please let me know what times would work best for you in the coming week.\n\n\
                 Best regards,\n[Your Name]",
                email.from.name
            )
        },
    )
}

/// Sales pitches.
#[must_use]
pub fn marketing() -> Rule {
    Rule::new(
        Category::Marketing,
        |email| {
            contains(&email.subject, "boost")
                || contains(&email.subject, "revenue")
                || contains(&email.body, "sales")
        },
        |email| {
            vec![
                format!(
                    "{} is offering a SaaS solution to increase revenue",
                    email.from.name
                ),
                "They claim to provide specific measurable results".to_string(),
                "They are requesting a response for a demo".to_string(),
            ]
        },
        |email| {
            format!(
                "Hello {},\n\n\
                 Thank you for your email about your SaaS solution. While I appreciate the \
                 information, we're not looking to implement new tools in this area at this \
                 time.\n\n\
                 I'll keep your contact information should our needs change in the future.\n\n\
                 Best regards,\n[Your Name]",
                email.from.name
            )
        },
    )
}

/// Subscription and account notices from a vendor's support desk.
#[must_use]
pub fn support() -> Rule {
    Rule::new(
        Category::Support,
        |email| contains(&email.subject, "subscription") || contains(&email.from.email, "support"),
        |email| {
            let timing = days_until_expiry(&email.body).map_or_else(
                || "Subscription is due for renewal soon".to_string(),
                |days| format!("Subscription expires in {days} days"),
            );
            vec![
                "Notification about subscription renewal".to_string(),
                timing,
                "Special discount offered for renewal".to_string(),
            ]
        },
        |email| {
            let code = discount_code(&email.body)
                .map_or_else(|| "the discount code".to_string(), |code| format!("the {code} code"));
            format!(
                "Hello Support Team,\n\n\
                 Thank you for the reminder about my subscription renewal. I'd like to take \
                 advantage of the renewal discount.\n\n\
                 Could you please provide instructions on how to apply {code} during \
                 checkout?\n\n\
                 Thanks,\n[Your Name]"
            )
        },
    )
}

/// Unsolicited collaboration requests.
#[must_use]
pub fn cold_email() -> Rule {
    Rule::new(
        Category::ColdEmail,
        |email| contains(&email.subject, "collaboration") || contains(&email.body, "partnership"),
        |email| {
            vec![
                format!(
                    "{} has been following your work and is impressed",
                    email.from.name
                ),
                "They want to discuss a potential collaboration".to_string(),
                "They are requesting a call next week".to_string(),
            ]
        },
        |email| {
            format!(
                "Hi {},\n\n\
                 Thank you for reaching out about a potential collaboration. I'd be interested \
                 in learning more about your project and how we might work together.\n\n\
                 I'm available for a call next week. Would Tuesday or Thursday afternoon work \
                 for you?\n\n\
                 Looking forward to our conversation.\n\n\
                 Best regards,\n[Your Name]",
                email.from.name
            )
        },
    )
}

/// Digests and roundups. Never suggests a reply.
#[must_use]
pub fn newsletter() -> Rule {
    Rule::new(
        Category::Newsletter,
        |email| contains(&email.subject, "weekly") || contains(&email.from.email, "newsletter"),
        |_| {
            vec![
                "Weekly tech news roundup with focus on AI advancements".to_string(),
                "Information about industry trends in edge computing".to_string(),
                "List of upcoming tech events and conferences".to_string(),
            ]
        },
        |_| String::new(),
    )
}

/// Words of `text` with surrounding punctuation removed.
fn words(text: &str) -> impl Iterator<Item = &str> {
    text.split_whitespace()
        .map(|w| w.trim_matches(|c: char| !c.is_alphanumeric()))
        .filter(|w| !w.is_empty())
}

/// Finds "in N days" in the body.
fn days_until_expiry(body: &str) -> Option<u32> {
    let words: Vec<&str> = words(body).collect();
    words.windows(3).find_map(|w| {
        let unit = w[2].to_lowercase();
        if w[0].eq_ignore_ascii_case("in") && (unit == "days" || unit == "day") {
            w[1].parse().ok()
        } else {
            None
        }
    })
}

/// Finds an upper-case promo code following the word "code".
fn discount_code(body: &str) -> Option<&str> {
    let words: Vec<&str> = words(body).collect();
    words.windows(2).find_map(|w| {
        let candidate = w[1];
        let looks_like_code = candidate.len() >= 3
            && candidate
                .chars()
                .all(|c| c.is_ascii_uppercase() || c.is_ascii_digit())
            && candidate.chars().any(|c| c.is_ascii_uppercase());
        (w[0].eq_ignore_ascii_case("code") && looks_like_code).then_some(candidate)
    })
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::model::{EmailId, EmailRecord, Sender};
    use chrono::{TimeZone, Utc};

    fn email(name: &str, address: &str, subject: &str, body: &str) -> EmailRecord {
        EmailRecord {
            id: EmailId::from("r"),
            from: Sender::new(name, address),
            subject: subject.to_string(),
            snippet: String::new(),
            body: body.to_string(),
            date: Utc.with_ymd_and_hms(2023, 5, 1, 8, 0, 0).unwrap(),
            unread: true,
            analysis: None,
        }
    }

    #[test]
    fn test_job_offer_by_subject_is_case_insensitive() {
        let rule = job_offer();
        assert!(rule.matches(&email("Jo", "jo@hr.com", "Senior POSITION open", "")));
    }

    #[test]
    fn test_job_offer_body_needs_both_words() {
        let rule = job_offer();
        assert!(rule.matches(&email("Jo", "jo@hr.com", "Hi", "An Opportunity for your Experience")));
        assert!(!rule.matches(&email("Jo", "jo@hr.com", "Hi", "An opportunity awaits")));
        assert!(!rule.matches(&email("Jo", "jo@hr.com", "Hi", "Years of experience")));
    }

    #[test]
    fn test_job_offer_result_uses_sender_name() {
        let record = email("Jane Hunter", "jane@hr.com", "Position", "");
        let result = job_offer().build(&record);
        assert_eq!(result.category, Category::JobOffer);
        assert_eq!(result.summary.len(), 3);
        assert!(result.summary[0].contains("Jane Hunter"));
        assert!(result.suggested_reply.starts_with("Dear Jane Hunter,"));
        assert!(result.suggested_reply.contains("schedule a call"));
    }

    #[test]
    fn test_marketing_matches_fields() {
        let rule = marketing();
        assert!(rule.matches(&email("M", "m@x.com", "Boost your funnel", "")));
        assert!(rule.matches(&email("M", "m@x.com", "Q3 Revenue", "")));
        assert!(rule.matches(&email("M", "m@x.com", "Hello", "our SALES team")));
        // "sales" in the sender address is not a body match.
        assert!(!rule.matches(&email("M", "sales@x.com", "Hello", "")));
        // "boost" in the body is not a subject match.
        assert!(!rule.matches(&email("M", "m@x.com", "Hello", "boost")));
    }

    #[test]
    fn test_marketing_reply_declines() {
        let result = marketing().build(&email("Pitch Co", "p@x.com", "Boost", ""));
        assert!(result.suggested_reply.contains("not looking"));
        assert!(result.suggested_reply.contains("keep your contact information"));
    }

    #[test]
    fn test_support_matches_subject_or_address() {
        let rule = support();
        assert!(rule.matches(&email("S", "billing@x.com", "Your Subscription", "")));
        assert!(rule.matches(&email("S", "SUPPORT@x.com", "Hello", "")));
        // The display name is not the address.
        assert!(!rule.matches(&email("Support Team", "team@x.com", "Hello", "")));
    }

    #[test]
    fn test_support_extracts_timing_and_code() {
        let body = "Your plan will expire in 5 days. Just use code RENEW15 at checkout.";
        let result = support().build(&email("S", "support@x.com", "Renewal", body));
        assert_eq!(result.summary[1], "Subscription expires in 5 days");
        assert!(result.suggested_reply.contains("apply the RENEW15 code"));
    }

    #[test]
    fn test_support_without_details_falls_back() {
        let result = support().build(&email("S", "support@x.com", "Renewal", "Please renew."));
        assert_eq!(result.summary[1], "Subscription is due for renewal soon");
        assert!(result.suggested_reply.contains("apply the discount code"));
    }

    #[test]
    fn test_cold_email_matches() {
        let rule = cold_email();
        assert!(rule.matches(&email("A", "a@x.com", "Collaboration idea", "")));
        assert!(rule.matches(&email("A", "a@x.com", "Hi", "a potential Partnership")));
        assert!(!rule.matches(&email("A", "partnership@x.com", "Hi", "")));
    }

    #[test]
    fn test_newsletter_has_no_reply() {
        let rule = newsletter();
        let record = email("Digest", "newsletter@blog.com", "Top stories", "");
        assert!(rule.matches(&record));
        let result = rule.build(&record);
        assert_eq!(result.category, Category::Newsletter);
        assert!(!result.summary.is_empty());
        assert!(result.suggested_reply.is_empty());
    }

    #[test]
    fn test_helpers() {
        assert_eq!(days_until_expiry("expires in 12 days!"), Some(12));
        assert_eq!(days_until_expiry("in a few days"), None);
        assert_eq!(discount_code("use code SAVE20."), Some("SAVE20"));
        assert_eq!(discount_code("the code is secret"), None);
        assert_eq!(discount_code("code 1234"), None);
    }
}
