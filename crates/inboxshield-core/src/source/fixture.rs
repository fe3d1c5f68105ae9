//! Demo inbox.

use chrono::{DateTime, NaiveDate, Utc};

use crate::model::{EmailId, EmailRecord, Sender};

struct DemoMessage {
    id: &'static str,
    name: &'static str,
    email: &'static str,
    subject: &'static str,
    snippet: &'static str,
    body: &'static str,
    date: (u32, u32, u32),
}

const DEMO: [DemoMessage; 5] = [
    DemoMessage {
        id: "1",
        name: "John Recruitment",
        email: "john@techrecruiters.com",
        subject: "Senior Developer Position at Innovative Tech",
        snippet: "We have an exciting opportunity that matches your profile...",
        body: "Dear [Name],

I came across your profile and was impressed by your skills and experience.

We have an opening for a Senior Developer position at Innovative Tech, a fast growing \
fintech startup. The role offers competitive compensation and modern technologies.

Key Requirements:
- 5+ years of experience in frontend development
- Proficiency with React, TypeScript, and modern JavaScript
- Experience with cloud services and serverless architecture

Would you be interested in learning more about this opportunity? If so, I'd be happy to \
schedule a call to discuss the details.

Best regards,
John Smith
Tech Recruiters Inc.",
        date: (5, 3, 9),
    },
    DemoMessage {
        id: "2",
        name: "Marketing Automation",
        email: "marketing@salescompany.com",
        subject: "Boost Your Revenue with Our SaaS Solution",
        snippet: "Our AI-powered platform has been helping companies like yours...",
        body: "Hello there,

Are you looking to increase your company's revenue? Our AI-powered SaaS solution has been \
helping businesses like yours achieve remarkable results.

Key benefits:
- 30% average increase in conversion rates
- Automated customer journey mapping
- Real-time analytics and insights

Would you be interested in a free demo? Just reply to this email.

Best,
Mark Johnson
Sales Representative",
        date: (5, 2, 14),
    },
    DemoMessage {
        id: "3",
        name: "Support Team",
        email: "support@yourservice.com",
        subject: "Your Subscription Renewal",
        snippet: "Your subscription is about to expire in 5 days...",
        body: "Hi there,

This is a friendly reminder that your Premium subscription will expire in 5 days.

To keep access to all Premium features, please renew before the expiration date from the \
Billing section of your account.

As a valued customer, we're offering you a 15% discount on your renewal if you choose the \
annual plan. Just use code RENEW15 at checkout.

Best regards,
Support Team
YourService",
        date: (5, 1, 11),
    },
    DemoMessage {
        id: "4",
        name: "Alex Partner",
        email: "alex@potentialclient.com",
        subject: "Potential collaboration opportunity",
        snippet: "I've been following your work and would love to discuss...",
        body: "Hello,

I've been following your company's work for some time and I'm impressed by your recent AI \
integration projects.

We are looking to implement similar technologies and I believe there might be a great \
opportunity for collaboration on a specific project that would benefit from your expertise.

Would you be available for a 30-minute call next week to discuss this potential \
partnership?

Looking forward to your response,
Alex Partner
Business Development",
        date: (4, 30, 16),
    },
    DemoMessage {
        id: "5",
        name: "Newsletter",
        email: "newsletter@techblog.com",
        subject: "Weekly Tech News: AI Breakthroughs & More",
        snippet: "This week's top stories include major advancements in AI technology...",
        body: "# Weekly Tech Roundup

## Top Stories This Week
1. New language model shows stronger reasoning.
2. Quantum computing milestone announced.
3. New privacy regulations come into effect next month.

## Industry Insights
Edge computing adoption keeps accelerating.

## Upcoming Events
- AI Developer Conference: May 15-17, Virtual
- Cloud Innovation Summit: May 20, New York

Stay curious!
Tech Blog Team",
        date: (4, 29, 8),
    },
];

fn received(month: u32, day: u32, hour: u32) -> DateTime<Utc> {
    NaiveDate::from_ymd_opt(2023, month, day)
        .and_then(|d| d.and_hms_opt(hour, 0, 0))
        .map(|naive| naive.and_utc())
        .unwrap_or_default()
}

/// The five-message demo inbox, newest first, all unread and unanalyzed.
#[must_use]
pub fn demo_inbox() -> Vec<EmailRecord> {
    DEMO.iter()
        .map(|m| {
            let (month, day, hour) = m.date;
            EmailRecord {
                id: EmailId::new(m.id),
                from: Sender::new(m.name, m.email),
                subject: m.subject.to_string(),
                snippet: m.snippet.to_string(),
                body: m.body.to_string(),
                date: received(month, day, hour),
                unread: true,
                analysis: None,
            }
        })
        .collect()
}
