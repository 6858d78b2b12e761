// Keyword-based extraction used when the model reply carries no usable JSON.

use std::sync::OnceLock;

use regex::{Regex, RegexBuilder};

use super::models::{ExtractedTechStack, Seniority, TechStackCategories};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Category {
    Language,
    Framework,
    Database,
    DevOps,
    Cloud,
    Testing,
    Tool,
    Other,
}

use Category::*;

const CATALOG: &[(&str, Category)] = &[
    ("TypeScript", Language),
    ("JavaScript", Language),
    ("Python", Language),
    ("Java", Language),
    ("C#", Language),
    ("Go", Language),
    ("Rust", Language),
    ("PHP", Language),
    ("Ruby", Language),
    ("Elixir", Language),
    ("Scala", Language),
    ("Kotlin", Language),
    ("HTML", Language),
    ("CSS", Language),
    ("SCSS", Language),
    ("Sass", Language),
    ("Less", Language),
    ("React", Framework),
    ("Angular", Framework),
    ("Vue", Framework),
    ("Svelte", Framework),
    ("Next.js", Framework),
    ("Nuxt.js", Framework),
    ("Gatsby", Framework),
    ("Tailwind", Framework),
    ("Bootstrap", Framework),
    ("Material-UI", Framework),
    ("Ant Design", Framework),
    ("Chakra UI", Framework),
    ("Node.js", Framework),
    ("Express", Framework),
    ("Fastify", Framework),
    ("Koa", Framework),
    ("NestJS", Framework),
    ("Django", Framework),
    ("Flask", Framework),
    ("FastAPI", Framework),
    ("Spring Boot", Framework),
    ("Spring", Framework),
    (".NET", Framework),
    ("ASP.NET", Framework),
    ("Laravel", Framework),
    ("Symfony", Framework),
    ("Rails", Framework),
    ("Phoenix", Framework),
    ("Redux", Framework),
    ("MobX", Framework),
    ("Zustand", Framework),
    ("Recoil", Framework),
    ("Jotai", Framework),
    ("Vuex", Framework),
    ("Pinia", Framework),
    ("GraphQL", Framework),
    ("PostgreSQL", Database),
    ("MySQL", Database),
    ("MongoDB", Database),
    ("Redis", Database),
    ("Elasticsearch", Database),
    ("SQLite", Database),
    ("DynamoDB", Database),
    ("Cassandra", Database),
    ("Neo4j", Database),
    ("InfluxDB", Database),
    ("CouchDB", Database),
    ("Docker", DevOps),
    ("Kubernetes", DevOps),
    ("Terraform", DevOps),
    ("Ansible", DevOps),
    ("Jenkins", DevOps),
    ("GitLab CI", DevOps),
    ("GitHub Actions", DevOps),
    ("CircleCI", DevOps),
    ("Travis CI", DevOps),
    ("AWS", Cloud),
    ("Azure", Cloud),
    ("GCP", Cloud),
    ("Google Cloud", Cloud),
    ("Lambda", Cloud),
    ("Serverless", Cloud),
    ("Jest", Testing),
    ("Mocha", Testing),
    ("Chai", Testing),
    ("Cypress", Testing),
    ("Playwright", Testing),
    ("Selenium", Testing),
    ("Puppeteer", Testing),
    ("Enzyme", Testing),
    ("Testing Library", Testing),
    ("Vitest", Testing),
    ("Git", Tool),
    ("GitHub", Tool),
    ("GitLab", Tool),
    ("Bitbucket", Tool),
    ("Jira", Tool),
    ("Confluence", Tool),
    ("Figma", Tool),
    ("Sketch", Tool),
    ("Adobe XD", Tool),
    ("Webpack", Tool),
    ("Vite", Tool),
    ("Parcel", Tool),
    ("Rollup", Tool),
    ("Babel", Tool),
    ("ESLint", Tool),
    ("Prettier", Tool),
    ("REST", Other),
    ("API", Other),
    ("Microservices", Other),
];

/// Names that are also ordinary English words only match with their exact casing.
const CASE_SENSITIVE: &[&str] = &[
    "Go", "REST", "API", "Less", "Spring", "Express", "Rails", "Phoenix", "Lambda", "Chai",
    "Parcel", "Vite", "Sketch", "Ruby",
];

const DEFAULT_ROLE_TITLE: &str = "Software Developer";
const MAX_ROLE_TITLE_CHARS: usize = 80;

struct Matcher {
    name: &'static str,
    category: Category,
    pattern: Regex,
}

fn matchers() -> &'static [Matcher] {
    static MATCHERS: OnceLock<Vec<Matcher>> = OnceLock::new();
    MATCHERS.get_or_init(|| {
        CATALOG
            .iter()
            .map(|&(name, category)| Matcher {
                name,
                category,
                // `\b` does not work around names such as "C#" or ".NET".
                pattern: RegexBuilder::new(&format!(
                    r"(?:^|[^\w.])({})(?:[^\w#]|$)",
                    regex::escape(name)
                ))
                .case_insensitive(!CASE_SENSITIVE.contains(&name))
                .build()
                .expect("catalog pattern is valid"),
            })
            .collect()
    })
}

/// Builds a tech-stack profile from free text. Technologies are listed in
/// order of first appearance within each category.
pub fn extract_from_text(text: &str) -> ExtractedTechStack {
    let mut found: Vec<(usize, &Matcher)> = matchers()
        .iter()
        .filter_map(|m| {
            m.pattern
                .captures(text)
                .and_then(|c| c.get(1))
                .map(|hit| (hit.start(), m))
        })
        .collect();
    found.sort_by_key(|(position, _)| *position);

    let mut tech_stack = TechStackCategories::default();
    for (_, matcher) in found {
        let bucket = match matcher.category {
            Language => &mut tech_stack.languages,
            Framework => &mut tech_stack.frameworks,
            Database => &mut tech_stack.databases,
            DevOps => &mut tech_stack.devops,
            Cloud => &mut tech_stack.cloud,
            Testing => &mut tech_stack.testing,
            Tool => &mut tech_stack.tools,
            Other => &mut tech_stack.other,
        };
        bucket.push(matcher.name.to_string());
    }

    ExtractedTechStack {
        role_title: Some(role_title(text)),
        seniority: Some(seniority(text)),
        tech_stack,
        assumptions: vec!["Derived from keyword matching; the model reply had no JSON".to_string()],
    }
}

pub fn role_title(text: &str) -> String {
    static PATTERNS: OnceLock<Vec<Regex>> = OnceLock::new();
    let patterns = PATTERNS.get_or_init(|| {
        ["role", "position", "title", "job"]
            .iter()
            .map(|keyword| {
                Regex::new(&format!(r"(?i)\b{keyword}\b[:\s]+([^.\n]+)"))
                    .expect("static pattern is valid")
            })
            .collect()
    });

    patterns
        .iter()
        .find_map(|p| p.captures(text).and_then(|c| c.get(1)))
        .map(|m| m.as_str().trim())
        .filter(|title| !title.is_empty())
        .map(|title| title.chars().take(MAX_ROLE_TITLE_CHARS).collect::<String>())
        .unwrap_or_else(|| DEFAULT_ROLE_TITLE.to_string())
}

pub fn seniority(text: &str) -> Seniority {
    static SENIOR: OnceLock<Regex> = OnceLock::new();
    static JUNIOR: OnceLock<Regex> = OnceLock::new();
    let senior = SENIOR.get_or_init(|| {
        Regex::new(r"(?i)\b(?:senior|lead|principal|staff)\b").expect("static pattern is valid")
    });
    let junior = JUNIOR.get_or_init(|| {
        Regex::new(r"(?i)\b(?:junior|entry|graduate)\b").expect("static pattern is valid")
    });

    if senior.is_match(text) {
        Seniority::Senior
    } else if junior.is_match(text) {
        Seniority::Junior
    } else {
        Seniority::Mid
    }
}
