//! Extraction catalog: header keyword lists and the technical-skill catalog.
//!
//! These are data, not logic. `ExtractionCatalog::default()` carries the built-in
//! lists; a JSON file with the same shape can replace any of them at startup.

use std::path::Path;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

const RESPONSIBILITIES_HEADERS: &[&str] = &[
    "Duties",
    "Responsibilities",
    "Key Responsibilities",
    "Position Overview",
    "What You Will Do",
];

const QUALIFICATIONS_HEADERS: &[&str] = &[
    "Requirements",
    "Qualifications",
    "Skills",
    "Required Skills",
    "Experience",
    "Who You Are",
    "What You Bring",
    "What You Have",
    "What We Are looking for",
    "What You'll be Up to",
    "What You",
    "Responsible for",
    "To be successful in",
];

const PREFERRED_HEADERS: &[&str] = &[
    "Preferred Qualifications",
    "Preferred Skills",
    "Nice to Have",
    "About You",
];

const TECHNICAL_SKILLS: &[&str] = &[
    // Frontend
    "React", "Vue", "Angular", "JavaScript", "TypeScript", "HTML", "CSS", "SASS", "SCSS",
    "jQuery", "Redux", "Next.js", "Webpack", "Babel", "Bootstrap", "Tailwind", "Material UI",
    "WebGL", "Three.js", "D3.js",
    // Backend
    "Python", "Java", "C#", ".NET", "Node.js", "Express", "Django", "Flask", "Spring Boot",
    "FastAPI", "Ruby", "Rails", "PHP", "Laravel", "Go", "Golang", "Rust", "Kotlin", "Swift",
    "C++", "Scala",
    // Database
    "SQL", "MySQL", "PostgreSQL", "MongoDB", "Redis", "Oracle", "DynamoDB", "Cassandra",
    "ElasticSearch", "GraphQL", "Firebase", "NoSQL", "Neo4j", "MariaDB", "SQLite", "Prisma",
    "Sequelize",
    // Cloud & DevOps
    "AWS", "Azure", "GCP", "Docker", "Kubernetes", "Jenkins", "GitLab CI", "GitHub Actions",
    "Terraform", "Ansible", "ECS", "Lambda", "S3", "EC2", "Serverless", "CloudFormation",
    "Pulumi", "CircleCI", "Travis CI", "ArgoCD", "Helm", "Prometheus", "Grafana", "EKS", "GKE",
    "AKS",
    // Testing
    "Jest", "Mocha", "Selenium", "Cypress", "JUnit", "PyTest", "TestNG", "Playwright",
    "WebdriverIO", "Postman", "Newman", "Artillery", "K6", "LoadRunner",
    // Tools & version control
    "Git", "GitHub", "BitBucket", "JIRA", "Confluence", "Swagger", "OpenAPI", "Maven", "Gradle",
    // Architecture & patterns
    "Microservices", "REST API", "gRPC", "WebSocket", "OAuth", "JWT", "MVC", "CQRS",
    "Event Sourcing", "Domain Driven Design", "TDD", "BDD", "Agile", "Scrum", "Kanban",
    // AI & ML
    "Machine Learning", "TensorFlow", "PyTorch", "NLP", "Computer Vision", "Deep Learning", "ML",
    "AI", "Scikit-learn", "Pandas", "NumPy", "OpenCV", "CUDA", "Keras", "Hugging Face",
    // Mobile
    "iOS", "Android", "React Native", "Flutter", "SwiftUI", "Xamarin", "Ionic",
    // Systems & infrastructure
    "Linux", "Unix", "Bash", "Shell Scripting", "Kafka", "RabbitMQ", "Nginx", "Apache",
    "Distributed Systems", "Cloud", "Backend", "Full Stack", "DevOps", "SRE", "CI/CD",
    // Security
    "OAuth2", "SAML", "Cybersecurity", "Encryption", "SSL/TLS", "IAM", "WAF",
    "Penetration Testing",
    // Emerging tech
    "Blockchain", "Web3", "Smart Contracts", "Solidity", "Ethereum", "NFT", "DeFi", "AR/VR",
    "WebXR", "Unity", "Unreal Engine",
];

/// Header keywords and skill names used by the segmenter and skill extractor.
///
/// Every list is optional in the JSON form; omitted lists fall back to the built-in defaults.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExtractionCatalog {
    pub responsibilities_headers: Vec<String>,
    pub qualifications_headers: Vec<String>,
    pub preferred_headers: Vec<String>,
    pub technical_skills: Vec<String>,
}

impl Default for ExtractionCatalog {
    fn default() -> Self {
        Self {
            responsibilities_headers: to_owned(RESPONSIBILITIES_HEADERS),
            qualifications_headers: to_owned(QUALIFICATIONS_HEADERS),
            preferred_headers: to_owned(PREFERRED_HEADERS),
            technical_skills: to_owned(TECHNICAL_SKILLS),
        }
    }
}

impl ExtractionCatalog {
    /// Loads a catalog from a JSON file.
    pub fn from_json_file(path: &Path) -> Result<Self> {
        let raw = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read catalog file '{}'", path.display()))?;
        serde_json::from_str(&raw)
            .with_context(|| format!("Catalog file '{}' is not valid JSON", path.display()))
    }

    /// All header keywords, lower-cased, in responsibilities → qualifications → preferred order.
    pub fn header_keywords(&self) -> Vec<String> {
        self.responsibilities_headers
            .iter()
            .chain(&self.qualifications_headers)
            .chain(&self.preferred_headers)
            .map(|h| h.to_lowercase())
            .collect()
    }
}

fn to_owned(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| s.to_string()).collect()
}
