use std::fmt;

use serde::Serialize;

use crate::config::ProcessorConfig;

/// Document classes a record can be routed as.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum DocumentType {
    Invoice,
    #[serde(rename = "Company Data")]
    CompanyData,
    Unclassified,
}

impl fmt::Display for DocumentType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DocumentType::Invoice => f.write_str("Invoice"),
            DocumentType::CompanyData => f.write_str("Company Data"),
            DocumentType::Unclassified => f.write_str("Unclassified"),
        }
    }
}

/// A keyword rule: if the folded document text contains `keyword`, the
/// document is `document_type` and routes to `destination`.
#[derive(Debug, Clone)]
pub struct Rule {
    pub id: String,
    pub keyword: String,
    pub priority: i32,
    pub document_type: DocumentType,
    pub destination: String,
}

#[derive(Debug, Clone)]
pub struct Categorization {
    /// The matched rule, or `None` when the fallback applied.
    pub rule_id: Option<String>,
    pub document_type: DocumentType,
    pub destination: String,
}

pub struct Categorizer {
    rules: Vec<Rule>,
    fallback_destination: String,
}

impl Categorizer {
    pub fn new(mut rules: Vec<Rule>, fallback_destination: String) -> Self {
        // Sort rules by priority (descending); matching is case-insensitive,
        // so fold keywords once up front.
        rules.sort_by(|a, b| b.priority.cmp(&a.priority));
        for rule in &mut rules {
            rule.keyword = rule.keyword.to_lowercase();
        }

        Self {
            rules,
            fallback_destination,
        }
    }

    /// The standard routing rules: invoices beat company data, and anything
    /// unmatched falls back to the invoice destination as `Unclassified`.
    pub fn standard(config: &ProcessorConfig) -> Self {
        Self::new(
            vec![
                Rule {
                    id: "invoice".to_string(),
                    keyword: "invoice".to_string(),
                    priority: 100,
                    document_type: DocumentType::Invoice,
                    destination: config.invoice_bucket.clone(),
                },
                Rule {
                    id: "company-data".to_string(),
                    keyword: "betterme".to_string(),
                    priority: 50,
                    document_type: DocumentType::CompanyData,
                    destination: config.company_data_bucket.clone(),
                },
            ],
            config.invoice_bucket.clone(),
        )
    }

    /// Assign a document type from the first (highest-priority) matching
    /// rule. Deterministic and mutually exclusive: rule order decides when
    /// several keywords are present.
    pub fn categorize(&self, text: &str) -> Categorization {
        let folded = text.to_lowercase();

        for rule in &self.rules {
            if folded.contains(&rule.keyword) {
                return Categorization {
                    rule_id: Some(rule.id.clone()),
                    document_type: rule.document_type,
                    destination: rule.destination.clone(),
                };
            }
        }

        Categorization {
            rule_id: None,
            document_type: DocumentType::Unclassified,
            destination: self.fallback_destination.clone(),
        }
    }
}
