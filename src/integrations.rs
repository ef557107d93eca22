use std::collections::BTreeMap;

use crate::types::IntegrationResponse;

/// The downstream systems this demo pretends to talk to. A closed set so an
/// unknown name is caught at the lookup boundary, not deep in a handler.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IntegrationSystem {
    Jira,
    Slack,
    Confluence,
    Metabase,
    Salesforce,
    Zendesk,
}

pub const ALL: [IntegrationSystem; 6] = [
    IntegrationSystem::Jira,
    IntegrationSystem::Slack,
    IntegrationSystem::Confluence,
    IntegrationSystem::Metabase,
    IntegrationSystem::Salesforce,
    IntegrationSystem::Zendesk,
];

impl IntegrationSystem {
    /// Case-insensitive lookup by system name.
    pub fn from_name(name: &str) -> Option<Self> {
        match name.to_ascii_lowercase().as_str() {
            "jira" => Some(Self::Jira),
            "slack" => Some(Self::Slack),
            "confluence" => Some(Self::Confluence),
            "metabase" => Some(Self::Metabase),
            "salesforce" => Some(Self::Salesforce),
            "zendesk" => Some(Self::Zendesk),
            _ => None,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Self::Jira => "Jira",
            Self::Slack => "Slack",
            Self::Confluence => "Confluence",
            Self::Metabase => "Metabase",
            Self::Salesforce => "Salesforce",
            Self::Zendesk => "Zendesk",
        }
    }

    /// The canned response served for this system. Static data, same output
    /// on every call.
    pub fn mock_response(self) -> IntegrationResponse {
        let (summary, sample_payload) = match self {
            Self::Jira => (
                "Mocks Jira issue search with deterministic demo payloads.",
                payload(&[
                    ("query", "project = OPS AND text ~ 'ingestion failure'"),
                    ("issues", "2"),
                    ("link", "https://jira.example.com/browse/OPS-123"),
                ]),
            ),
            Self::Slack => (
                "Simulated slash command response for #support channel.",
                payload(&[
                    ("command", "/ops-assist"),
                    ("response", "Found 3 relevant docs and 1 active incident."),
                ]),
            ),
            Self::Confluence => (
                "Returns static page metadata mimicking Confluence search.",
                payload(&[
                    ("space", "Platform Ops"),
                    ("page", "Incident Response Playbook"),
                    ("url", "https://confluence.example.com/x/abcd"),
                ]),
            ),
            Self::Metabase => (
                "Demo analytics card for ingestion pipeline KPIs.",
                payload(&[
                    ("dashboard", "Ingestion Health"),
                    ("metric", "Crawl success rate"),
                    ("value", "98%"),
                ]),
            ),
            Self::Salesforce => (
                "Replicates sales insight card for customer onboarding.",
                payload(&[
                    ("account", "Acme Data Co"),
                    ("stage", "Negotiation"),
                    ("next_step", "Review onboarding tiers"),
                ]),
            ),
            Self::Zendesk => (
                "Ticket enrichment output for support automation flow.",
                payload(&[
                    ("ticket_id", "#34567"),
                    ("sentiment", "frustrated"),
                    ("recommendation", "Escalate to Tier 2"),
                ]),
            ),
        };

        IntegrationResponse {
            system: self.name().to_string(),
            status: "placeholder".to_string(),
            summary: summary.to_string(),
            sample_payload,
        }
    }
}

fn payload(pairs: &[(&str, &str)]) -> BTreeMap<String, String> {
    pairs
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect()
}
