//! Agenda templates keyed on the meeting topic.

use serde::{Deserialize, Serialize};

use crate::model::Dataset;

const PLANNING_ITEMS: [&str; 5] = [
    "Review current status and progress",
    "Identify key objectives and goals",
    "Discuss timeline and milestones",
    "Assign responsibilities and next steps",
    "Risk assessment and mitigation strategies",
];

const REVIEW_ITEMS: [&str; 5] = [
    "Present findings and results",
    "Discuss feedback and improvements",
    "Review metrics and KPIs",
    "Action items and follow-up tasks",
    "Next steps and recommendations",
];

const SYNC_ITEMS: [&str; 5] = [
    "Team updates and progress reports",
    "Blockers and challenges discussion",
    "Upcoming priorities and deadlines",
    "Resource needs and support requests",
    "Team coordination and collaboration",
];

const GENERAL_ITEMS: [&str; 5] = [
    "Meeting objectives and goals",
    "Key discussion points",
    "Decision points and outcomes",
    "Action items and assignments",
    "Next steps and follow-up",
];

const HISTORY_ITEMS: [&str; 2] = [
    "Historical context from previous meetings",
    "Lessons learned and best practices",
];

/// Template family chosen from the topic text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AgendaTemplate {
    Planning,
    Review,
    Sync,
    General,
}

impl AgendaTemplate {
    /// First matching keyword wins: planning, review, sync.
    pub fn for_topic(topic: &str) -> Self {
        let topic = topic.to_lowercase();
        if topic.contains("planning") {
            Self::Planning
        } else if topic.contains("review") {
            Self::Review
        } else if topic.contains("sync") {
            Self::Sync
        } else {
            Self::General
        }
    }

    pub fn items(self) -> &'static [&'static str] {
        match self {
            Self::Planning => &PLANNING_ITEMS,
            Self::Review => &REVIEW_ITEMS,
            Self::Sync => &SYNC_ITEMS,
            Self::General => &GENERAL_ITEMS,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AgendaSuggestions {
    pub template: AgendaTemplate,
    pub agenda_suggestions: Vec<String>,
    /// Participant meetings whose title mentions the topic. Shared meetings count once per participant.
    pub based_on_history: usize,
}

/// Suggest agenda items for `topic` given the participants' past meetings.
pub fn suggest_agenda(dataset: &Dataset, topic: &str, participants: &[String]) -> AgendaSuggestions {
    let template = AgendaTemplate::for_topic(topic);
    let needle = topic.to_lowercase();

    let based_on_history = participants
        .iter()
        .flat_map(|p| dataset.meetings_for_participant(p))
        .filter(|m| m.title.to_lowercase().contains(&needle))
        .count();

    let mut agenda_suggestions: Vec<String> =
        template.items().iter().map(|s| s.to_string()).collect();
    if based_on_history > 0 {
        agenda_suggestions.extend(HISTORY_ITEMS.iter().map(|s| s.to_string()));
    }

    AgendaSuggestions {
        template,
        agenda_suggestions,
        based_on_history,
    }
}
