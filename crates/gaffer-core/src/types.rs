//! Contract types shared between the chat engine and the API surface.
//!
//! The feature registry is read-only after construction and is safely
//! shared across concurrent requests; per-request values carry no
//! identity and live only for the duration of a single chat turn.

use serde::{Deserialize, Serialize};

/// Ambient authenticated-session context for a chat turn.
///
/// Supplied by the session store at the API boundary; the chat engine
/// treats it as read-only.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionContext {
    /// FPL entry (team) id of the authenticated manager.
    pub team_id: u32,
    /// Classic league the manager follows.
    pub league_id: u32,
    /// Gameweek currently in play.
    pub current_gameweek: u8,
}

/// Permitted values for a feature parameter, with a declared default.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParamSpec {
    /// Parameter name bound into the dispatch call (e.g. "sort_by").
    pub name: String,
    /// Option tokens recognised in free text (e.g. "form", "points").
    pub options: Vec<String>,
    /// Value used when no option token appears in the query.
    pub default: String,
}

/// A deterministic analytics feature exposed to the chat engine.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FeatureDescriptor {
    /// Stable feature identifier (e.g. "current-captain").
    pub id: String,
    /// Human label shown in acknowledgements and quick prompts.
    pub label: String,
    /// Canonical trigger phrases matched case/whitespace-insensitively.
    pub triggers: Vec<String>,
    /// Keyword set scored against the query token set.
    pub keywords: Vec<String>,
    /// Optional parameter schema.
    pub param: Option<ParamSpec>,
}

impl FeatureDescriptor {
    /// Build a descriptor with no parameter schema.
    pub fn new(
        id: impl Into<String>,
        label: impl Into<String>,
        triggers: &[&str],
        keywords: &[&str],
    ) -> Self {
        Self {
            id: id.into(),
            label: label.into(),
            triggers: triggers.iter().map(|s| s.to_string()).collect(),
            keywords: keywords.iter().map(|s| s.to_string()).collect(),
            param: None,
        }
    }

    /// Attach a parameter schema.
    pub fn with_param(mut self, param: ParamSpec) -> Self {
        self.param = Some(param);
        self
    }
}

/// Ordered, read-only collection of feature descriptors.
///
/// Declaration order is significant: the intent matcher breaks score ties
/// in favour of the earliest-declared descriptor.
#[derive(Debug, Clone, Default)]
pub struct FeatureRegistry {
    descriptors: Vec<FeatureDescriptor>,
}

impl FeatureRegistry {
    /// Build a registry from descriptors in declaration order.
    pub fn new(descriptors: Vec<FeatureDescriptor>) -> Self {
        Self { descriptors }
    }

    /// Look up a descriptor by id.
    pub fn get(&self, id: &str) -> Option<&FeatureDescriptor> {
        self.descriptors.iter().find(|d| d.id == id)
    }

    /// Iterate descriptors in declaration order.
    pub fn iter(&self) -> impl Iterator<Item = &FeatureDescriptor> {
        self.descriptors.iter()
    }

    pub fn len(&self) -> usize {
        self.descriptors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.descriptors.is_empty()
    }

    /// The registry shipped with the application: every analytics feature
    /// the dashboard exposes, with its quick-prompt trigger phrases.
    pub fn standard() -> Self {
        let sort_param = ParamSpec {
            name: "sort_by".to_string(),
            options: vec![
                "ownership".to_string(),
                "form".to_string(),
                "points".to_string(),
            ],
            default: "ownership".to_string(),
        };

        Self::new(vec![
            FeatureDescriptor::new(
                "my-team-summary",
                "My Team Summary",
                &["show my team", "display my squad", "what is my lineup"],
                &["team", "squad", "lineup"],
            ),
            FeatureDescriptor::new(
                "ai-team-performance",
                "Squad Projection",
                &[
                    "how will my team perform next week",
                    "predict my squad score",
                    "forecast my team points",
                ],
                &["predict", "squad", "score"],
            ),
            FeatureDescriptor::new(
                "smart-captaincy",
                "Smart Captaincy",
                &["who should i captain", "captain suggestion", "best captain pick"],
                &["captain", "should"],
            ),
            FeatureDescriptor::new(
                "current-captain",
                "Current Captain",
                &["who is my captain", "current captain", "who is my captain right now"],
                &["captain", "current"],
            ),
            FeatureDescriptor::new(
                "chip-advice",
                "Chip Advice",
                &["when should i use my chips", "chip strategy", "wildcard advice"],
                &["chips", "bench", "boost"],
            ),
            FeatureDescriptor::new(
                "transfer-suggester",
                "Transfer Suggester",
                &["recommend a transfer", "who should i sell", "transfer advice"],
                &["transfer", "sell"],
            ),
            FeatureDescriptor::new(
                "injury-risk",
                "Injury/Risk Analyzer",
                &["any injury risks", "who is flagged", "players with injury"],
                &["injury", "flagged", "risk"],
            ),
            FeatureDescriptor::new(
                "ai-predictions",
                "AI Predictions",
                &["ai top performers", "who will score the most", "best players next week"],
                &["ai", "performers"],
            ),
            FeatureDescriptor::new(
                "league-head-to-head",
                "League Head-to-Head",
                &["head to head", "versus in my league"],
                &["beat", "versus", "league"],
            ),
            FeatureDescriptor::new(
                "league-current",
                "Current Standings",
                &["current league standings", "show table now", "league position right now"],
                &["league", "standings", "table"],
            ),
            FeatureDescriptor::new(
                "league-predictions",
                "League Predictions",
                &["predict my league", "league standings forecast"],
                &["league", "forecast"],
            ),
            FeatureDescriptor::new(
                "differential-hunter",
                "Differential Hunter",
                &["show me differentials", "low owned players"],
                &["differentials", "owned"],
            )
            .with_param(sort_param),
            FeatureDescriptor::new(
                "predicted-top-performers",
                "Top Performers",
                &["predict top performers", "top scorers next week"],
                &["top", "scorers"],
            ),
            FeatureDescriptor::new(
                "dream-team",
                "Dream Team Optimizer",
                &["build dream team", "wildcard squad"],
                &["dream", "team"],
            ),
            FeatureDescriptor::new(
                "quadrant-analysis",
                "Quadrant Analysis",
                &["form vs fixture", "quadrant analysis"],
                &["quadrant", "fixture"],
            ),
        ])
    }
}

/// Structured payload attached to a resolved feature.
///
/// A closed set of shapes so that the composer and the external analytics
/// functions share an explicit, exhaustively-matched contract.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum FeaturePayload {
    /// Tabular data rendered by the dashboard as a sortable table.
    Table {
        columns: Vec<String>,
        rows: Vec<Vec<String>>,
    },
    /// A squad rendered on the pitch diagram.
    Team {
        starters: Vec<TeamSlot>,
        bench: Vec<TeamSlot>,
    },
    /// Preformatted text rendered verbatim.
    Text { text: String },
}

/// One player slot in a `Team` payload.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TeamSlot {
    pub name: String,
    pub position: String,
    pub predicted_points: f64,
    pub is_captain: bool,
}

/// A quick-prompt chip offered to the user after each turn.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Suggestion {
    pub id: String,
    pub label: String,
    /// Prompt text inserted into the input box when the chip is tapped.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub prompt: Option<String>,
    /// Parameter options the chip can cycle through.
    #[serde(skip_serializing_if = "Vec::is_empty", default)]
    pub options: Vec<String>,
}
