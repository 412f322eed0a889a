use serde::{Deserialize, Serialize};

/// One generated lesson activity, as returned by the generation service.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ActivityContent {
    /// activity title, also used to name the exported file
    pub title: String,

    pub subject: String,

    pub semester: String,

    /// learning objective
    pub objective: String,

    /// materials the teacher should prepare
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tools_needed: Option<Vec<String>>,

    /// classroom procedure, in order
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub steps: Option<Vec<String>>,

    pub interactive_activities: Vec<InteractiveActivity>,

    pub competitive_game: CompetitiveGame,

    /// described (never hyperlinked) digital tools
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub electronic_links: Option<Vec<ElectronicLink>>,

    pub conclusion: String,
}

impl ActivityContent {
    /// Tools to list, empty when the field was absent.
    pub fn tools(&self) -> &[String] {
        self.tools_needed.as_deref().unwrap_or_default()
    }

    pub fn procedure(&self) -> &[String] {
        self.steps.as_deref().unwrap_or_default()
    }

    pub fn links(&self) -> &[ElectronicLink] {
        self.electronic_links.as_deref().unwrap_or_default()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InteractiveActivity {
    #[serde(rename = "type")]
    pub activity_type: ActivityType,
    pub title: String,
    pub description: String,
    pub instructions: Vec<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ActivityType {
    Practical,
    Group,
    Electronic,
    Competitive,
}

impl ActivityType {
    pub const ALL: [ActivityType; 4] = [
        ActivityType::Practical,
        ActivityType::Group,
        ActivityType::Electronic,
        ActivityType::Competitive,
    ];

    /// Wire value used in the response schema.
    pub fn as_str(&self) -> &'static str {
        match self {
            ActivityType::Practical => "practical",
            ActivityType::Group => "group",
            ActivityType::Electronic => "electronic",
            ActivityType::Competitive => "competitive",
        }
    }

    /// Tag shown on rendered activity cards.
    pub fn label(&self) -> &'static str {
        match self {
            ActivityType::Practical => "عملي",
            ActivityType::Group => "جماعي",
            ActivityType::Electronic => "إلكتروني",
            ActivityType::Competitive => "تنافسي",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CompetitiveGame {
    pub name: String,
    /// e.g. Kahoot, classroom competition, card sort
    pub suggested_format: String,
    pub rules: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ElectronicLink {
    pub platform: String,
    pub description: String,
    pub tool_type: ToolType,
    /// how the tool serves the activity objective
    pub link_to_objective: String,
}

// The service is asked for the Arabic values; the English glosses are
// accepted as well since they name the same categories.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ToolType {
    #[serde(rename = "لعبة تعليمية", alias = "educational game")]
    EducationalGame,
    #[serde(rename = "محاكاة تفاعلية", alias = "interactive simulation")]
    InteractiveSimulation,
    #[serde(rename = "اختبار قصير", alias = "short quiz")]
    ShortQuiz,
    #[serde(rename = "أداة عرض", alias = "presentation tool")]
    PresentationTool,
}

impl ToolType {
    pub const ALL: [ToolType; 4] = [
        ToolType::EducationalGame,
        ToolType::InteractiveSimulation,
        ToolType::ShortQuiz,
        ToolType::PresentationTool,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            ToolType::EducationalGame => "لعبة تعليمية",
            ToolType::InteractiveSimulation => "محاكاة تفاعلية",
            ToolType::ShortQuiz => "اختبار قصير",
            ToolType::PresentationTool => "أداة عرض",
        }
    }
}
