//! Data structures describing the report payload produced by the analysis
//! service.
//!
//! The types in this module form a serialization-friendly model of the
//! structured result the external AI-analysis endpoint returns for the
//! lifestyle planner and technology checklist tools.  They intentionally
//! avoid referencing the rendering crate so the values can be deserialized at
//! the service boundary, validated, and handed to the builder without pulling
//! in layout concerns.

use serde::{Deserialize, Serialize};

use crate::error::ReportError;

/// Priority tier assigned to a checklist item.
///
/// The derived ordering matches the tier order required in the rendered
/// document (`Essential` before `Important` before `NiceToHave`), so a stable
/// sort by priority yields the output ordering directly.
#[derive(
    Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(rename_all = "kebab-case")]
pub enum Priority {
    /// Items the buyer should not skip.
    Essential,
    /// Items that matter but will not block a purchase.
    #[default]
    Important,
    /// Comfort upgrades worth asking about.
    NiceToHave,
}

impl Priority {
    /// Returns the human-readable tag printed on checklist cards.
    pub fn label(self) -> &'static str {
        match self {
            Self::Essential => "Essential",
            Self::Important => "Important",
            Self::NiceToHave => "Nice to Have",
        }
    }
}

/// One item of the technology checklist: a titled entry in a category with a
/// priority tier and the questions the buyer should ask about it.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct ChecklistItem {
    category: String,
    item: String,
    #[serde(default)]
    priority: Priority,
    #[serde(default)]
    questions: Vec<String>,
}

impl ChecklistItem {
    /// Creates a checklist item with the default priority and no questions.
    pub fn new(category: impl Into<String>, item: impl Into<String>) -> Self {
        Self {
            category: category.into(),
            item: item.into(),
            ..Self::default()
        }
    }

    /// Returns the category heading the item belongs to.
    pub fn category(&self) -> &str {
        &self.category
    }

    /// Returns the item title.
    pub fn item(&self) -> &str {
        &self.item
    }

    /// Returns the priority tier.
    pub fn priority(&self) -> Priority {
        self.priority
    }

    /// Returns the buyer questions attached to the item.
    pub fn questions(&self) -> &[String] {
        &self.questions
    }

    /// Sets the priority tier and returns the updated item.
    pub fn with_priority(mut self, priority: Priority) -> Self {
        self.priority = priority;
        self
    }

    /// Appends a question and returns the updated item.
    pub fn with_question(mut self, question: impl Into<String>) -> Self {
        self.questions.push(question.into());
        self
    }

    /// Extends the item with multiple questions and returns the updated item.
    pub fn with_questions<I, S>(mut self, questions: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.questions.extend(questions.into_iter().map(Into::into));
        self
    }
}

/// The full structured result handed to the builder.
///
/// The serde mapping mirrors the camelCase JSON shape the analysis service
/// emits (`budgetConsiderations`, `checklistItems`, `dealerQuestions`).  List
/// fields default to empty when absent; the narrative fields are required and
/// checked by [`ReportInput::validate`].
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReportInput {
    summary: String,
    budget_considerations: String,
    #[serde(default)]
    checklist_items: Vec<ChecklistItem>,
    #[serde(default)]
    dealer_questions: Vec<String>,
}

impl ReportInput {
    /// Creates a report input with the given narrative fields and empty lists.
    pub fn new(summary: impl Into<String>, budget_considerations: impl Into<String>) -> Self {
        Self {
            summary: summary.into(),
            budget_considerations: budget_considerations.into(),
            ..Self::default()
        }
    }

    /// Deserializes a report input from the service's JSON payload.
    pub fn from_json(payload: &str) -> Result<Self, ReportError> {
        Ok(serde_json::from_str(payload)?)
    }

    /// Returns the free-form executive summary narrative.
    pub fn summary(&self) -> &str {
        &self.summary
    }

    /// Returns the budget considerations narrative.
    pub fn budget_considerations(&self) -> &str {
        &self.budget_considerations
    }

    /// Returns the checklist items in input order.
    pub fn checklist_items(&self) -> &[ChecklistItem] {
        &self.checklist_items
    }

    /// Returns the dealer questions in input order.
    pub fn dealer_questions(&self) -> &[String] {
        &self.dealer_questions
    }

    /// Appends a checklist item and returns the updated input.
    pub fn with_checklist_item(mut self, item: ChecklistItem) -> Self {
        self.checklist_items.push(item);
        self
    }

    /// Extends the checklist and returns the updated input.
    pub fn with_checklist_items<I>(mut self, items: I) -> Self
    where
        I: IntoIterator<Item = ChecklistItem>,
    {
        self.checklist_items.extend(items);
        self
    }

    /// Appends a dealer question and returns the updated input.
    pub fn with_dealer_question(mut self, question: impl Into<String>) -> Self {
        self.dealer_questions.push(question.into());
        self
    }

    /// Extends the dealer questions and returns the updated input.
    pub fn with_dealer_questions<I, S>(mut self, questions: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.dealer_questions
            .extend(questions.into_iter().map(Into::into));
        self
    }

    /// Checks that the required narrative fields are present.
    ///
    /// The lists may be empty; an empty checklist still produces a valid
    /// document with cover, summary, and budget sections.
    pub fn validate(&self) -> Result<(), ReportError> {
        if self.summary.trim().is_empty() {
            return Err(ReportError::MalformedInput(
                "the summary field must not be empty".into(),
            ));
        }
        if self.budget_considerations.trim().is_empty() {
            return Err(ReportError::MalformedInput(
                "the budgetConsiderations field must not be empty".into(),
            ));
        }
        Ok(())
    }

    /// Returns the checklist items ordered by priority tier.
    ///
    /// The sort is stable, so items keep their input order within a tier.
    pub fn sorted_checklist(&self) -> Vec<&ChecklistItem> {
        let mut items: Vec<&ChecklistItem> = self.checklist_items.iter().collect();
        items.sort_by_key(|item| item.priority());
        items
    }
}

#[cfg(test)]
mod tests {
    use super::{ChecklistItem, Priority, ReportInput};

    fn sample_input() -> ReportInput {
        ReportInput::new("A summary.", "A budget note.")
    }

    #[test]
    fn parses_camel_case_payload() {
        let payload = r#"{
            "summary": "Travel light.",
            "budgetConsiderations": "Plan for maintenance.",
            "checklistItems": [
                {
                    "category": "Power",
                    "item": "Solar setup",
                    "priority": "nice-to-have",
                    "questions": ["What is the panel wattage?"]
                }
            ],
            "dealerQuestions": ["Is the warranty transferable?"]
        }"#;

        let input = ReportInput::from_json(payload).expect("payload parses");
        assert_eq!(input.summary(), "Travel light.");
        assert_eq!(input.checklist_items().len(), 1);
        assert_eq!(input.checklist_items()[0].priority(), Priority::NiceToHave);
        assert_eq!(input.dealer_questions().len(), 1);
    }

    #[test]
    fn list_fields_default_to_empty() {
        let payload = r#"{"summary": "S.", "budgetConsiderations": "B."}"#;
        let input = ReportInput::from_json(payload).expect("payload parses");
        assert!(input.checklist_items().is_empty());
        assert!(input.dealer_questions().is_empty());
        assert!(input.validate().is_ok());
    }

    #[test]
    fn blank_summary_is_rejected() {
        let input = ReportInput::new("   ", "Budget.");
        assert!(input.validate().is_err());
    }

    #[test]
    fn blank_budget_is_rejected() {
        let input = ReportInput::new("Summary.", "\n\t");
        assert!(input.validate().is_err());
    }

    #[test]
    fn sorted_checklist_orders_by_tier_and_keeps_input_order_within_tier() {
        let input = sample_input().with_checklist_items([
            ChecklistItem::new("Comfort", "A").with_priority(Priority::NiceToHave),
            ChecklistItem::new("Safety", "B").with_priority(Priority::Essential),
            ChecklistItem::new("Power", "C").with_priority(Priority::Important),
            ChecklistItem::new("Safety", "D").with_priority(Priority::Essential),
        ]);

        let titles: Vec<&str> = input
            .sorted_checklist()
            .into_iter()
            .map(|item| item.item())
            .collect();
        assert_eq!(titles, ["B", "D", "C", "A"]);
    }

    #[test]
    fn priority_serde_uses_kebab_case() {
        let json = serde_json::to_string(&Priority::NiceToHave).expect("serializes");
        assert_eq!(json, "\"nice-to-have\"");
        let parsed: Priority = serde_json::from_str("\"essential\"").expect("parses");
        assert_eq!(parsed, Priority::Essential);
    }
}
