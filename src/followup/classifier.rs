//! Follow-up behavior selection and prompt context
//!
//! The behavior is chosen in code from a small decision table; the
//! completion service only phrases it. The one thing code cannot judge is
//! whether a query that produced an unconstrained filter was about orders
//! at all, so in that case the model is allowed to decline instead.

use crate::core::filter::OrderFilter;
use crate::core::service::CompletionRequest;
use crate::core::vocabulary::Axis;
use crate::followup::sanitize::NO_REMARK_SENTINEL;
use serde::Serialize;
use std::fmt;
use tera::{Context, Tera};

/// The four mutually exclusive follow-up behaviors
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum FollowUpBehavior {
    /// Results are empty or the query is ambiguous: propose alternatives
    SuggestAlternatives,
    /// An assumption was recorded and must be disclosed
    DiscloseAssumption,
    /// Clear query with results and no assumption: answer with the sentinel
    NoRemark,
    /// The query is not about orders: politely decline
    DeclineUnrelated,
}

impl FollowUpBehavior {
    /// Behavior number as referenced by the follow-up instructions
    pub fn number(self) -> u8 {
        match self {
            FollowUpBehavior::SuggestAlternatives => 1,
            FollowUpBehavior::DiscloseAssumption => 2,
            FollowUpBehavior::NoRemark => 3,
            FollowUpBehavior::DeclineUnrelated => 4,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            FollowUpBehavior::SuggestAlternatives => "suggest valid searches",
            FollowUpBehavior::DiscloseAssumption => "notify user of assumption made",
            FollowUpBehavior::NoRemark => "no assumption made",
            FollowUpBehavior::DeclineUnrelated => "not order-related query",
        }
    }
}

impl fmt::Display for FollowUpBehavior {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "BEHAVIOR {} ({})", self.number(), self.label())
    }
}

/// Outcome of the decision table
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct FollowUpDecision {
    /// Behavior the reply must follow
    pub behavior: FollowUpBehavior,
    /// Whether the model may override with [`FollowUpBehavior::DeclineUnrelated`]
    pub may_decline: bool,
}

/// Apply the decision table
///
/// | assumptions | results | behavior |
/// |---|---|---|
/// | any | any | DiscloseAssumption |
/// | none | 0 | SuggestAlternatives |
/// | none | >0 | NoRemark |
///
/// Declining is allowed only when the filter constrains nothing.
pub fn decide(
    filter: &OrderFilter,
    result_count: usize,
    assumptions: &[String],
) -> FollowUpDecision {
    let behavior = if !assumptions.is_empty() {
        FollowUpBehavior::DiscloseAssumption
    } else if result_count == 0 {
        FollowUpBehavior::SuggestAlternatives
    } else {
        FollowUpBehavior::NoRemark
    };

    FollowUpDecision {
        behavior,
        may_decline: filter.is_unconstrained(),
    }
}

/// Everything needed for the follow-up completion call
#[derive(Debug, Clone, PartialEq)]
pub struct FollowUpContext {
    pub decision: FollowUpDecision,
    pub request: CompletionRequest,
}

const CONTEXT_TEMPLATE: &str = r#"Original query: {{ query }}
Applied filter: {{ filter_json }}
Result count: {{ result_count }}
Assumptions made: {% if assumptions %}{{ assumptions | join(sep="; ") }}{% else %}None{% endif %}
Required behavior: {{ behavior }}
{% if may_decline %}If the query is not about orders at all, use BEHAVIOR 4 instead.{% else %}The query was understood as an order search, so do not use BEHAVIOR 4.{% endif %}

Generate the appropriate follow-up message:"#;

/// System instructions describing the four behaviors
pub fn follow_up_instructions() -> String {
    format!(
        r#"You are a helpful assistant that generates follow-up messages for order search queries.

You must generate ONE of these 4 specific behaviors:

BEHAVIOR 1 - Suggest valid searches (results are empty or the query is ambiguous):
Format: "Did you mean [suggestion]?" or "No orders found. Try checking [location/company/carrier] names."
Example: "No orders found for 'Location X'. Did you mean Location A or Location B?"

BEHAVIOR 2 - Notify user of assumption made:
Clearly state the assumption that was made when turning the query into a filter.
Example: "Filtering by order creation date. To filter by stored or collected date, add 'stored' or 'collected' to your query."

BEHAVIOR 3 - No assumption made:
Return exactly "{sentinel}".

BEHAVIOR 4 - Not order-related query:
Politely tell the user to ask about order searches only.
Example: "This search is for orders only. Please ask about orders, locations, statuses, dates, etc."

RULES:
- Keep messages to 1-2 lines maximum
- Follow the required behavior given with the search context
- Never return "{sentinel}" if the assumptions list is not "None"

VALID DATA (for suggesting alternatives):
- Valid STATUSES: {statuses}
- Valid SERVICES: {services}
- Valid LOCATION_TYPES: {location_types}
- Valid COLLECTED_BY: {collectors}
- Valid FLAGS: {flags}
- Sample CITIES: Hong Kong, Paris
- Sample COMPANIES: Demo Company, 7Eleven Kwai Chung, ABI Graphique Demo
- Sample CARRIERS: DHL, SF Express, UPS
- Sample LOCATIONS: alfred24 Office Locker, 7Eleven Kwai Chung - PUDO, Location A, ABI Graphique Demo Locker Normal

Respond with ONLY the follow-up message text (or "{sentinel}" for behavior 3).
Do not include reasoning, XML tags, explanations or commentary about your decision."#,
        sentinel = NO_REMARK_SENTINEL,
        statuses = Axis::Status.joined(),
        services = Axis::Service.joined(),
        location_types = Axis::LocationType.joined(),
        collectors = Axis::CollectedBy.joined(),
        flags = Axis::Flag.joined(),
    )
}

/// Build the follow-up call for one search
pub fn classify(
    original_query: &str,
    filter: &OrderFilter,
    result_count: usize,
    assumptions: &[String],
) -> tera::Result<FollowUpContext> {
    let decision = decide(filter, result_count, assumptions);
    let filter_json = serde_json::to_string(filter).unwrap_or_else(|_| "{}".to_string());

    let mut context = Context::new();
    context.insert("query", original_query);
    context.insert("filter_json", &filter_json);
    context.insert("result_count", &result_count);
    context.insert("assumptions", assumptions);
    context.insert("behavior", &decision.behavior.to_string());
    context.insert("may_decline", &decision.may_decline);

    let user_text = Tera::one_off(CONTEXT_TEMPLATE, &context, false)?;

    Ok(FollowUpContext {
        decision,
        request: CompletionRequest::new(follow_up_instructions(), user_text),
    })
}
