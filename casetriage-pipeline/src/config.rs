//! Configuration for the triage pipeline.

use serde::{Deserialize, Serialize};

use casetriage_agent::TimeUnit;
use casetriage_policy::limits;

/// Configuration for a [`CaseAnalyzer`](crate::CaseAnalyzer).
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TriageConfig {
    /// Categorization configuration
    #[serde(default)]
    pub categorize: CategorizeConfig,
    /// Win-likelihood configuration
    #[serde(default)]
    pub likelihood: LikelihoodConfig,
    /// Time & cost configuration
    #[serde(default)]
    pub time_cost: TimeCostConfig,
    /// Tool-call budget
    #[serde(default)]
    pub budget: BudgetConfig,
    /// Output formatting
    #[serde(default)]
    pub output: OutputConfig,
}

impl TriageConfig {
    /// Load config from YAML.
    pub fn from_yaml(yaml: &str) -> Result<Self, serde_yaml::Error> {
        serde_yaml::from_str(yaml)
    }

    /// Serialize to YAML.
    pub fn to_yaml(&self) -> Result<String, serde_yaml::Error> {
        serde_yaml::to_string(self)
    }
}

/// Categorization configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CategorizeConfig {
    /// Below this confidence the pipeline asks for clarification
    pub confidence_threshold: f32,
    /// Confidence assigned to an LLM fallback classification
    pub llm_fallback_confidence: f32,
}

impl Default for CategorizeConfig {
    fn default() -> Self {
        Self {
            confidence_threshold: limits::MIN_CATEGORY_CONFIDENCE,
            llm_fallback_confidence: 0.8,
        }
    }
}

/// Win-likelihood configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LikelihoodConfig {
    /// Statute documents requested per retrieval
    pub retrieval_top_k: usize,
    /// Historic cases requested per lookup
    pub historic_top_k: usize,
    /// Likelihood used when reasoning fails and no baseline exists
    pub default_likelihood: u8,
}

impl Default for LikelihoodConfig {
    fn default() -> Self {
        Self {
            retrieval_top_k: 3,
            historic_top_k: 3,
            default_likelihood: limits::DEFAULT_LIKELIHOOD,
        }
    }
}

/// Time & cost configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TimeCostConfig {
    /// Hourly rate for lawyer time, CHF
    pub hourly_rate_lawyer: f64,
    /// Hourly rate for paralegal time, CHF
    pub hourly_rate_paralegal: f64,
    /// Flat court fees assumed by the cost fallback, CHF
    pub court_fees_chf: f64,
    /// VAT rate applied to fee subtotals
    pub vat_rate: f64,
    /// Share of elapsed working hours billed as lawyer time
    pub lawyer_time_share: f64,
}

impl Default for TimeCostConfig {
    fn default() -> Self {
        Self {
            hourly_rate_lawyer: limits::DEFAULT_HOURLY_RATE_LAWYER,
            hourly_rate_paralegal: limits::DEFAULT_HOURLY_RATE_PARALEGAL,
            court_fees_chf: limits::DEFAULT_COURT_FEES_CHF,
            vat_rate: limits::DEFAULT_VAT_RATE,
            lawyer_time_share: 0.3,
        }
    }
}

/// Tool-call budget configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BudgetConfig {
    /// Global ceiling across all tools per run
    pub max_tool_calls: u32,
    /// Cap on statute retrievals per run
    pub max_retrieval_calls: u32,
    /// Cap on historic-case lookups per run
    pub max_historic_calls: u32,
    /// Cap on user-clarification round trips per run
    pub max_clarification_calls: u32,
}

impl Default for BudgetConfig {
    fn default() -> Self {
        Self {
            max_tool_calls: limits::MAX_TOOL_CALLS,
            max_retrieval_calls: limits::MAX_RETRIEVAL_CALLS,
            max_historic_calls: limits::MAX_HISTORIC_CALLS,
            max_clarification_calls: limits::MAX_CLARIFICATION_CALLS,
        }
    }
}

/// Output formatting configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OutputConfig {
    /// Currency label for cost output
    pub currency: String,
    /// Unit assumed when the input names none
    pub default_unit: TimeUnit,
    /// Slack allowed between a cost total and its component sum, CHF
    pub cost_sum_tolerance_chf: f64,
    /// Whether to produce the customer-facing summary after aggregation
    pub customer_summary: bool,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            currency: "CHF".to_string(),
            default_unit: TimeUnit::Months,
            cost_sum_tolerance_chf: limits::COST_SUM_TOLERANCE_CHF,
            customer_summary: false,
        }
    }
}
