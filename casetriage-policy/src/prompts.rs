//! Prompt assembly for the LLM touchpoints.
//!
//! All prompt text lives here so the pipeline nodes stay free of string
//! building. One builder function per touchpoint; the static instruction
//! blocks are the policy, the `*_request` builders fill in per-case data.

use crate::category::Category;

/// Assembles prompts for the triage pipeline.
pub struct PromptBuilder;

impl PromptBuilder {
    /// Global system prompt framing every LLM call.
    pub fn system_prompt() -> String {
        let mut prompt = String::new();
        prompt.push_str("You are a Swiss law case-triage analyst. ");
        prompt.push_str(
            "You assess case descriptions against Swiss statutes and historical outcomes. ",
        );
        prompt.push_str(
            "Use the evidence you are given sparingly and prefer high-signal reasoning. ",
        );
        prompt.push_str("Always think step-by-step and justify your conclusions briefly.\n");
        prompt
    }

    /// Instructions for classifying a case into the four categories.
    pub fn categorize_instructions() -> String {
        let mut prompt = String::new();
        prompt.push_str("Classify the case into exactly one of: ");
        for (i, category) in Category::ALL.iter().enumerate() {
            if i > 0 {
                prompt.push_str(", ");
            }
            prompt.push_str(category.label_de());
        }
        prompt.push_str(".\n\nFocus on key legal indicators:\n");
        prompt.push_str("- Arbeitsrecht: employment contracts, workplace disputes, dismissals, wages\n");
        prompt.push_str("- Immobilienrecht: property disputes, rental agreements, real estate transactions\n");
        prompt.push_str("- Strafverkehrsrecht: traffic violations, criminal traffic offenses, license issues\n");
        prompt.push_str("- Andere: all other legal matters\n\n");
        prompt.push_str("Reply with the category name only.\n");
        prompt
    }

    /// Ask the model for a single clarification question when the
    /// classifier's confidence is below threshold.
    pub fn clarification_question_request(case_text: &str, confidence: f32) -> String {
        let mut prompt = String::new();
        prompt.push_str(&format!("Case text: {}\n\n", case_text));
        prompt.push_str(&format!(
            "The initial categorization has low confidence ({:.2}).\n",
            confidence
        ));
        prompt.push_str(
            "Generate a single, clear question to ask the user to clarify the case type. ",
        );
        prompt.push_str("Focus on distinguishing between: ");
        for (i, category) in Category::ALL.iter().enumerate() {
            if i > 0 {
                prompt.push_str(", ");
            }
            prompt.push_str(category.label_de());
        }
        prompt.push_str(".\nReply with the question only.\n");
        prompt
    }

    /// Question used when no LLM is reachable to phrase a better one.
    pub fn default_clarification_question() -> &'static str {
        "Does your case concern employment, real estate, traffic offenses, or another legal area?"
    }

    /// Scoring rubric for the win-likelihood adjustment step.
    pub fn win_likelihood_instructions() -> String {
        let mut prompt = String::new();
        prompt.push_str(
            "Derive a 1-100 likelihood of winning based on the provided Swiss statutes, \
             historical outcomes for similar fact patterns, and the business-logic baseline.\n\n",
        );
        prompt.push_str("If evidence is thin, lower the score. Be conservative but realistic.\n");
        prompt.push_str("Score ranges:\n");
        prompt.push_str("- 80-100: very strong case with clear legal support\n");
        prompt.push_str("- 60-79: good case with solid legal foundation\n");
        prompt.push_str("- 40-59: moderate case with mixed factors\n");
        prompt.push_str("- 20-39: weak case with significant challenges\n");
        prompt.push_str("- 1-19: very weak case with poor prospects\n");
        prompt
    }

    /// User message for the win-likelihood adjustment step.
    pub fn win_likelihood_request(context: &str) -> String {
        let mut prompt = String::new();
        prompt.push_str("Analyze the likelihood of winning this case based on the available evidence:\n\n");
        prompt.push_str(context);
        prompt.push_str("\n\nConsider:\n");
        prompt.push_str("1. Strength of the legal position based on statutes\n");
        prompt.push_str("2. Historical outcomes in similar cases\n");
        prompt.push_str("3. Quality of evidence and case facts\n");
        prompt.push_str("4. Potential procedural challenges\n\n");
        prompt.push_str("Respond with just the numerical score (1-100) and brief reasoning.\n");
        prompt
    }

    /// Instructions for the complexity assessment feeding time/cost.
    pub fn time_cost_instructions() -> String {
        let mut prompt = String::new();
        prompt.push_str(
            "Assess the case to determine how demanding the proceedings will be. \
             If some inputs are missing, proceed with reasonable defaults and note assumptions.\n",
        );
        prompt
    }

    /// User message for the complexity assessment.
    pub fn complexity_request(context: &str) -> String {
        let mut prompt = String::new();
        prompt.push_str("Analyze this case to determine complexity and key factors:\n\n");
        prompt.push_str(context);
        prompt.push_str("\n\nBased on the case description and legal context, assess:\n");
        prompt.push_str("1. Complexity level (low/medium/high)\n");
        prompt.push_str("2. Likely court level if not specified\n");
        prompt.push_str("3. Whether appeals are expected\n");
        prompt.push_str("4. Any procedural complications\n\n");
        prompt.push_str("Respond with a brief analysis mentioning these factors.\n");
        prompt
    }

    /// User message for the customer-facing summary step.
    pub fn summary_request(
        category: Category,
        likelihood: Option<u8>,
        estimated_time: Option<&str>,
        estimated_cost: Option<&str>,
        explanation: &str,
    ) -> String {
        let fmt_opt = |value: Option<String>| value.unwrap_or_else(|| "not available".to_string());

        let mut prompt = String::new();
        prompt.push_str(
            "Use all of the following information about a legal case estimation and provide \
             a final, user-friendly customer-facing answer.\n\n",
        );
        prompt.push_str("Rules:\n");
        prompt.push_str("- Keep the answer as short as possible while covering all findings.\n");
        prompt.push_str(
            "- Give clear guidance on whether the case is worth pursuing or not.\n",
        );
        prompt.push_str("- If information is missing, state this clearly.\n");
        prompt.push_str("- Mention similar cases when they informed the findings.\n\n");
        prompt.push_str("Information:\n");
        prompt.push_str(&format!("- Determined case category: {}\n", category.label_de()));
        prompt.push_str(&format!(
            "- Likelihood to win the case: {}\n",
            fmt_opt(likelihood.map(|p| format!("{}%", p)))
        ));
        prompt.push_str(&format!(
            "- Estimated time: {}\n",
            fmt_opt(estimated_time.map(String::from))
        ));
        prompt.push_str(&format!(
            "- Estimated cost: {}\n",
            fmt_opt(estimated_cost.map(String::from))
        ));
        prompt.push_str(&format!("- Explanation: {}\n", explanation));
        prompt
    }
}
