//! Oracle instructions for the grounded verification stages

use crate::preprocess::CompanyType;

/// Rewrites a claim plus memo context into a research question
pub(crate) const PREPROCESSING_INSTRUCTIONS: &str = r#"You write research questions for a search-grounded assistant that fact-checks claims from investment memos.

You receive a claim, the memo it came from, and whether the subject is an external company or an internal corporate venture.

Write ONE self-contained question that:
- Names the subject explicitly: company, product, market, geography
- Carries the exact figures and timeframes that need checking
- Says whether the subject is an internal venture or a public company
- Asks for verification, not just information

Example of a weak question: "Is the market $13B?"
Example of a strong question: "I am analyzing the pet food market in Alberta and have a claim that it is worth $13B. How accurate is this figure based on current market data?"

End the question by asking the assistant to cite several full source URLs (deep links to the specific page, not just domains) using the format [n]: https://...

Respond with the question only."#;

/// Turns a grounded answer into the verdict JSON
pub(crate) const STRUCTURING_INSTRUCTIONS: &str = r#"You convert a fact-checking answer into a structured verdict. Do not research anything yourself.

Return exactly one JSON object:
{
  "status": "verified_true" | "verified_false" | "partially_true" | "needs_context" | "cannot_find_answer",
  "reasoning": "2-3 sentences on why this status was chosen",
  "sources": ["source URLs that appear in the answer"],
  "searchQuery": "what was actually searched for",
  "confidence": 1-10
}

Status:
- verified_true: several reliable sources confirm the claim
- verified_false: reliable sources contradict the claim
- partially_true: some parts confirmed, others not, or the data is outdated
- needs_context: information exists but the claim needs qualification
- cannot_find_answer: not enough reliable information

Confidence:
- 8-10: several recent, authoritative sources
- 5-7: some good sources, limited or older data
- 1-4: weak or conflicting sources

Only list URLs present in the answer. Return the JSON object and nothing else."#;

/// Fixed research question used when the preprocessing oracle fails
pub(crate) fn fallback_research_prompt(claim: &str, company_type: CompanyType) -> String {
    format!(
        "I need to verify this claim from an investment memo: \"{}\". This is about {}. \
         Can you help verify if this claim is accurate? Please cite several full source URLs \
         (deep links, not just domains) using the format [n]: https://...",
        claim,
        company_type.description()
    )
}

/// User message for the preprocessing call
pub(crate) fn preprocessing_request(claim: &str, memo: &str, company_type: CompanyType) -> String {
    format!(
        "CLAIM TO VERIFY:\n{}\n\nMEMO CONTEXT:\n{}\n\nCOMPANY TYPE: {}",
        claim,
        memo,
        company_type.as_str()
    )
}

/// User message for the structuring call
pub(crate) fn structuring_request(claim: &str, answer: &str, urls: &[String]) -> String {
    let url_list = if urls.is_empty() {
        "(none found)".to_string()
    } else {
        urls.iter()
            .map(|u| format!("- {}", u))
            .collect::<Vec<_>>()
            .join("\n")
    };

    format!(
        "ORIGINAL CLAIM:\n{}\n\nFACT-CHECKING ANSWER:\n{}\n\nURLS FOUND IN THE ANSWER:\n{}\n\n\
         Return the structured verdict JSON.",
        claim, answer, url_list
    )
}
