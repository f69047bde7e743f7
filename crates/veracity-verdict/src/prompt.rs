//! Debate prompts for the three roles
//!
//! Every prompt repeats the claim verbatim and instructs the role to rate it
//! exactly as phrased. Comparative and superlative direction is never to be
//! inverted: "A is better than B" is rated as written, not as whether B is
//! better.

use crate::position::DebatePosition;
use veracity_domain::EvidenceItem;

const DIRECTION_RULE: &str = "Rate the claim EXACTLY as phrased. Never invert comparative or \
superlative direction: if the claim says A is greater than B, you are rating that statement, \
not whether B is greater than A.";

/// The advocate's opening prompt
pub fn advocate(claim_text: &str, evidence: &[EvidenceItem]) -> String {
    format!(
        "Role: advocate.\n\nPropose a truth percentage for this claim, citing the most \
         probative evidence by index.\n\n{}\n\nClaim: {}\n\nEvidence:\n{}",
        DIRECTION_RULE,
        claim_text,
        evidence_list(evidence)
    )
}

/// The challenger's prompt, arguing the opposing direction
pub fn challenge(
    claim_text: &str,
    evidence: &[EvidenceItem],
    advocate: &DebatePosition,
) -> String {
    format!(
        "Role: challenger.\n\nIndependently review the same evidence and argue the opposing \
         direction to the position below, citing any evidence it underweighted.\n\n{}\n\n\
         Claim: {}\n\nPrior position: truth {}%, confidence {}%, cited supporting {:?}, \
         cited opposing {:?}.\n\nEvidence:\n{}",
        DIRECTION_RULE,
        claim_text,
        advocate.truth_percentage,
        advocate.confidence,
        advocate.supporting_evidence,
        advocate.opposing_evidence,
        evidence_list(evidence)
    )
}

/// The reconciler's prompt, producing the final position
pub fn reconcile(
    claim_text: &str,
    evidence: &[EvidenceItem],
    advocate: &DebatePosition,
    challenger: &DebatePosition,
) -> String {
    format!(
        "Role: reconciler.\n\nGiven both positions, produce the final truth percentage and \
         confidence, with the evidence indices that ground it.\n\n{}\n\nClaim: {}\n\n\
         First position: truth {}%, confidence {}%. Reasoning: {}\n\n\
         Second position: truth {}%, confidence {}%. Reasoning: {}\n\nEvidence:\n{}",
        DIRECTION_RULE,
        claim_text,
        advocate.truth_percentage,
        advocate.confidence,
        advocate.reasoning,
        challenger.truth_percentage,
        challenger.confidence,
        challenger.reasoning,
        evidence_list(evidence)
    )
}

/// Numbered evidence list shared by all role prompts
fn evidence_list(evidence: &[EvidenceItem]) -> String {
    evidence
        .iter()
        .enumerate()
        .map(|(i, e)| {
            format!(
                "[{}] ({:?}, {}, probative {:.2}{}) {}",
                i,
                e.stance,
                e.category.as_str(),
                e.probative_value,
                if e.is_derivative { ", derivative" } else { "" },
                e.statement
            )
        })
        .collect::<Vec<_>>()
        .join("\n")
}
