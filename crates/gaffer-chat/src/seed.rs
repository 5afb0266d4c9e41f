//! The curated advisory corpus loaded at startup.
//!
//! Short documents in four fixed categories: AI prediction summaries,
//! chip-strategy guidance, transfer rationales, and league projections.
//! The texts follow the summary voice the analytics pipeline emits.

use crate::kb::{DocCategory, KnowledgeDocument};

/// The default knowledge corpus.
pub fn default_corpus() -> Vec<KnowledgeDocument> {
    vec![
        // -- AI predictions --
        KnowledgeDocument::new(
            "ai-overview",
            DocCategory::Predictions,
            "AI top performer overview",
            "The points model favours in-form attackers from sides with kind fixtures. \
             Premium midfielders on set pieces project highest; rotation-risk forwards \
             are discounted. Averages over the last five matches drive the forecast.",
        ),
        KnowledgeDocument::new(
            "ai-captain-pool",
            DocCategory::Predictions,
            "Predicted captaincy pool",
            "Captaincy projections track predicted points times likely minutes. A home \
             fixture against a bottom-three defence typically adds a point to the \
             projection. Check the flagged list before locking your armband.",
        ),
        KnowledgeDocument::new(
            "ai-form-signal",
            DocCategory::Predictions,
            "Form against fixture signal",
            "Form is the strongest single predictor over a one-week horizon, but fixture \
             difficulty dominates over three or more gameweeks. Players high on both \
             axes are the quadrant to buy from.",
        ),
        // -- Chip strategy --
        KnowledgeDocument::new(
            "chip-wildcard",
            DocCategory::ChipStrategy,
            "Wildcard timing",
            "Play the wildcard when three or more starters are flagged, or ahead of a \
             swing in fixture difficulty. Building toward a double gameweek multiplies \
             its value; burning it on one bad week rarely pays.",
        ),
        KnowledgeDocument::new(
            "chip-bench-boost",
            DocCategory::ChipStrategy,
            "Bench boost window",
            "Bench boost pays off in a double gameweek with a settled, injury-free \
             bench. Fifteen playing bodies is the precondition; a wildcard the week \
             before is the classic setup.",
        ),
        KnowledgeDocument::new(
            "chip-triple-captain",
            DocCategory::ChipStrategy,
            "Triple captain picks",
            "Save the triple captain for a premium player with two home fixtures in a \
             double gameweek. A single fixture, however kind, leaves expected value on \
             the table.",
        ),
        KnowledgeDocument::new(
            "chip-free-hit",
            DocCategory::ChipStrategy,
            "Free hit on blanks",
            "The free hit is insurance for blank gameweeks: field eleven starters when \
             half your squad has no fixture, then revert. Holding it past the last \
             blank wastes the chip.",
        ),
        // -- Transfers --
        KnowledgeDocument::new(
            "transfer-upgrade",
            DocCategory::Transfers,
            "Premium upgrade rationale",
            "Selling a premium midfielder out of form funds two mid-price players in \
             form. Spread the risk when no premium is returning; consolidate when one \
             is outscoring the field.",
        ),
        KnowledgeDocument::new(
            "transfer-flags",
            DocCategory::Transfers,
            "Moving flagged players",
            "Sell a flagged player before his price drops when the injury news suggests \
             more than one missed match. A 75 percent chance of playing is usually \
             worth holding; 25 percent is not.",
        ),
        KnowledgeDocument::new(
            "transfer-hits",
            DocCategory::Transfers,
            "Taking points hits",
            "A four-point hit breaks even only when the incoming player outscores the \
             outgoing one by five or more. Chasing last week's points with hits is the \
             classic rank killer.",
        ),
        // -- League projections --
        KnowledgeDocument::new(
            "league-swing",
            DocCategory::LeagueProjections,
            "Mini-league swings",
            "Projected standings swing most on captaincy divergence. Matching the \
             leader's captain protects a lead; a differential armband is the fastest \
             way to close a fifty-point gap.",
        ),
        KnowledgeDocument::new(
            "league-run-in",
            DocCategory::LeagueProjections,
            "Run-in projection",
            "Over the final ten gameweeks, squads with the easier aggregate fixture \
             list gain roughly a league place per twenty points of current deficit. \
             Chip timing decides tight leagues.",
        ),
    ]
}
