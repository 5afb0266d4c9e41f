//! Intent matcher: maps free text to a feature identifier, or signals
//! no match.
//!
//! Matching policy, in order: exact trigger match (case, punctuation and
//! whitespace insensitive), then keyword-overlap scoring against each
//! descriptor's keyword set, with a configurable confidence threshold.
//! A pure function of the query text and the registry snapshot.

use std::collections::{BTreeMap, HashSet};
use std::sync::LazyLock;

use regex::Regex;

use gaffer_core::types::{FeatureDescriptor, FeatureRegistry};

use crate::types::Intent;

static TOKEN_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"[a-z0-9']+").unwrap());

/// Lowercase word tokens of a text, apostrophes preserved.
pub(crate) fn tokenize(text: &str) -> Vec<String> {
    let lowered = text.to_lowercase();
    TOKEN_RE
        .find_iter(&lowered)
        .map(|m| m.as_str().to_string())
        .collect()
}

/// Canonical form used for trigger comparison: lowercase tokens joined by
/// single spaces, so punctuation and whitespace differences vanish.
fn normalize(text: &str) -> String {
    tokenize(text).join(" ")
}

/// Rule-based intent matcher over a feature registry snapshot.
pub struct IntentMatcher {
    /// Minimum keyword-overlap score to accept a match.
    threshold: f64,
}

impl IntentMatcher {
    /// Create a matcher with the given confidence threshold.
    pub fn new(threshold: f64) -> Self {
        Self { threshold }
    }

    /// Resolve the intent of a raw query against the registry.
    pub fn resolve(&self, text: &str, registry: &FeatureRegistry) -> Intent {
        let normalized = normalize(text);
        if normalized.is_empty() {
            return Intent::Unmatched;
        }

        // Tier 1: exact trigger match wins outright.
        for descriptor in registry.iter() {
            if descriptor
                .triggers
                .iter()
                .any(|t| normalize(t) == normalized)
            {
                return Intent::Matched {
                    feature_id: descriptor.id.clone(),
                    params: bind_params(text, descriptor),
                    confidence: 1.0,
                };
            }
        }

        // Tier 2: keyword-overlap scoring. Strictly-greater comparison in
        // declaration order gives the earliest-declared descriptor on ties.
        let tokens: HashSet<String> = tokenize(text).into_iter().collect();
        let mut best: Option<(&FeatureDescriptor, f64)> = None;

        for descriptor in registry.iter() {
            if descriptor.keywords.is_empty() {
                continue;
            }
            let present = descriptor
                .keywords
                .iter()
                .filter(|k| tokens.contains(&k.to_lowercase()))
                .count();
            let score = present as f64 / descriptor.keywords.len() as f64;
            if best.map_or(true, |(_, s)| score > s) {
                best = Some((descriptor, score));
            }
        }

        match best {
            Some((descriptor, score)) if score >= self.threshold => Intent::Matched {
                feature_id: descriptor.id.clone(),
                params: bind_params(text, descriptor),
                confidence: score,
            },
            _ => Intent::Unmatched,
        }
    }
}

/// Bind a recognised option token to the descriptor's parameter, or fall
/// back to the declared default.
fn bind_params(text: &str, descriptor: &FeatureDescriptor) -> BTreeMap<String, String> {
    let mut params = BTreeMap::new();
    if let Some(schema) = &descriptor.param {
        let tokens: HashSet<String> = tokenize(text).into_iter().collect();
        let value = schema
            .options
            .iter()
            .find(|opt| tokens.contains(&opt.to_lowercase()))
            .cloned()
            .unwrap_or_else(|| schema.default.clone());
        params.insert(schema.name.clone(), value);
    }
    params
}
