//! Suggestion updater: derives the next set of quick-prompt chips.
//!
//! Default policy returns the registry-derived list unchanged so the
//! dashboard's quick prompts stay stable. A contextual override can
//! narrow the list, but the override point is explicit and optional.

use gaffer_core::types::{FeatureRegistry, Suggestion};

use crate::types::Intent;

/// Optional contextual override: return `Some` to replace the default
/// suggestion list for a given intent, `None` to keep it.
pub type SuggestionOverride =
    dyn Fn(&Intent, &FeatureRegistry) -> Option<Vec<Suggestion>> + Send + Sync;

/// Produces the ordered suggestion list for each turn.
pub struct SuggestionUpdater {
    override_fn: Option<Box<SuggestionOverride>>,
}

impl Default for SuggestionUpdater {
    fn default() -> Self {
        Self::new()
    }
}

impl SuggestionUpdater {
    /// Updater with the default stable policy.
    pub fn new() -> Self {
        Self { override_fn: None }
    }

    /// Updater with a contextual override hook.
    pub fn with_override(
        f: impl Fn(&Intent, &FeatureRegistry) -> Option<Vec<Suggestion>> + Send + Sync + 'static,
    ) -> Self {
        Self {
            override_fn: Some(Box::new(f)),
        }
    }

    /// Suggestions to display after the given intent. Deterministic: the
    /// same intent always yields the same sequence.
    pub fn update(&self, intent: &Intent, registry: &FeatureRegistry) -> Vec<Suggestion> {
        if let Some(f) = &self.override_fn {
            if let Some(contextual) = f(intent, registry) {
                return contextual;
            }
        }
        registry_suggestions(registry)
    }
}

/// The full registry-derived suggestion list, in declaration order.
pub fn registry_suggestions(registry: &FeatureRegistry) -> Vec<Suggestion> {
    registry
        .iter()
        .map(|d| Suggestion {
            id: d.id.clone(),
            label: d.label.clone(),
            prompt: d.triggers.first().cloned(),
            options: d
                .param
                .as_ref()
                .map(|p| p.options.clone())
                .unwrap_or_default(),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    use std::collections::BTreeMap;

    fn matched(id: &str) -> Intent {
        Intent::Matched {
            feature_id: id.to_string(),
            params: BTreeMap::new(),
            confidence: 1.0,
        }
    }

    #[test]
    fn test_default_policy_mirrors_registry() {
        let registry = FeatureRegistry::standard();
        let updater = SuggestionUpdater::new();
        let suggestions = updater.update(&Intent::Unmatched, &registry);
        assert_eq!(suggestions.len(), registry.len());
        assert_eq!(suggestions[0].id, "my-team-summary");
        assert!(suggestions[0].prompt.is_some());
    }

    #[test]
    fn test_same_intent_same_sequence() {
        let registry = FeatureRegistry::standard();
        let updater = SuggestionUpdater::new();
        let intent = matched("chip-advice");
        let a = updater.update(&intent, &registry);
        let b = updater.update(&intent, &registry);
        assert_eq!(a, b);
    }

    #[test]
    fn test_override_replaces_list() {
        let registry = FeatureRegistry::standard();
        let updater = SuggestionUpdater::with_override(|intent, registry| match intent {
            Intent::Matched { feature_id, .. } if feature_id == "chip-advice" => Some(
                registry
                    .iter()
                    .filter(|d| d.id.contains("chip") || d.id.contains("transfer"))
                    .map(|d| Suggestion {
                        id: d.id.clone(),
                        label: d.label.clone(),
                        prompt: None,
                        options: vec![],
                    })
                    .collect(),
            ),
            _ => None,
        });

        let narrowed = updater.update(&matched("chip-advice"), &registry);
        assert!(narrowed.len() < registry.len());
        assert!(narrowed.iter().any(|s| s.id == "transfer-suggester"));

        // Intents the override declines keep the default list.
        let default = updater.update(&Intent::Unmatched, &registry);
        assert_eq!(default.len(), registry.len());
    }

    #[test]
    fn test_param_options_carried_onto_chips() {
        let registry = FeatureRegistry::standard();
        let suggestions = registry_suggestions(&registry);
        let diff = suggestions
            .iter()
            .find(|s| s.id == "differential-hunter")
            .unwrap();
        assert!(diff.options.contains(&"form".to_string()));
    }
}
