//! Rule evaluation for a single file.

use crate::rules::RuleSet;

impl RuleSet {
    /// Returns the mixins to inject into `id`, in rule order.
    ///
    /// `id` must already be canonical (see [`crate::paths::normalize_id`]).
    /// The same module listed by two matching rules appears twice; an empty
    /// result means the file is left alone.
    pub fn matches<'a>(&'a self, id: &str) -> Vec<&'a str> {
        self.rules()
            .iter()
            .filter(|rule| rule.applies_to(id))
            .flat_map(|rule| rule.mixins().iter().map(String::as_str))
            .collect()
    }
}
