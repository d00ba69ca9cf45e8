use std::path::Path;

use crate::error::FrontendError;
use crate::ir::fact::Fact;
use crate::ir::rule::Rule;

/// Decodes facts and rules from an external encoding (YAML, JSON, ...).
///
/// Frontends only decode. They must not validate, so that structural problems
/// surface as [`FactError`](crate::FactError) / [`RuleError`](crate::RuleError)
/// reason codes from the validators rather than as opaque parse errors.
pub trait RuleFrontend: Send + Sync {
    /// File extensions this frontend handles (e.g. `["yaml", "yml"]`).
    fn extensions(&self) -> &[&str];

    /// Decode a rule document.
    fn parse_rules(&self, content: &str) -> Result<Vec<Rule>, FrontendError>;

    /// Decode a fact document.
    fn parse_facts(&self, content: &str) -> Result<Vec<Fact>, FrontendError>;

    /// Read and decode a rule document from disk.
    fn parse_rules_file(&self, path: &Path) -> Result<Vec<Rule>, FrontendError>;

    /// Read and decode a fact document from disk.
    fn parse_facts_file(&self, path: &Path) -> Result<Vec<Fact>, FrontendError>;

    /// Returns `true` if `path` has one of this frontend's extensions.
    fn handles(&self, path: &Path) -> bool {
        path.extension()
            .and_then(|ext| ext.to_str())
            .is_some_and(|ext| self.extensions().contains(&ext))
    }
}
