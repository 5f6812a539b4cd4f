//! Model-driven routing over a registry.

use crate::agents::registry::Registry;
use crate::agents::session::Session;
use crate::error::Result;

/// Instruction rendered for every routing decision
const ROUTER_TEMPLATE: &str = include_str!("../../prompts/router.md");

/// A registry plus one routing session that picks the dispatch target.
///
/// The routing session conceptually sits outside the set it routes over;
/// overlap with a registry name is not forbidden, just pointless.
pub struct Orchestrator {
    router: Session,
    registry: Registry,
}

impl Orchestrator {
    pub fn new(router: Session, registry: Registry) -> Self {
        Self { router, registry }
    }

    /// Ask the routing session for a target name, then dispatch the
    /// original prompt there.
    ///
    /// One routing round-trip, strictly before the dispatched call. The
    /// trimmed reply is used verbatim as the dispatch key: a reply naming
    /// no registered agent fails with [`crate::error::RelayError::AgentNotFound`],
    /// with no fallback target and no second routing attempt.
    pub fn ask(&mut self, prompt: &str) -> Result<String> {
        let routing_prompt = self.routing_prompt(prompt);
        let choice = self.router.ask(&routing_prompt)?;
        self.registry.dispatch(prompt, choice.trim())
    }

    /// All registry names, for UIs. Role presence does not matter here.
    pub fn options(&self) -> Vec<String> {
        self.registry.names()
    }

    /// Render the routing instruction: one `name: role` line per
    /// role-bearing target, then the literal user prompt. Targets without
    /// a role are not offered to the router.
    fn routing_prompt(&self, prompt: &str) -> String {
        let mut listing = String::new();
        for (name, role) in self.registry.role_entries() {
            listing.push_str(name);
            listing.push_str(": ");
            listing.push_str(role);
            listing.push('\n');
        }

        ROUTER_TEMPLATE
            .replace("{agents}", listing.trim_end())
            .replace("{prompt}", prompt)
    }
}
