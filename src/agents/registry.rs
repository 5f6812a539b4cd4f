//! Named collection of sessions with dispatch-by-name.

use crate::agents::session::Session;
use crate::error::{RelayError, Result};
use indexmap::IndexMap;
use std::collections::HashMap;

/// Insertion-ordered mapping from agent name to session, with an optional
/// role description per name.
///
/// Roles are what make a target eligible for orchestrated routing;
/// dispatch itself works for every name. The mapping is fixed once built.
#[derive(Default)]
pub struct Registry {
    sessions: IndexMap<String, Session>,
    roles: HashMap<String, String>,
}

impl Registry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a session under a unique name, optionally with a role.
    pub fn insert(&mut self, name: impl Into<String>, session: Session, role: Option<String>) {
        let name = name.into();
        if let Some(role) = role {
            self.roles.insert(name.clone(), role);
        }
        self.sessions.insert(name, session);
    }

    /// Send a prompt to the named target.
    ///
    /// An unknown name fails with [`RelayError::AgentNotFound`] without
    /// touching any executor, so callers can tell a bad routing decision
    /// from a bad reply.
    pub fn dispatch(&mut self, prompt: &str, name: &str) -> Result<String> {
        let session = self
            .sessions
            .get_mut(name)
            .ok_or_else(|| RelayError::AgentNotFound(name.to_string()))?;
        session.ask(prompt)
    }

    /// Target names in insertion order.
    pub fn names(&self) -> Vec<String> {
        self.sessions.keys().cloned().collect()
    }

    pub fn role_of(&self, name: &str) -> Option<&str> {
        self.roles.get(name).map(String::as_str)
    }

    /// Role-bearing names paired with their roles, in insertion order.
    pub(crate) fn role_entries(&self) -> impl Iterator<Item = (&str, &str)> {
        self.sessions.keys().filter_map(|name| {
            self.roles
                .get(name)
                .map(|role| (name.as_str(), role.as_str()))
        })
    }

    #[cfg(test)]
    pub(crate) fn get(&self, name: &str) -> Option<&Session> {
        self.sessions.get(name)
    }
}
