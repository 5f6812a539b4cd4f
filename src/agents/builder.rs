//! Configuration-driven construction of registries and orchestrators.
//!
//! All branching on agent kind lives here; downstream code only ever sees
//! sessions. Building is deterministic: same config and defaults, same
//! result, and nothing touches the network until the first ask.

use crate::agents::executor::Executor;
use crate::agents::local::{CodeExecutor, ShellExecutor};
use crate::agents::orchestrator::Orchestrator;
use crate::agents::registry::Registry;
use crate::agents::remote::{RemoteModelExecutor, RemoteSpec, DEFAULT_MODEL};
use crate::agents::session::Session;
use crate::config::{AgentEntry, AgentKind, Config};
use crate::error::Result;
use std::collections::HashMap;

/// Builder-level fallbacks applied to every LLM-backed entry.
#[derive(Debug, Clone, Default)]
pub struct BuildDefaults {
    pub api_key: Option<String>,
    pub api_base: Option<String>,
    pub headers: HashMap<String, String>,
}

/// What a configuration builds into: a plain registry, or a registry
/// wrapped with a routing session when an orchestrator section exists.
pub enum Dispatcher {
    Registry(Registry),
    Orchestrated(Orchestrator),
}

/// Build the full dispatch target described by the configuration.
pub fn build(config: &Config, defaults: &BuildDefaults) -> Result<Dispatcher> {
    let registry = build_registry(config, defaults)?;

    match &config.orchestrator {
        Some(entry) => {
            let router = Session::new(Executor::Remote(remote_from_entry(entry, defaults)?));
            Ok(Dispatcher::Orchestrated(Orchestrator::new(router, registry)))
        }
        None => Ok(Dispatcher::Registry(registry)),
    }
}

/// Build just the registry from the agents section.
pub fn build_registry(config: &Config, defaults: &BuildDefaults) -> Result<Registry> {
    let mut registry = Registry::new();

    for (name, entry) in &config.agents {
        let executor = match entry.kind {
            AgentKind::Python => Executor::Code(CodeExecutor),
            AgentKind::Shell => Executor::Shell(ShellExecutor),
            AgentKind::OpenAi => Executor::Remote(remote_from_entry(entry, defaults)?),
        };
        registry.insert(name.clone(), Session::new(executor), entry.role.clone());
    }

    Ok(registry)
}

/// Apply entry-over-defaults fallbacks and the key-by-key header merge.
fn remote_from_entry(entry: &AgentEntry, defaults: &BuildDefaults) -> Result<RemoteModelExecutor> {
    let mut headers = defaults.headers.clone();
    headers.extend(entry.headers.clone());

    RemoteModelExecutor::new(RemoteSpec {
        model: entry
            .model
            .clone()
            .unwrap_or_else(|| DEFAULT_MODEL.to_string()),
        api_key: entry.api_key.clone().or_else(|| defaults.api_key.clone()),
        api_base: entry.api_base.clone().or_else(|| defaults.api_base.clone()),
        headers,
        temperature: entry.temperature,
        reasoning_effort: entry.reasoning_effort.clone(),
        wire: entry.wire.clone(),
        top_p: entry.top_p,
        max_tokens: entry.max_tokens,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(toml: &str) -> Config {
        toml::from_str(toml).unwrap()
    }

    fn remote_of<'a>(registry: &'a Registry, name: &str) -> &'a RemoteModelExecutor {
        match &registry.get(name).unwrap().executor {
            Executor::Remote(remote) => remote,
            _ => panic!("expected remote executor for {}", name),
        }
    }

    #[test]
    fn test_builds_every_kind() {
        let config = parse(
            r#"
            [agents.x]
            model = "m1"

            [agents.py]
            kind = "python"

            [agents.sh]
            kind = "shell"
            "#,
        );

        let registry = build_registry(&config, &BuildDefaults::default()).unwrap();
        assert_eq!(registry.names(), vec!["x", "py", "sh"]);

        assert!(matches!(
            registry.get("x").unwrap().executor,
            Executor::Remote(_)
        ));
        assert!(matches!(
            registry.get("py").unwrap().executor,
            Executor::Code(_)
        ));
        assert!(matches!(
            registry.get("sh").unwrap().executor,
            Executor::Shell(_)
        ));
    }

    #[test]
    fn test_roles_recorded_for_every_kind() {
        let config = parse(
            r#"
            [agents.py]
            kind = "python"
            role = "runs python"

            [agents.x]
            model = "m1"
            role = "general chat"
            "#,
        );

        let registry = build_registry(&config, &BuildDefaults::default()).unwrap();
        assert_eq!(registry.role_of("py"), Some("runs python"));
        assert_eq!(registry.role_of("x"), Some("general chat"));
    }

    #[test]
    fn test_headers_merge_entry_over_defaults() {
        let config = parse(
            r#"
            [agents.x]
            model = "m1"

            [agents.x.headers]
            B = "2"
            "#,
        );

        let defaults = BuildDefaults {
            headers: HashMap::from([("A".to_string(), "1".to_string())]),
            ..Default::default()
        };

        let registry = build_registry(&config, &defaults).unwrap();
        let headers = &remote_of(&registry, "x").options().headers;
        assert_eq!(headers.get("A").map(String::as_str), Some("1"));
        assert_eq!(headers.get("B").map(String::as_str), Some("2"));
    }

    #[test]
    fn test_entry_header_wins_on_collision() {
        let config = parse(
            r#"
            [agents.x]
            model = "m1"

            [agents.x.headers]
            A = "entry"
            "#,
        );

        let defaults = BuildDefaults {
            headers: HashMap::from([("A".to_string(), "default".to_string())]),
            ..Default::default()
        };

        let registry = build_registry(&config, &defaults).unwrap();
        let headers = &remote_of(&registry, "x").options().headers;
        assert_eq!(headers.get("A").map(String::as_str), Some("entry"));
    }

    #[test]
    fn test_endpoint_falls_back_to_defaults() {
        let config = parse(
            r#"
            [agents.own]
            model = "m1"
            api_base = "http://own:1234/v1"

            [agents.fallback]
            model = "m2"
            "#,
        );

        let defaults = BuildDefaults {
            api_base: Some("http://shared:9999/v1".to_string()),
            ..Default::default()
        };

        let registry = build_registry(&config, &defaults).unwrap();
        assert_eq!(
            remote_of(&registry, "own").options().api_base,
            "http://own:1234/v1"
        );
        assert_eq!(
            remote_of(&registry, "fallback").options().api_base,
            "http://shared:9999/v1"
        );
    }

    #[test]
    fn test_model_defaults_when_unset() {
        let config = parse("[agents.x]\n");
        let registry = build_registry(&config, &BuildDefaults::default()).unwrap();
        assert_eq!(remote_of(&registry, "x").options().model, DEFAULT_MODEL);
    }

    #[test]
    fn test_orchestrator_section_wraps_the_registry() {
        let config = parse(
            r#"
            [agents.py]
            kind = "python"
            role = "runs python"

            [orchestrator]
            model = "o4-mini"
            "#,
        );

        let dispatcher = build(&config, &BuildDefaults::default()).unwrap();
        match dispatcher {
            Dispatcher::Orchestrated(orchestrator) => {
                assert_eq!(orchestrator.options(), vec!["py"]);
            }
            Dispatcher::Registry(_) => panic!("expected an orchestrated dispatcher"),
        }
    }

    #[test]
    fn test_no_orchestrator_section_stays_a_registry() {
        let config = parse("[agents.py]\nkind = \"python\"\n");
        let dispatcher = build(&config, &BuildDefaults::default()).unwrap();
        assert!(matches!(dispatcher, Dispatcher::Registry(_)));
    }
}
