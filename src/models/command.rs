use serde::{Deserialize, Serialize};

/// Desired state of the `switch` capability
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PowerState {
    On,
    Off,
}

impl PowerState {
    /// Command verb the SmartThings `switch` capability expects
    pub fn command(self) -> &'static str {
        match self {
            PowerState::On => "on",
            PowerState::Off => "off",
        }
    }
}

/// A single capability command addressed to a device component
#[derive(Debug, Clone, Serialize)]
pub struct Command {
    pub component: String,
    pub capability: String,
    pub command: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub arguments: Option<Vec<String>>,
}

impl Command {
    /// Power the device's main component on or off
    pub fn set_power(state: PowerState) -> Self {
        Self {
            component: "main".to_string(),
            capability: "switch".to_string(),
            command: state.command().to_string(),
            arguments: None,
        }
    }

    /// Switch the main component's media input to the named source
    pub fn set_source(source: &str) -> Self {
        Self {
            component: "main".to_string(),
            capability: "mediaInputSource".to_string(),
            command: "setInputSource".to_string(),
            arguments: Some(vec![source.to_string()]),
        }
    }
}

/// Envelope posted to the `commands` endpoint
#[derive(Debug, Serialize)]
pub struct CommandRequest {
    pub commands: Vec<Command>,
}

/// Envelope returned by the `commands` endpoint
#[derive(Debug, Deserialize)]
pub struct CommandResponse {
    pub results: Vec<CommandResult>,
}

/// Outcome of one submitted command
#[derive(Debug, Clone, Deserialize)]
pub struct CommandResult {
    pub id: String,
    pub status: String,
}

impl CommandResult {
    pub fn is_accepted(&self) -> bool {
        self.status == "ACCEPTED"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn power_command_omits_arguments() {
        let body = serde_json::to_value(CommandRequest {
            commands: vec![Command::set_power(PowerState::On)],
        })
        .unwrap();

        assert_eq!(
            body,
            json!({
                "commands": [{
                    "component": "main",
                    "capability": "switch",
                    "command": "on"
                }]
            })
        );
    }

    #[test]
    fn source_command_carries_source_argument() {
        let body = serde_json::to_value(CommandRequest {
            commands: vec![Command::set_source("HDMI1")],
        })
        .unwrap();

        assert_eq!(
            body,
            json!({
                "commands": [{
                    "component": "main",
                    "capability": "mediaInputSource",
                    "command": "setInputSource",
                    "arguments": ["HDMI1"]
                }]
            })
        );
    }

    #[test]
    fn power_states_map_to_switch_verbs() {
        assert_eq!(PowerState::On.command(), "on");
        assert_eq!(PowerState::Off.command(), "off");
    }

    #[test]
    fn result_status_gates_acceptance() {
        let accepted: CommandResult =
            serde_json::from_str(r#"{"id":"cmd-1","status":"ACCEPTED"}"#).unwrap();
        let rejected: CommandResult =
            serde_json::from_str(r#"{"id":"cmd-2","status":"FAILED"}"#).unwrap();

        assert!(accepted.is_accepted());
        assert!(!rejected.is_accepted());
    }
}
