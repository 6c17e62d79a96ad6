use super::{command::Command, rules, state::GameState};

/// Answer to a legality query. A rejection always carries a reason.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LegalityVerdict {
    legal: bool,
    reason: String,
}

impl LegalityVerdict {
    pub fn legal() -> Self {
        Self { legal: true, reason: String::new() }
    }

    pub fn rejected(reason: impl Into<String>) -> Self {
        let reason = reason.into();
        debug_assert!(!reason.is_empty());
        Self { legal: false, reason }
    }

    pub fn is_legal(&self) -> bool {
        self.legal
    }

    pub fn reason(&self) -> &str {
        &self.reason
    }
}

/// Read-only legality advisor over any state it is handed.
///
/// The oracle runs the same rules the controller enforces, so asking it
/// about a command and submitting that command to the controller agree on
/// any given state. It never mutates anything.
#[derive(Debug, Default)]
pub struct StateOracle;

impl StateOracle {
    pub fn new() -> Self {
        Self
    }

    pub fn check_command(&self, state: &GameState, command: &Command) -> bool {
        rules::validate(state, command).is_ok()
    }

    /// Verdict with diagnostics. `verbose` renders the full violation chain
    /// for rejection logging; otherwise the reason just names the command.
    pub fn check_command_detailed(
        &self,
        state: &GameState,
        command: &Command,
        verbose: bool,
    ) -> LegalityVerdict {
        match rules::validate(state, command) {
            Ok(()) => LegalityVerdict::legal(),
            Err(err) if verbose => LegalityVerdict::rejected(format!("{:#}", err)),
            Err(err) => LegalityVerdict::rejected(err.to_string()),
        }
    }
}
