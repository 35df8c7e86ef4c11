//! Workflow configuration

/// Deployment knobs for the support-ticket workflow.
///
/// `from_env` reads the `TICKETFLOW_*` variables; anything unset keeps its
/// default. Flags accept `1`, `true` or `yes` (case-insensitive).
#[derive(Debug, Clone)]
pub struct WorkflowConfig {
    /// Recipient for validated-feedback notifications
    pub support_team_email: String,
    /// Recipient for product-complaint notifications
    pub product_team_email: String,
    /// Treat an empty review answer as approval of every pending ticket
    pub auto_validate_negative: bool,
    /// Surface sends as tool calls through the suspension channel instead of
    /// calling the transport directly
    pub show_send_as_tool: bool,
}

impl Default for WorkflowConfig {
    fn default() -> Self {
        Self {
            support_team_email: "support-team@ticketflow.local".to_string(),
            product_team_email: "product-team@ticketflow.local".to_string(),
            auto_validate_negative: false,
            show_send_as_tool: false,
        }
    }
}

impl WorkflowConfig {
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            support_team_email: env_string("TICKETFLOW_SUPPORT_EMAIL")
                .unwrap_or(defaults.support_team_email),
            product_team_email: env_string("TICKETFLOW_PRODUCT_EMAIL")
                .unwrap_or(defaults.product_team_email),
            auto_validate_negative: env_flag("TICKETFLOW_AUTO_VALIDATE"),
            show_send_as_tool: env_flag("TICKETFLOW_SEND_AS_TOOL"),
        }
    }
}

fn env_string(key: &str) -> Option<String> {
    std::env::var(key).ok().filter(|v| !v.trim().is_empty())
}

fn env_flag(key: &str) -> bool {
    std::env::var(key)
        .map(|v| matches!(v.trim().to_lowercase().as_str(), "1" | "true" | "yes"))
        .unwrap_or(false)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = WorkflowConfig::default();
        assert!(config.support_team_email.contains('@'));
        assert!(!config.auto_validate_negative);
        assert!(!config.show_send_as_tool);
    }

    #[test]
    fn test_flag_parsing() {
        // env_flag semantics, exercised via a variable we control
        std::env::set_var("TICKETFLOW_TEST_FLAG", "YES");
        assert!(env_flag("TICKETFLOW_TEST_FLAG"));
        std::env::set_var("TICKETFLOW_TEST_FLAG", "off");
        assert!(!env_flag("TICKETFLOW_TEST_FLAG"));
        std::env::remove_var("TICKETFLOW_TEST_FLAG");
        assert!(!env_flag("TICKETFLOW_TEST_FLAG"));
    }
}
