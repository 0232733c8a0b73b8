//! Expert registration handlers

use crate::CpjServerHandler;
use crate::formatting;
use crate::handlers::to_mcp_error;
use mcp_attr::Result as McpResult;

impl CpjServerHandler {
    /// Registers (or re-registers) an expert by full name.
    pub async fn handle_register_expert(
        &self,
        name: String,
        national_id: String,
        phone: String,
        profession: String,
    ) -> McpResult<String> {
        let expert = self
            .lock_agenda()
            .register_expert(&name, &national_id, &phone, &profession)
            .map_err(to_mcp_error)?;

        Ok(format!(
            "Expert {} registered successfully (CPF: {})",
            expert.name, expert.national_id
        ))
    }

    /// Lists registered experts, sorted by name.
    pub async fn handle_list_experts(&self) -> McpResult<String> {
        let experts = self.lock_agenda().experts();
        Ok(formatting::format_experts(&experts))
    }
}
