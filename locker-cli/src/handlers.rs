use serde::{Deserialize, Serialize};

use locker_core::types::{Confirmation, LockerId, PoolStatus, SizeClass, Ticket};

// ─── Request Types ──────────────────────────────────────────────────────────

#[derive(Deserialize)]
pub struct DepositRequest {
    pub size: String,
}

impl DepositRequest {
    pub fn validate(&self) -> Result<SizeClass, String> {
        if self.size.trim().is_empty() {
            return Err("size is required".to_string());
        }
        self.size.parse()
    }
}

#[derive(Deserialize)]
pub struct PickupRequest {
    pub code: String,
}

impl PickupRequest {
    pub fn validate(&self) -> Result<&str, String> {
        let code = self.code.trim();
        if code.is_empty() {
            return Err("code is required".to_string());
        }
        Ok(code)
    }
}

// ─── Response Types ─────────────────────────────────────────────────────────

#[derive(Serialize)]
pub struct ApiResponse<T: Serialize> {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl<T: Serialize> ApiResponse<T> {
    pub fn ok(data: T) -> Self {
        Self {
            success: true,
            data: Some(data),
            error: None,
        }
    }

    pub fn err(msg: impl Into<String>) -> Self {
        Self {
            success: false,
            data: None,
            error: Some(msg.into()),
        }
    }
}

#[derive(Serialize)]
pub struct TicketResponse {
    pub locker_id: String,
    pub size: SizeClass,
    pub code: String,
    pub created_at: u64,
    pub expires_after: u64,
}

impl TicketResponse {
    pub fn new(ticket: &Ticket, retention_ms: u64) -> Self {
        Self {
            locker_id: ticket.locker_id.to_string(),
            size: ticket.locker_id.size_class(),
            code: ticket.code.clone(),
            created_at: ticket.created_at,
            expires_after: ticket.created_at.saturating_add(retention_ms),
        }
    }
}

/// Listing view of an active ticket. The retrieval code stays with the
/// depositor and is never listed.
#[derive(Serialize)]
pub struct TicketSummary {
    pub locker_id: String,
    pub size: SizeClass,
    pub created_at: u64,
    pub expires_after: u64,
}

impl TicketSummary {
    pub fn new(ticket: &Ticket, retention_ms: u64) -> Self {
        Self {
            locker_id: ticket.locker_id.to_string(),
            size: ticket.locker_id.size_class(),
            created_at: ticket.created_at,
            expires_after: ticket.created_at.saturating_add(retention_ms),
        }
    }
}

#[derive(Serialize)]
pub struct PickupResponse {
    pub locker_id: String,
    pub message: String,
}

impl From<Confirmation> for PickupResponse {
    fn from(confirmation: Confirmation) -> Self {
        Self {
            message: confirmation.message(),
            locker_id: confirmation.locker_id.to_string(),
        }
    }
}

#[derive(Serialize)]
pub struct SweepResponse {
    pub reclaimed: Vec<LockerId>,
}

#[derive(Serialize)]
pub struct HealthResponse {
    pub status: String,
    pub active_tickets: usize,
    pub version: String,
}

#[derive(Serialize)]
pub struct LockersResponse {
    #[serde(flatten)]
    pub status: PoolStatus,
    pub total: usize,
}
