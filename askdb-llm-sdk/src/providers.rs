//! Provider name constants
//!
//! This module defines canonical gateway and provider names used throughout the SDK

/// CalypsoAI prompt gateway
pub const CALYPSO: &str = "calypso";

/// Provider id the gateway forwards prompts to when none is configured
pub const DEFAULT_PROVIDER: &str = "gpt-4o-mini";
