//! Domain constants
//!
//! Defaults shared by the client, the dev server and the CLI.

// Request defaults
pub const DEFAULT_LANGUAGE: &str = "zh";

// API client
pub const DEFAULT_API_ORIGIN: &str = "http://localhost:3000";
pub const DEFAULT_API_BASE_PATH: &str = "/api";

// Dev server
pub const DEFAULT_DEV_HOST: &str = "127.0.0.1";
pub const DEFAULT_DEV_PORT: u16 = 3000;
pub const DEFAULT_PROXY_TARGET: &str = "http://localhost:8000";

// Chat turn keys
pub const ROLE_USER: &str = "user";
pub const ROLE_ASSISTANT: &str = "assistant";
