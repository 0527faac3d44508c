use confique::Config;

/// Configuration for the client handler's outbound calls
#[derive(Debug, Config, Clone, Default)]
pub struct RelayConfig {
    /// URL of the protected downstream API the client handler calls
    #[config(env = "M2M_RELAY_API_URL", default = "")]
    pub api_url: String,

    /// Timeout for each outbound request in seconds (default: 5).
    /// Applies to the token exchange and the downstream call alike.
    #[config(env = "M2M_RELAY_REQUEST_TIMEOUT", default = 5)]
    pub request_timeout: u64,

    /// Timeout for establishing outbound connections in seconds (default: 2)
    #[config(env = "M2M_RELAY_CONNECT_TIMEOUT", default = 2)]
    pub connect_timeout: u64,
}
