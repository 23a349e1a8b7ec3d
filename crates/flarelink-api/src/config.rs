use url::Url;

use crate::error::Error;
use crate::transport::TransportConfig;

/// Default REST port for VAN SDN controllers.
pub const DEFAULT_PORT: u16 = 8443;

/// Connection settings for one controller.
///
/// The service root is derived from these values once, up front;
/// nothing in the client mutates it afterwards.
#[derive(Debug, Clone)]
pub struct ControllerConfig {
    /// Controller hostname or IP address (no scheme, no port).
    pub address: String,
    /// REST port, normally [`DEFAULT_PORT`].
    pub port: u16,
    /// TLS and timeout settings.
    pub transport: TransportConfig,
}

impl ControllerConfig {
    /// Config for a controller at `address` with default port and transport.
    pub fn new(address: impl Into<String>) -> Self {
        Self {
            address: address.into(),
            port: DEFAULT_PORT,
            transport: TransportConfig::default(),
        }
    }

    /// Override the REST port.
    #[must_use]
    pub fn with_port(mut self, port: u16) -> Self {
        self.port = port;
        self
    }

    /// Override transport settings.
    #[must_use]
    pub fn with_transport(mut self, transport: TransportConfig) -> Self {
        self.transport = transport;
        self
    }

    /// The service root every resource URL hangs off:
    /// `https://{address}:{port}/sdn/v2.0/`
    ///
    /// The trailing slash matters -- `Url::join` would otherwise drop
    /// the last path segment.
    pub fn base_url(&self) -> Result<Url, Error> {
        let url = Url::parse(&format!(
            "https://{}:{}/sdn/v2.0/",
            self.address, self.port
        ))?;
        Ok(url)
    }
}
