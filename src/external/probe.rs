use log::trace;
use reqwest::blocking::Client;

use crate::error::Result;

/// Existence checks against the remote host.
pub trait RemoteProbe: Sync {
    /// Returns the HTTP status of `url`. Transport failures are errors.
    fn status(&self, url: &str) -> Result<u16>;
}

/// [`RemoteProbe`] issuing `GET` requests.
#[derive(Debug, Clone)]
pub struct HttpProbe {
    client: Client,
}

impl HttpProbe {
    pub fn new() -> Result<Self> {
        let client = Client::builder()
            .user_agent(concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION")))
            .build()?;
        Ok(Self { client })
    }
}

impl RemoteProbe for HttpProbe {
    fn status(&self, url: &str) -> Result<u16> {
        let status = self.client.get(url).send()?.status().as_u16();
        trace!("GET {url} -> {status}");
        Ok(status)
    }
}
