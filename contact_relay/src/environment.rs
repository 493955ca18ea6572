use std::{net::SocketAddr, sync::Arc};

use contact_relay_api_rest::RestServerConfig;
use contact_relay_config::Config;
use contact_relay_core_contact_impl::{ContactServiceConfig, ContactServiceImpl};
use contact_relay_email_impl::EmailServiceImpl;
use contact_relay_models::email_address::EmailAddress;

/// Every contact message is delivered to this address.
pub const DEFAULT_RECIPIENT: &str = "solo991@ukr.net";

pub type Email = EmailServiceImpl;
pub type Contact = ContactServiceImpl<Email>;
pub type RestServer = contact_relay_api_rest::RestServer<Contact>;

/// Wire up the http server. The email service is shared by all requests.
pub fn build(config: &Config, email: Email) -> anyhow::Result<RestServer> {
    let recipient = DEFAULT_RECIPIENT.parse::<EmailAddress>()?;
    let contact = ContactServiceImpl::new(
        email,
        ContactServiceConfig {
            recipient: Arc::new(recipient),
        },
    );

    let rest_server_config = RestServerConfig {
        addr: SocketAddr::new(config.http.host, config.http.port),
    };

    Ok(RestServer::new(rest_server_config, contact))
}
