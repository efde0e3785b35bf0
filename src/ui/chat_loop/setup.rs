use std::error::Error;

use tracing::info;

use crate::core::{
    config::Config,
    engine::ConversationEngine,
    session::Session,
    transport::{HttpTransport, TransportError},
};

/// Everything the chat loop needs, built from configuration.
pub struct Bootstrap {
    pub config: Config,
    pub session: Session,
    pub engine: ConversationEngine,
}

/// Load the configuration file and build the session and engine from it.
pub fn bootstrap() -> Result<Bootstrap, Box<dyn Error>> {
    let config = Config::load()?;
    Ok(bootstrap_with_config(config)?)
}

pub fn bootstrap_with_config(config: Config) -> Result<Bootstrap, TransportError> {
    let transport = HttpTransport::from_config(&config)?;
    info!(endpoint = transport.endpoint(), "chat endpoint configured");

    let session = Session::from_config(&config);
    let engine = ConversationEngine::new(Box::new(transport));
    Ok(Bootstrap {
        config,
        session,
        engine,
    })
}
