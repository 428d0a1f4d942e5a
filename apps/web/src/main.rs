use std::sync::Arc;

use anyhow::Result;
use common::{config::ClientConfig, user_api::HttpUserApi};
use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::sync::mpsc;
use tracing::{info, warn};

use web::form::{Alert, Field, SubmitOutcome};
use web::{Navigator, RegistrationForm, Route};

/// Forwards navigation requests to the driver loop
struct ChannelNavigator {
    tx: mpsc::UnboundedSender<Route>,
}

impl Navigator for ChannelNavigator {
    fn navigate(&self, route: Route) {
        if self.tx.send(route).is_err() {
            warn!("Navigation requested after the driver stopped listening");
        }
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize tracing
    web::telemetry::init();

    info!("Starting registration client");

    let config = ClientConfig::from_env()?;
    let api = HttpUserApi::new(&config)?;

    let (tx, mut rx) = mpsc::unbounded_channel();
    let navigator = Arc::new(ChannelNavigator { tx });
    let form = RegistrationForm::new(api, navigator, config.redirect_delay());

    // One line per field, in form order
    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    for field in Field::ALL {
        eprint!("{}: ", field.label());
        let value = lines.next_line().await?.unwrap_or_default();
        form.set_field(field, value.trim_end()).await;
    }

    if let Some(strength) = form.strength().await {
        println!("{}", strength.caption());
    }

    let outcome = form.submit().await;
    if let Some(alert) = form.snapshot().await.alert {
        println!("[{}] {}", Alert::ROLE, alert.message);
    }

    match outcome {
        SubmitOutcome::Registered => {
            if let Some(route) = rx.recv().await {
                info!("Navigated to {}", route);
                println!("{}", route);
            }
        }
        other => {
            form.teardown().await;
            anyhow::bail!("Registration did not complete: {:?}", other);
        }
    }

    Ok(())
}
