use std::process::exit;

use tracing::{error, info};

use board_notifier::{Dispatcher, NotifierConfig, NotionStore, WhatsAppChannel};

fn main() {
    tracing_subscriber::fmt().init();

    let config = match NotifierConfig::from_env() {
        Ok(config) => config,
        Err(err) => {
            error!(%err, "invalid configuration");
            exit(1);
        }
    };

    let mut store = NotionStore::new(config.notion_token.clone(), config.database_id.clone());
    if let Some(base) = config.notion_api_base.as_deref() {
        store = store.with_api_base(base);
    }

    let mut channel = WhatsAppChannel::new(
        config.whatsapp_access_token.clone(),
        config.whatsapp_phone_number_id.clone(),
    );
    if let Some(base) = config.whatsapp_api_base.as_deref() {
        channel = channel.with_api_base(base);
    }

    let dispatcher = Dispatcher::new(&store, &channel, config.whatsapp_group_id.clone());
    match dispatcher.run() {
        Ok(report) => {
            info!(
                processed = report.processed,
                delivered = report.delivered,
                failed = report.failed,
                skipped = report.skipped,
                ack_failures = report.ack_failures,
                "run complete"
            );
        }
        Err(err) => {
            error!(%err, "failed to fetch records");
            exit(1);
        }
    }
}
