pub mod adapters;
pub mod channel;
pub mod config;
pub mod dispatch;
pub mod message;
pub mod notion;
pub mod record;

pub use adapters::whatsapp::WhatsAppChannel;
pub use channel::{ChannelError, DeliveryChannel, SendResult};
pub use config::{ConfigError, NotifierConfig};
pub use dispatch::{Dispatcher, RecordOutcome, RunReport};
pub use message::format_message;
pub use notion::{NotionStore, RecordStore, StoreError};
pub use record::{Record, SendStatus};
