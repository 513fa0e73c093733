//! Mailfold client: server API calls and effect execution.
mod api;
mod engine;
mod settings;
mod types;

pub use api::{MailfoldApi, ReqwestApi};
pub use engine::{ClientEvents, ClientHandle};
pub use settings::ClientSettings;
pub use types::{ApiError, ClientEvent, EmailEntry, StoredEmail, UploadFile};
