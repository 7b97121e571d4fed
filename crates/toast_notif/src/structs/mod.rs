pub mod host;
pub mod manager;
pub mod notification;
pub mod resolve;
pub mod script;
pub mod stage;

pub use host::{DispatchError, ScriptHost};
pub use manager::ToastManager;
pub use notification::{
  actions::Action, audio::Audio, Notification, ToastDuration, DEFAULT_ACTIVATION_TYPE,
};
pub use resolve::{resolve_audio, resolve_duration, resolve_icon, Resolved};
pub use stage::{stage, stage_in};

use crate::ToastError;

/// Projection of a model value into toast XML.
///
/// Fails instead of panicking when a value cannot be represented in XML.
pub trait ToXML {
  fn to_xml(&self) -> Result<String, ToastError>;
}
