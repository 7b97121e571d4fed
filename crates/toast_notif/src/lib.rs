//! Toast Notif
//!
//! Builds the XML payload of a Windows toast notification and shows it by
//! handing a generated PowerShell script to the scripting host.
//!
//! The pipeline for one toast is: resolve the user facing names into
//! [`Audio`] / [`ToastDuration`], build a [`Notification`], apply defaults,
//! render the XML, stage the script in the temp dir and run it with a
//! [`ScriptHost`].
//!
//! # Example
//! ```no_run
//! use toast_notif::{ToastError, ToastManager};
//!
//! fn main() -> Result<(), ToastError> {
//!   let manager = ToastManager::new("com.windows.app", "Windows App", "icon.png")?;
//!   let toast = manager.new_simple_toast("Hello World", "Lorem ipsum dolor sit amet.");
//!
//!   manager.show(&toast)
//! }
//! ```

#[macro_export]
#[doc(hidden)]
macro_rules! map {
  ($x:expr) => {
    $x.iter()
      .map(|x| x.to_xml())
      .collect::<Result<Vec<_>, _>>()
      .map(|x| x.join("\n"))
  };
}

mod structs;

use std::{io, path::PathBuf};

use thiserror::Error;

pub use structs::*;

/// Every failure the build & dispatch pipeline can report
#[derive(Debug, Error)]
pub enum ToastError {
  /// The audio name is not one of the recognized names.
  /// Returned next to a usable fallback by [`resolve_audio`]
  #[error("invalid audio: {0:?}")]
  InvalidAudio(String),

  /// The duration name is not `short` or `long`.
  /// Returned next to a usable fallback by [`resolve_duration`]
  #[error("invalid duration: {0:?}")]
  InvalidDuration(String),

  #[error("failed to resolve icon path {}: {source}", .path.display())]
  PathResolution { path: PathBuf, source: io::Error },

  #[error("failed to register app id {app_id:?}: {source}")]
  Registration {
    app_id: String,
    source: Box<ToastError>,
  },

  #[error("failed to render notification: {0}")]
  Render(String),

  #[error("failed to stage script at {}: {source}", .path.display())]
  Stage { path: PathBuf, source: io::Error },

  #[error("failed to dispatch script: {0}")]
  Dispatch(#[from] DispatchError),
}

impl ToastError {
  /// `true` for the resolver errors that come with a fallback value
  pub fn is_invalid_name(&self) -> bool {
    matches!(
      self,
      ToastError::InvalidAudio(_) | ToastError::InvalidDuration(_)
    )
  }
}
