//! Resolution of user facing audio and duration names, and of icon paths.
//!
//! An unknown name still yields a usable value. The error travels next to it
//! so a command line front end can warn and carry on while a library caller
//! can refuse the input.

use std::{
  io,
  path::{self, Path},
};

use crate::{Audio, ToastDuration, ToastError};

/// A resolved value together with the error raised while resolving it
#[derive(Debug)]
pub struct Resolved<T> {
  value: T,
  error: Option<ToastError>,
}

impl<T> Resolved<T> {
  fn ok(value: T) -> Self {
    Self { value, error: None }
  }

  fn fallback(value: T, error: ToastError) -> Self {
    Self {
      value,
      error: Some(error),
    }
  }

  /// The resolved value, or the fallback when the name was not recognized
  pub fn value(&self) -> &T {
    &self.value
  }

  pub fn error(&self) -> Option<&ToastError> {
    self.error.as_ref()
  }

  pub fn is_ok(&self) -> bool {
    self.error.is_none()
  }

  pub fn into_parts(self) -> (T, Option<ToastError>) {
    (self.value, self.error)
  }

  /// Strict handling: drops the fallback when there was an error
  pub fn into_result(self) -> Result<T, ToastError> {
    match self.error {
      Some(error) => Err(error),
      None => Ok(self.value),
    }
  }
}

/// Resolves one of `default, im, mail, reminder, sms, loopingalarm,
/// loopingalarm2..10, loopingcall, loopingcall2..10, silent`, ignoring case.
///
/// Any other name gives [`Audio::Default`] with [`ToastError::InvalidAudio`].
pub fn resolve_audio(name: &str) -> Resolved<Audio> {
  match Audio::from_name(name) {
    Some(audio) => Resolved::ok(audio),
    None => Resolved::fallback(Audio::Default, ToastError::InvalidAudio(name.to_string())),
  }
}

/// Resolves `short` or `long`, ignoring case.
///
/// Any other name gives [`ToastDuration::Short`] with [`ToastError::InvalidDuration`].
pub fn resolve_duration(name: &str) -> Resolved<ToastDuration> {
  match ToastDuration::from_name(name) {
    Some(duration) => Resolved::ok(duration),
    None => Resolved::fallback(
      ToastDuration::Short,
      ToastError::InvalidDuration(name.to_string()),
    ),
  }
}

/// Makes `icon_path` absolute for use as a toast or registration icon.
///
/// An empty path means "no icon" and resolves to an empty string. Paths that
/// cannot be made absolute, or are not valid unicode, give
/// [`ToastError::PathResolution`].
pub fn resolve_icon<P: AsRef<Path>>(icon_path: P) -> Result<String, ToastError> {
  let icon_path = icon_path.as_ref();
  if icon_path.as_os_str().is_empty() {
    return Ok(String::new());
  }

  let resolution_error = |source| ToastError::PathResolution {
    path: icon_path.to_path_buf(),
    source,
  };

  let absolute = path::absolute(icon_path).map_err(resolution_error)?;

  absolute
    .to_str()
    .map(str::to_string)
    .ok_or_else(|| {
      resolution_error(io::Error::new(
        io::ErrorKind::InvalidData,
        "icon path is not valid unicode",
      ))
    })
}
