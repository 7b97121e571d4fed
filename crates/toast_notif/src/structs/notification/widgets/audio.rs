use std::fmt::Display;

use crate::{ToXML, ToastError};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
/// Learn More About it here
/// <https://learn.microsoft.com/en-us/uwp/schemas/tiles/toastschema/element-audio>
pub enum Audio {
  #[default]
  Default,
  IM,
  Mail,
  Reminder,
  SMS,
  LoopingAlarm,
  LoopingAlarm2,
  LoopingAlarm3,
  LoopingAlarm4,
  LoopingAlarm5,
  LoopingAlarm6,
  LoopingAlarm7,
  LoopingAlarm8,
  LoopingAlarm9,
  LoopingAlarm10,
  LoopingCall,
  LoopingCall2,
  LoopingCall3,
  LoopingCall4,
  LoopingCall5,
  LoopingCall6,
  LoopingCall7,
  LoopingCall8,
  LoopingCall9,
  LoopingCall10,
  Silent,
}

/// The accepted user facing names, lowercase
pub(crate) const AUDIO_NAMES: [(&str, Audio); 26] = [
  ("default", Audio::Default),
  ("im", Audio::IM),
  ("mail", Audio::Mail),
  ("reminder", Audio::Reminder),
  ("sms", Audio::SMS),
  ("loopingalarm", Audio::LoopingAlarm),
  ("loopingalarm2", Audio::LoopingAlarm2),
  ("loopingalarm3", Audio::LoopingAlarm3),
  ("loopingalarm4", Audio::LoopingAlarm4),
  ("loopingalarm5", Audio::LoopingAlarm5),
  ("loopingalarm6", Audio::LoopingAlarm6),
  ("loopingalarm7", Audio::LoopingAlarm7),
  ("loopingalarm8", Audio::LoopingAlarm8),
  ("loopingalarm9", Audio::LoopingAlarm9),
  ("loopingalarm10", Audio::LoopingAlarm10),
  ("loopingcall", Audio::LoopingCall),
  ("loopingcall2", Audio::LoopingCall2),
  ("loopingcall3", Audio::LoopingCall3),
  ("loopingcall4", Audio::LoopingCall4),
  ("loopingcall5", Audio::LoopingCall5),
  ("loopingcall6", Audio::LoopingCall6),
  ("loopingcall7", Audio::LoopingCall7),
  ("loopingcall8", Audio::LoopingCall8),
  ("loopingcall9", Audio::LoopingCall9),
  ("loopingcall10", Audio::LoopingCall10),
  ("silent", Audio::Silent),
];

impl Audio {
  /// Looks up a user facing name, ignoring case
  pub fn from_name(name: &str) -> Option<Self> {
    let name = name.to_lowercase();
    AUDIO_NAMES
      .iter()
      .find(|(known, _)| *known == name)
      .map(|(_, audio)| *audio)
  }

  pub fn name(&self) -> &'static str {
    AUDIO_NAMES
      .iter()
      .find(|(_, audio)| audio == self)
      .map_or("default", |(name, _)| name)
  }

  pub fn is_silent(&self) -> bool {
    matches!(self, Audio::Silent)
  }

  /// The sound event uri, `None` for [`Audio::Silent`]
  pub fn src(&self) -> Option<&'static str> {
    let src = match self {
      Self::Default => "ms-winsoundevent:Notification.Default",
      Self::IM => "ms-winsoundevent:Notification.IM",
      Self::Mail => "ms-winsoundevent:Notification.Mail",
      Self::Reminder => "ms-winsoundevent:Notification.Reminder",
      Self::SMS => "ms-winsoundevent:Notification.SMS",
      Self::LoopingAlarm => "ms-winsoundevent:Notification.Looping.Alarm",
      Self::LoopingAlarm2 => "ms-winsoundevent:Notification.Looping.Alarm2",
      Self::LoopingAlarm3 => "ms-winsoundevent:Notification.Looping.Alarm3",
      Self::LoopingAlarm4 => "ms-winsoundevent:Notification.Looping.Alarm4",
      Self::LoopingAlarm5 => "ms-winsoundevent:Notification.Looping.Alarm5",
      Self::LoopingAlarm6 => "ms-winsoundevent:Notification.Looping.Alarm6",
      Self::LoopingAlarm7 => "ms-winsoundevent:Notification.Looping.Alarm7",
      Self::LoopingAlarm8 => "ms-winsoundevent:Notification.Looping.Alarm8",
      Self::LoopingAlarm9 => "ms-winsoundevent:Notification.Looping.Alarm9",
      Self::LoopingAlarm10 => "ms-winsoundevent:Notification.Looping.Alarm10",
      Self::LoopingCall => "ms-winsoundevent:Notification.Looping.Call",
      Self::LoopingCall2 => "ms-winsoundevent:Notification.Looping.Call2",
      Self::LoopingCall3 => "ms-winsoundevent:Notification.Looping.Call3",
      Self::LoopingCall4 => "ms-winsoundevent:Notification.Looping.Call4",
      Self::LoopingCall5 => "ms-winsoundevent:Notification.Looping.Call5",
      Self::LoopingCall6 => "ms-winsoundevent:Notification.Looping.Call6",
      Self::LoopingCall7 => "ms-winsoundevent:Notification.Looping.Call7",
      Self::LoopingCall8 => "ms-winsoundevent:Notification.Looping.Call8",
      Self::LoopingCall9 => "ms-winsoundevent:Notification.Looping.Call9",
      Self::LoopingCall10 => "ms-winsoundevent:Notification.Looping.Call10",
      Self::Silent => return None,
    };

    Some(src)
  }
}

impl Display for Audio {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    f.write_str(self.name())
  }
}

/// The `<audio>` element of a toast
pub struct Sound {
  audio: Audio,
  r#loop: bool,
}

impl Sound {
  pub fn new(audio: Audio, r#loop: bool) -> Self {
    Self { audio, r#loop }
  }
}

impl ToXML for Sound {
  fn to_xml(&self) -> Result<String, ToastError> {
    Ok(match self.audio.src() {
      Some(src) => format!(r#"<audio src="{}" loop="{}" />"#, src, self.r#loop),
      None => r#"<audio silent="true" />"#.to_string(),
    })
  }
}
