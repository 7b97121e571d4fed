use std::path::PathBuf;

use clap::Parser;
use toast_notif::{
    Action, Audio, DEFAULT_ACTIVATION_TYPE, Notification, ToastDuration, ToastError,
    resolve_audio, resolve_duration,
};

#[derive(Parser, Debug)]
#[command(name = "toast")]
#[command(about = "Windows 10/11 toasts")]
#[command(version)]
/// Command-line arguments.
pub struct Cli {
    /// The app identifier (used for grouping multiple toasts)
    #[arg(long = "app-id", visible_alias = "id", default_value = "")]
    pub app_id: String,

    /// The main toast title/heading
    #[arg(long, short = 't', default_value = "")]
    pub title: String,

    /// The toast's main message (new lines as separator)
    #[arg(long, short = 'm', default_value = "")]
    pub message: String,

    /// The app icon path (displays to the left of the toast)
    #[arg(long, short = 'i')]
    pub icon: Option<PathBuf>,

    /// The type of action to invoke when the user clicks the toast
    #[arg(long, default_value = DEFAULT_ACTIVATION_TYPE)]
    pub activation_type: String,

    /// The activation argument
    #[arg(long = "activation-arg", default_value = "")]
    pub activation_arg: String,

    /// Optional action button (repeatable)
    #[arg(long = "action")]
    pub actions: Vec<String>,

    /// The type of action button, matched to --action by position
    #[arg(long = "action-type")]
    pub action_types: Vec<String>,

    /// The action button argument, matched to --action by position
    #[arg(long = "action-arg")]
    pub action_args: Vec<String>,

    /// Which kind of audio should be played
    #[arg(long, default_value = "silent")]
    pub audio: String,

    /// Whether to loop the audio
    #[arg(long = "loop")]
    pub looping: bool,

    /// How long the toast should display for (short, long)
    #[arg(long, default_value = "short")]
    pub duration: String,

    /// Register the app id (with --display-name and --icon) before showing the toast
    #[arg(long)]
    pub register: bool,

    /// Display name used when registering the app id
    #[arg(long, requires = "register")]
    pub display_name: Option<String>,

    /// Log the generated PowerShell scripts
    #[arg(long, short = 'v')]
    pub verbose: bool,

    /// Path of the config file (defaults to ~/.toast/config.json)
    #[arg(long)]
    pub config: Option<PathBuf>,
}

impl Cli {
    /// Pairs every --action label with the type and argument at the same position
    pub fn actions(&self) -> Vec<Action> {
        self.actions
            .iter()
            .enumerate()
            .map(|(index, label)| {
                Action::new(
                    self.action_types
                        .get(index)
                        .map_or(DEFAULT_ACTIVATION_TYPE, String::as_str),
                    label.as_str(),
                    self.action_args.get(index).map_or("", String::as_str),
                )
            })
            .collect()
    }

    /// Resolves the audio name, falling back to the default sound on unknown names
    pub fn audio(&self) -> (Audio, Option<ToastError>) {
        resolve_audio(&self.audio).into_parts()
    }

    /// Resolves the duration name, falling back to short on unknown names
    pub fn duration(&self) -> (ToastDuration, Option<ToastError>) {
        resolve_duration(&self.duration).into_parts()
    }

    /// Builds the standalone notification, `icon` is the resolved icon path or empty
    pub fn notification(&self, icon: &str, audio: Audio, duration: ToastDuration) -> Notification {
        Notification::new()
            .with_app_id(&self.app_id)
            .with_title(&self.title)
            .with_message(&self.message)
            .with_icon(icon)
            .with_activation_type(&self.activation_type)
            .with_activation_arguments(&self.activation_arg)
            .actions(self.actions())
            .with_audio(audio)
            .with_loop(self.looping)
            .with_duration(duration)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(args: &[&str]) -> Cli {
        Cli::try_parse_from(std::iter::once("toast").chain(args.iter().copied())).unwrap()
    }

    #[test]
    fn test_defaults() {
        let cli = parse(&[]);

        assert_eq!(cli.activation_type, "protocol");
        assert_eq!(cli.audio().0, Audio::Silent);
        assert_eq!(cli.duration().0, ToastDuration::Short);
        assert!(cli.actions().is_empty());
        assert!(!cli.register);
    }

    #[test]
    fn test_actions_are_aligned_by_index() {
        let cli = parse(&[
            "--action",
            "Open Maps",
            "--action-arg",
            "bingmaps:?q=sushi",
            "--action",
            "Cancel",
            "--action",
            "Snooze",
            "--action-type",
            "protocol",
            "--action-type",
            "background",
        ]);

        assert_eq!(
            cli.actions(),
            vec![
                Action::new("protocol", "Open Maps", "bingmaps:?q=sushi"),
                Action::new("background", "Cancel", ""),
                Action::new("protocol", "Snooze", ""),
            ]
        );
    }

    #[test]
    fn test_id_alias() {
        let cli = parse(&["--id", "com.example.app", "-t", "Hi", "-m", "There"]);

        assert_eq!(cli.app_id, "com.example.app");
        assert_eq!(cli.title, "Hi");
        assert_eq!(cli.message, "There");
    }

    #[test]
    fn test_invalid_names_fall_back() {
        let cli = parse(&["--audio", "trumpet", "--duration", "forever"]);

        let (audio, audio_err) = cli.audio();
        let (duration, duration_err) = cli.duration();

        assert_eq!(audio, Audio::Default);
        assert!(matches!(audio_err, Some(ToastError::InvalidAudio(_))));
        assert_eq!(duration, ToastDuration::Short);
        assert!(matches!(duration_err, Some(ToastError::InvalidDuration(_))));
    }

    #[test]
    fn test_notification() {
        let cli = parse(&[
            "-t",
            "Alarm",
            "--audio",
            "LoopingAlarm3",
            "--loop",
            "--duration",
            "long",
            "--activation-arg",
            "https://example.com",
        ]);

        let notification = cli.notification("", cli.audio().0, cli.duration().0);

        assert_eq!(notification.title, "Alarm");
        assert_eq!(notification.audio, Some(Audio::LoopingAlarm3));
        assert!(notification.looping);
        assert_eq!(notification.duration, Some(ToastDuration::Long));
        assert_eq!(notification.activation_arguments, "https://example.com");
        assert_eq!(notification.icon, "");
    }

    #[test]
    fn test_register() {
        assert!(parse(&["--register"]).icon.is_none());

        let cli = parse(&["--register", "-i", "icon.png", "--display-name", "App"]);
        assert!(cli.register);
        assert_eq!(cli.display_name.as_deref(), Some("App"));
    }

    #[test]
    fn test_display_name_requires_register() {
        let result = Cli::try_parse_from(["toast", "--display-name", "App"]);
        assert!(result.is_err());
    }
}
