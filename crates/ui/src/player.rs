use dioxus::document::eval;
use quiz_core::model::MediaSource;
use services::MediaPlayer;

/// Element id shared by the `<video>` and the YouTube `<iframe>`.
pub const PLAYER_ELEMENT_ID: &str = "quiz-player";

/// Drives the player element rendered by the quiz view through page scripts.
///
/// The element itself (and its `src`) is rendered from the view model; this
/// type only issues play/pause/volume calls to it.
#[derive(Debug, Clone, Copy, Default)]
pub struct DomMediaPlayer {
    embedded: bool,
}

impl DomMediaPlayer {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    fn run(&self, action: PlayerAction) {
        let _ = eval(&player_script(self.embedded, action));
    }
}

impl MediaPlayer for DomMediaPlayer {
    fn load(&mut self, source: &MediaSource) {
        self.embedded = source.is_embedded();
    }

    fn set_playing(&mut self, playing: bool) {
        self.run(if playing {
            PlayerAction::Play
        } else {
            PlayerAction::Pause
        });
    }

    fn set_volume(&mut self, volume: f32) {
        self.run(PlayerAction::Volume(volume));
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub(crate) enum PlayerAction {
    Play,
    Pause,
    Volume(f32),
}

/// Script applying `action` to the player element, if it is on the page.
pub(crate) fn player_script(embedded: bool, action: PlayerAction) -> String {
    if embedded {
        let (func, args) = match action {
            PlayerAction::Play => ("playVideo", String::new()),
            PlayerAction::Pause => ("pauseVideo", String::new()),
            PlayerAction::Volume(v) => ("setVolume", format!("{}", (v * 100.0).round())),
        };
        format!(
            r#"(function() {{
                const el = document.getElementById({PLAYER_ELEMENT_ID:?});
                if (!el || !el.contentWindow) return;
                el.contentWindow.postMessage(JSON.stringify({{
                    event: "command", func: {func:?}, args: [{args}]
                }}), "*");
            }})();"#
        )
    } else {
        let body = match action {
            PlayerAction::Play => "el.play().catch(function() {});".to_string(),
            PlayerAction::Pause => "el.pause();".to_string(),
            PlayerAction::Volume(v) => format!("el.volume = {v};"),
        };
        format!(
            r#"(function() {{
                const el = document.getElementById({PLAYER_ELEMENT_ID:?});
                if (!el) return;
                {body}
            }})();"#
        )
    }
}

/// Script that forwards YouTube iframe API messages to the host as strings.
///
/// Each forwarded value is the raw JSON the iframe posted; see
/// `MediaEvent::from_player_message`.
pub fn player_bridge_script() -> &'static str {
    r#"
        window.addEventListener("message", function(e) {
            if (typeof e.data !== "string") return;
            if (String(e.origin).indexOf("youtube") === -1) return;
            dioxus.send(e.data);
        });
        await new Promise(function() {});
    "#
}

/// Script asking a freshly loaded YouTube iframe to start posting events.
pub fn youtube_listen_script() -> String {
    format!(
        r#"(function() {{
            const el = document.getElementById({PLAYER_ELEMENT_ID:?});
            if (!el || !el.contentWindow) return;
            el.contentWindow.postMessage(JSON.stringify({{
                event: "listening", id: {PLAYER_ELEMENT_ID:?}, channel: "widget"
            }}), "*");
        }})();"#
    )
}
