use crate::core::config::data::Config;
use crate::core::message::{Sender, Turn};

pub const DEFAULT_PERSONALITY: &str = "neutral";

const CHAOS_STEP: f64 = 0.1;
const CHAOS_THRESHOLD: f64 = 0.5;

/// Mutable conversation state for one run of the client.
///
/// The loop owns exactly one of these and lends it to the engine for each
/// turn. Nothing here is persisted.
#[derive(Debug, Clone)]
pub struct Session {
    history: Vec<Turn>,
    personality: Vec<String>,
    weirdness: f64,
    bot_name: String,
    user_name: String,
}

impl Session {
    pub fn new(bot_name: impl Into<String>, user_name: impl Into<String>) -> Self {
        Self {
            history: Vec::new(),
            personality: vec![DEFAULT_PERSONALITY.to_string()],
            weirdness: 0.0,
            bot_name: bot_name.into(),
            user_name: user_name.into(),
        }
    }

    pub fn from_config(config: &Config) -> Self {
        Self::new(config.bot_name.clone(), config.user_name.clone())
    }

    pub fn history(&self) -> &[Turn] {
        &self.history
    }

    pub fn personality(&self) -> &[String] {
        &self.personality
    }

    pub fn weirdness(&self) -> f64 {
        self.weirdness
    }

    pub fn bot_name(&self) -> &str {
        &self.bot_name
    }

    pub fn user_name(&self) -> &str {
        &self.user_name
    }

    pub fn enter_void_mode(&mut self) -> String {
        self.set_weirdness(1.0);
        self.set_personality(&["mysterious", "dark"]);
        self.bot_name = "Void Seeker".to_string();
        "Entering the void... 🌑".to_string()
    }

    /// Nudge weirdness up one step. Past the threshold the bot turns chaotic.
    pub fn increase_chaos(&mut self) -> String {
        self.set_weirdness((self.weirdness + CHAOS_STEP).min(1.0));
        if self.weirdness > CHAOS_THRESHOLD {
            self.set_personality(&["chaotic", "unpredictable"]);
            self.bot_name = "Chaos Seeker".to_string();
        }
        "Chaos is rising... 🔥".to_string()
    }

    pub fn enter_dream_mode(&mut self) -> String {
        self.set_weirdness(0.2);
        self.set_personality(&["dreamy", "ethereal"]);
        self.bot_name = "Dreamer".to_string();
        "✨ Entering dreamscape... ✨".to_string()
    }

    /// Forget the conversation and calm the bot down. Names are kept.
    pub fn clear(&mut self) -> String {
        self.history.clear();
        self.weirdness = 0.0;
        self.set_personality(&[DEFAULT_PERSONALITY]);
        "Memory purged... 🧠".to_string()
    }

    pub fn set_user_name(&mut self, new_name: impl Into<String>) -> String {
        self.user_name = new_name.into();
        format!("Username changed to {}", self.user_name)
    }

    pub fn append_turn(&mut self, sender: Sender, text: impl Into<String>) {
        self.history.push(Turn::new(sender, text));
    }

    /// Natural-language summary of who the bot currently is, sent alongside
    /// the history on every chat request.
    pub fn render_memory_context(&self) -> String {
        format!(
            "I am {}, a bot with the following traits: {}. \
             My weirdness level is {:.2}. This is the probability of being weird.",
            self.bot_name,
            self.personality.join(", "),
            self.weirdness
        )
    }

    /// One `~` per tenth of weirdness, shown in the input prompt.
    pub fn weirdness_indicator(&self) -> String {
        "~".repeat((self.weirdness * 10.0).floor() as usize)
    }

    fn set_weirdness(&mut self, value: f64) {
        self.weirdness = if value.is_nan() {
            0.0
        } else {
            value.clamp(0.0, 1.0)
        };
    }

    fn set_personality(&mut self, tags: &[&str]) {
        debug_assert!(!tags.is_empty());
        self.personality = tags.iter().map(|tag| tag.to_string()).collect();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPSILON: f64 = 1e-9;

    fn fresh() -> Session {
        Session::new("Chatbot", "You")
    }

    #[test]
    fn new_session_has_neutral_defaults() {
        let session = fresh();
        assert!(session.history().is_empty());
        assert_eq!(session.personality(), ["neutral"]);
        assert_eq!(session.weirdness(), 0.0);
        assert_eq!(session.bot_name(), "Chatbot");
        assert_eq!(session.user_name(), "You");
    }

    #[test]
    fn void_mode_maxes_out_weirdness() {
        let mut session = fresh();
        assert_eq!(session.enter_void_mode(), "Entering the void... 🌑");
        assert_eq!(session.bot_name(), "Void Seeker");
        assert_eq!(session.weirdness(), 1.0);
        assert_eq!(session.personality(), ["mysterious", "dark"]);
    }

    #[test]
    fn dream_mode_sets_gentle_weirdness() {
        let mut session = fresh();
        session.enter_void_mode();
        assert_eq!(session.enter_dream_mode(), "✨ Entering dreamscape... ✨");
        assert_eq!(session.bot_name(), "Dreamer");
        assert!((session.weirdness() - 0.2).abs() < EPSILON);
        assert_eq!(session.personality(), ["dreamy", "ethereal"]);
    }

    #[test]
    fn chaos_turns_chaotic_only_past_the_threshold() {
        let mut session = fresh();
        for _ in 0..3 {
            assert_eq!(session.increase_chaos(), "Chaos is rising... 🔥");
        }
        assert!((session.weirdness() - 0.3).abs() < EPSILON);
        assert_eq!(session.personality(), ["neutral"]);
        assert_eq!(session.bot_name(), "Chatbot");

        session.increase_chaos();
        assert!((session.weirdness() - 0.4).abs() < EPSILON);
        assert_eq!(session.personality(), ["neutral"]);

        for _ in 0..3 {
            session.increase_chaos();
        }
        assert!((session.weirdness() - 0.7).abs() < EPSILON);
        assert_eq!(session.personality(), ["chaotic", "unpredictable"]);
        assert_eq!(session.bot_name(), "Chaos Seeker");
    }

    #[test]
    fn chaos_saturates_at_one() {
        let mut session = fresh();
        for n in 0..50 {
            session.increase_chaos();
            let w = session.weirdness();
            assert!((0.0..=1.0).contains(&w), "call {n} produced {w}");
        }
        assert_eq!(session.weirdness(), 1.0);

        session.enter_void_mode();
        session.increase_chaos();
        assert_eq!(session.weirdness(), 1.0);
    }

    #[test]
    fn clear_resets_everything_but_names() {
        let mut session = fresh();
        session.append_turn(Sender::User, "hi");
        session.append_turn(Sender::Bot, "hello");
        session.enter_void_mode();
        session.set_user_name("Ada");

        assert_eq!(session.clear(), "Memory purged... 🧠");
        assert!(session.history().is_empty());
        assert_eq!(session.weirdness(), 0.0);
        assert_eq!(session.personality(), ["neutral"]);
        assert_eq!(session.bot_name(), "Void Seeker");
        assert_eq!(session.user_name(), "Ada");
    }

    #[test]
    fn user_name_accepts_anything_including_empty() {
        let mut session = fresh();
        assert_eq!(session.set_user_name(""), "Username changed to ");
        assert_eq!(session.user_name(), "");
        session.set_user_name("  spaced out  ");
        assert_eq!(session.user_name(), "  spaced out  ");
    }

    #[test]
    fn history_appends_in_order() {
        let mut session = fresh();
        session.append_turn(Sender::User, "one");
        session.append_turn(Sender::Bot, "two");
        session.append_turn(Sender::User, "three");
        let texts: Vec<&str> = session.history().iter().map(|t| t.text.as_str()).collect();
        assert_eq!(texts, ["one", "two", "three"]);
        assert_eq!(session.history()[1].sender, Sender::Bot);
    }

    #[test]
    fn memory_context_describes_current_identity() {
        let mut session = fresh();
        let calm = session.render_memory_context();
        assert_eq!(
            calm,
            "I am Chatbot, a bot with the following traits: neutral. \
             My weirdness level is 0.00. This is the probability of being weird."
        );
        assert_eq!(calm, session.render_memory_context());

        session.enter_void_mode();
        let context = session.render_memory_context();
        assert!(context.starts_with("I am Void Seeker, a bot with the following traits: mysterious, dark."));
        assert!(context.contains("My weirdness level is 1.00."));

        session.clear();
        session.increase_chaos();
        assert!(session.render_memory_context().contains("0.10"));
    }

    #[test]
    fn weirdness_indicator_tracks_tenths() {
        let mut session = fresh();
        assert_eq!(session.weirdness_indicator(), "");
        session.enter_dream_mode();
        assert_eq!(session.weirdness_indicator(), "~~");
        session.enter_void_mode();
        assert_eq!(session.weirdness_indicator(), "~~~~~~~~~~");
    }
}
