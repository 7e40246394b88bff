//! Gated diagnostic output to stderr.
//!
//! Each channel is switched by one named flag on [`TalkConfig`] instead of
//! process-global state, so two callers can hold different configurations at
//! once. Every emitter comes in an eager form and a `*_with` lazy form whose
//! producer only runs when the channel is enabled, so an expensive message
//! nobody will see is never computed.

/// Output switches, owned by the caller and passed in explicitly.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TalkConfig {
    pub verbose: bool,
    pub quiet: bool,
    pub debug: bool,
    pub dry_run: bool,
}

/// The six diagnostic channels and their gating flags.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Channel {
    /// Normal progress output; on unless `quiet`.
    Status,
    /// On only when `verbose`.
    Verbose,
    /// On unless `verbose`; for summaries replaced by verbose detail.
    NonVerbose,
    /// On only when `quiet`; for the few lines that must survive quiet mode.
    QuietOnly,
    /// On only when `debug`.
    Debug,
    /// On only when `dry_run`; lines are prefixed with `(dry-run) `.
    DryRun,
}

/// Marker prepended to dry-run announcements.
pub const DRY_RUN_PREFIX: &str = "(dry-run) ";

impl TalkConfig {
    pub fn enabled(&self, channel: Channel) -> bool {
        match channel {
            Channel::Status => !self.quiet,
            Channel::Verbose => self.verbose,
            Channel::NonVerbose => !self.verbose,
            Channel::QuietOnly => self.quiet,
            Channel::Debug => self.debug,
            Channel::DryRun => self.dry_run,
        }
    }
}

/// Prints gated lines to stderr according to a [`TalkConfig`].
#[derive(Debug, Clone, Copy, Default)]
pub struct Talker {
    pub config: TalkConfig,
}

impl Talker {
    pub fn new(config: TalkConfig) -> Self {
        Self { config }
    }

    /// The line that would be printed for `msg` on `channel`, or `None` when
    /// the channel is disabled. Dry-run lines get the `(dry-run) ` marker
    /// unless the message already carries it.
    pub fn render(&self, channel: Channel, msg: &str) -> Option<String> {
        if !self.config.enabled(channel) {
            return None;
        }
        if channel == Channel::DryRun && !msg.contains("(dry-run)") {
            return Some(format!("{}{}", DRY_RUN_PREFIX, msg));
        }
        Some(msg.to_string())
    }

    fn say(&self, channel: Channel, msg: &str) {
        if let Some(line) = self.render(channel, msg) {
            eprintln!("{}", line);
        }
    }

    fn say_with<F: FnOnce() -> String>(&self, channel: Channel, produce: F) {
        if self.config.enabled(channel) {
            self.say(channel, &produce());
        }
    }

    pub fn status(&self, msg: impl AsRef<str>) {
        self.say(Channel::Status, msg.as_ref());
    }

    pub fn status_with<F: FnOnce() -> String>(&self, produce: F) {
        self.say_with(Channel::Status, produce);
    }

    pub fn verbose(&self, msg: impl AsRef<str>) {
        self.say(Channel::Verbose, msg.as_ref());
    }

    pub fn verbose_with<F: FnOnce() -> String>(&self, produce: F) {
        self.say_with(Channel::Verbose, produce);
    }

    pub fn non_verbose(&self, msg: impl AsRef<str>) {
        self.say(Channel::NonVerbose, msg.as_ref());
    }

    pub fn non_verbose_with<F: FnOnce() -> String>(&self, produce: F) {
        self.say_with(Channel::NonVerbose, produce);
    }

    pub fn quiet_only(&self, msg: impl AsRef<str>) {
        self.say(Channel::QuietOnly, msg.as_ref());
    }

    pub fn quiet_only_with<F: FnOnce() -> String>(&self, produce: F) {
        self.say_with(Channel::QuietOnly, produce);
    }

    pub fn debug(&self, msg: impl AsRef<str>) {
        self.say(Channel::Debug, msg.as_ref());
    }

    pub fn debug_with<F: FnOnce() -> String>(&self, produce: F) {
        self.say_with(Channel::Debug, produce);
    }

    pub fn dry_run(&self, msg: impl AsRef<str>) {
        self.say(Channel::DryRun, msg.as_ref());
    }

    pub fn dry_run_with<F: FnOnce() -> String>(&self, produce: F) {
        self.say_with(Channel::DryRun, produce);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;

    // Flags spelled as in the original CLI: any of "vqdn".
    fn config(flags: &str) -> TalkConfig {
        TalkConfig {
            verbose: flags.contains('v'),
            quiet: flags.contains('q'),
            debug: flags.contains('d'),
            dry_run: flags.contains('n'),
        }
    }

    fn all_flag_combos() -> Vec<String> {
        let mut combos = Vec::new();
        for bits in 0..16u8 {
            let mut flags = String::new();
            for (bit, ch) in ['v', 'q', 'd', 'n'].iter().enumerate() {
                if bits & (1 << bit) != 0 {
                    flags.push(*ch);
                }
            }
            combos.push(flags);
        }
        combos
    }

    #[test]
    fn status_is_on_unless_quiet() {
        for flags in all_flag_combos() {
            let expected = !flags.contains('q');
            assert_eq!(
                config(&flags).enabled(Channel::Status),
                expected,
                "flags = {:?}",
                flags
            );
        }
    }

    #[test]
    fn quiet_only_is_on_only_when_quiet() {
        for flags in all_flag_combos() {
            assert_eq!(
                config(&flags).enabled(Channel::QuietOnly),
                flags.contains('q'),
                "flags = {:?}",
                flags
            );
        }
    }

    #[test]
    fn verbose_channels_follow_the_verbose_flag() {
        for flags in all_flag_combos() {
            let verbose = flags.contains('v');
            assert_eq!(
                config(&flags).enabled(Channel::Verbose),
                verbose,
                "flags = {:?}",
                flags
            );
            assert_eq!(
                config(&flags).enabled(Channel::NonVerbose),
                !verbose,
                "flags = {:?}",
                flags
            );
        }
    }

    #[test]
    fn debug_and_dry_run_follow_their_flags() {
        for flags in all_flag_combos() {
            assert_eq!(
                config(&flags).enabled(Channel::Debug),
                flags.contains('d'),
                "flags = {:?}",
                flags
            );
            assert_eq!(
                config(&flags).enabled(Channel::DryRun),
                flags.contains('n'),
                "flags = {:?}",
                flags
            );
        }
    }

    #[test]
    fn render_passes_message_through_when_enabled() {
        let talker = Talker::new(config(""));
        assert_eq!(
            talker.render(Channel::Status, "hello"),
            Some("hello".to_string())
        );
        assert_eq!(talker.render(Channel::Verbose, "hello"), None);
    }

    #[test]
    fn render_prefixes_dry_run_lines() {
        let talker = Talker::new(config("n"));
        assert_eq!(
            talker.render(Channel::DryRun, "rm -rf build"),
            Some("(dry-run) rm -rf build".to_string())
        );
    }

    #[test]
    fn render_does_not_double_prefix_dry_run_lines() {
        let talker = Talker::new(config("n"));
        assert_eq!(
            talker.render(Channel::DryRun, "(dry-run) rm -rf build"),
            Some("(dry-run) rm -rf build".to_string())
        );
    }

    #[test]
    fn lazy_producer_runs_only_when_enabled() {
        let produced = Cell::new(false);
        let talker = Talker::new(config(""));

        talker.verbose_with(|| {
            produced.set(true);
            "expensive".to_string()
        });
        assert!(!produced.get());

        let talker = Talker::new(config("v"));
        talker.verbose_with(|| {
            produced.set(true);
            "expensive".to_string()
        });
        assert!(produced.get());
    }
}
