//! Rendering and delivery of player-facing text.

use std::fmt::Display;

use zonegate_types::{MessageCatalog, PlayerId};

use crate::{Host, TextProvider};

/// Renders catalog messages and sends them through the host.
///
/// When a [`TextProvider`] is wired in, every rendered line passes
/// through it before delivery.
#[derive(Clone, Copy)]
pub struct Notifier<'a> {
    messages: &'a MessageCatalog,
    text: Option<&'a dyn TextProvider>,
}

impl<'a> Notifier<'a> {
    pub fn new(messages: &'a MessageCatalog, text: Option<&'a dyn TextProvider>) -> Self {
        Self { messages, text }
    }

    /// Renders `key` for `player` (or for the console when `None`).
    pub fn render(
        &self,
        player: Option<&PlayerId>,
        key: &str,
        args: &[(&str, &dyn Display)],
    ) -> String {
        let line = self.messages.render(key, args);
        match (self.text, player) {
            (Some(provider), Some(player)) => provider.apply(player, &line),
            _ => line,
        }
    }

    pub fn chat<H: Host + ?Sized>(
        &self,
        host: &mut H,
        player: &PlayerId,
        key: &str,
        args: &[(&str, &dyn Display)],
    ) {
        let line = self.render(Some(player), key, args);
        host.send_message(player, &line);
    }

    pub fn action_bar<H: Host + ?Sized>(
        &self,
        host: &mut H,
        player: &PlayerId,
        key: &str,
        args: &[(&str, &dyn Display)],
    ) {
        let line = self.render(Some(player), key, args);
        host.send_action_bar(player, &line);
    }
}
