//! Keyboard input for a labeling page.
//!
//! One [`InputHandler`] exists per page view. It owns the shortcut table it
//! was built with and the page's [`LabelActions`].

use crate::actions::{LabelActions, Outcome};
use crate::keybindings::{KeyAction, KeyBindings, KeyPress, Shortcut};
use crate::page::Page;
use crate::request::Transport;

pub struct InputHandler<P, T> {
    bindings: KeyBindings,
    actions: LabelActions<P, T>,
}

impl<P: Page, T: Transport> InputHandler<P, T> {
    pub fn new(bindings: KeyBindings, actions: LabelActions<P, T>) -> Self {
        Self { bindings, actions }
    }

    pub fn actions(&self) -> &LabelActions<P, T> {
        &self.actions
    }

    pub fn bindings(&self) -> &KeyBindings {
        &self.bindings
    }

    /// Resolve `press` and run whatever it is bound to.
    ///
    /// Returns the resolved action so the caller can tell whether the key
    /// was consumed. While a request is in flight every key is ignored.
    pub async fn handle_key(&self, press: &KeyPress) -> KeyAction {
        if self.actions.is_busy() {
            log::debug!("Key {:?} ignored: request in flight", press.key);
            return KeyAction::Ignored;
        }
        let action = self.bindings.resolve(press);
        match &action {
            KeyAction::ClickTagged(key) => {
                if !self.actions.page().click_key_target(key) {
                    log::trace!("No element with data-key {:?}", key);
                }
            }
            KeyAction::Shortcut(shortcut) => {
                let outcome = self.run(*shortcut).await;
                log::debug!("Shortcut {:?} -> {:?}", shortcut, outcome);
            }
            KeyAction::Ignored => {}
        }
        action
    }

    /// Run a shortcut action directly.
    pub async fn run(&self, shortcut: Shortcut) -> Outcome {
        match shortcut {
            Shortcut::SaveAndClose => self.actions.save_and_close().await,
            Shortcut::SaveWithNotice => self.actions.save_with_notice().await,
            Shortcut::Close => self.actions.close_window(),
            Shortcut::ClearLabeling => self.actions.clear_labeling().await,
            Shortcut::DeleteImage => self.actions.delete_image().await,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ClientConfig;
    use crate::labels::LabelCheckbox;
    use crate::testing::{Event, EventLog, MockPage, MockTransport, event_log};
    use pollster::block_on;

    fn handler(answer: bool) -> (InputHandler<MockPage, MockTransport>, EventLog) {
        let log = event_log();
        let page = MockPage::new(log.clone())
            .with_image("/img/1.png")
            .with_labels(vec![LabelCheckbox::new("cat", true)])
            .with_data_keys(&["1", "2"])
            .answering(answer);
        let actions = LabelActions::new(
            page,
            MockTransport::new(log.clone()),
            &ClientConfig::default(),
        );
        (InputHandler::new(KeyBindings::default(), actions), log)
    }

    #[test]
    fn test_plain_key_clicks_tagged_element() {
        let (handler, log) = handler(true);

        block_on(handler.handle_key(&KeyPress::plain("1")));
        block_on(handler.handle_key(&KeyPress::plain("9")));
        assert_eq!(*log.borrow(), vec![Event::Click("1".to_string())]);
    }

    #[test]
    fn test_shift_s_saves_and_stays_open() {
        let (handler, log) = handler(true);

        let action = block_on(handler.handle_key(&KeyPress::shifted("Ы")));
        assert_eq!(action, KeyAction::Shortcut(Shortcut::SaveWithNotice));

        let log = log.borrow();
        assert!(log.contains(&Event::Post(
            "/save".to_string(),
            r#"{"path":"/img/1.png","classes":["cat"]}"#.to_string()
        )));
        assert_eq!(
            log.last(),
            Some(&Event::Alert("Разметка для изображения сохранена!".to_string()))
        );
        assert!(!log.contains(&Event::Close));
    }

    #[test]
    fn test_shift_a_saves_and_closes() {
        let (handler, log) = handler(true);

        block_on(handler.handle_key(&KeyPress::shifted("A")));
        assert_eq!(log.borrow().last(), Some(&Event::Close));
    }

    #[test]
    fn test_shift_d_closes_without_request() {
        let (handler, log) = handler(true);

        block_on(handler.handle_key(&KeyPress::shifted("В")));
        assert_eq!(*log.borrow(), vec![Event::Close]);
    }

    #[test]
    fn test_shift_g_declined_makes_no_request() {
        let (handler, log) = handler(false);

        block_on(handler.handle_key(&KeyPress::shifted("G")));
        assert!(
            !log.borrow()
                .iter()
                .any(|e| matches!(e, Event::Post(..)))
        );
    }

    #[test]
    fn test_shift_f_clears_and_closes() {
        let (handler, log) = handler(true);

        block_on(handler.handle_key(&KeyPress::shifted("А")));
        let log = log.borrow();
        assert!(log.contains(&Event::Post(
            "/clear_labeling".to_string(),
            r#"{"path":"/img/1.png"}"#.to_string()
        )));
        assert_eq!(log.last(), Some(&Event::Close));
    }

    #[test]
    fn test_custom_keymap_is_used() {
        let (handler, log) = handler(true);
        let mut bindings = handler.bindings().clone();
        bindings.set_keys(Shortcut::Close, vec!['Q']);
        let handler = InputHandler::new(bindings, handler.actions);

        assert_eq!(
            block_on(handler.handle_key(&KeyPress::shifted("D"))),
            KeyAction::Ignored
        );
        block_on(handler.handle_key(&KeyPress::shifted("Q")));
        assert_eq!(*log.borrow(), vec![Event::Close]);
    }
}
