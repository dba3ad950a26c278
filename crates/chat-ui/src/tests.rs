#[cfg(test)]
mod tests {
    use crate::state::{CodeTab, UiState};
    use chat_types::event::ChatEvent;

    // ─── UiState Tests ───────────────────────────────────────

    #[test]
    fn test_ui_state_initial() {
        let state = UiState::new();
        assert!(state.input_text.is_empty());
        assert_eq!(state.status_text, "Ready");
        assert!(!state.show_code_panel);
        assert!(!state.show_history_panel);
        assert_eq!(state.code_tab, CodeTab::Edit);
        assert!(state.edited_code.is_empty());
        assert_eq!(state.code_language, "plaintext");
    }

    #[test]
    fn test_ui_state_cycle_started() {
        let mut state = UiState::new();
        state.process_events(vec![ChatEvent::CycleStarted]);
        assert_eq!(state.status_text, "Thinking...");
    }

    #[test]
    fn test_ui_state_delta_then_completed() {
        let mut state = UiState::new();
        state.process_events(vec![ChatEvent::Delta {
            chunk: "x".to_string(),
        }]);
        assert_eq!(state.status_text, "Streaming...");

        state.process_events(vec![ChatEvent::Completed {
            text: "done".to_string(),
        }]);
        assert_eq!(state.status_text, "Ready");
    }

    #[test]
    fn test_ui_state_code_detected_reveals_panel() {
        let mut state = UiState::new();
        state.code_tab = CodeTab::Preview;

        state.process_events(vec![ChatEvent::CodeDetected {
            language: "javascript".to_string(),
            reveal: true,
        }]);

        assert!(state.show_code_panel);
        assert_eq!(state.code_language, "javascript");
        assert_eq!(state.code_tab, CodeTab::Edit);
        assert!(state.take_code_refresh());
        // The flag is one-shot.
        assert!(!state.take_code_refresh());
    }

    #[test]
    fn test_ui_state_code_detected_without_reveal() {
        let mut state = UiState::new();
        state.process_events(vec![ChatEvent::CodeDetected {
            language: "python".to_string(),
            reveal: false,
        }]);

        assert!(!state.show_code_panel);
        assert_eq!(state.code_language, "python");
        assert!(state.take_code_refresh());
    }

    #[test]
    fn test_ui_state_failed() {
        let mut state = UiState::new();
        state.process_events(vec![ChatEvent::Failed {
            message: "connection reset".to_string(),
        }]);
        assert!(state.status_text.contains("connection reset"));
    }

    #[test]
    fn test_ui_state_session_cleared_resets_workspace() {
        let mut state = UiState::new();
        state.edited_code = "let x = 1;".to_string();
        state.code_language = "javascript".to_string();
        state.show_code_panel = true;

        state.process_events(vec![ChatEvent::SessionCleared]);

        assert!(state.edited_code.is_empty());
        assert_eq!(state.code_language, "plaintext");
        assert!(!state.show_code_panel);
        assert_eq!(state.status_text, "Ready");
    }

    #[test]
    fn test_ui_state_session_loaded() {
        let mut state = UiState::new();
        state.status_text = "Error: old".to_string();
        state.process_events(vec![ChatEvent::SessionLoaded {
            id: "s1".to_string(),
        }]);
        assert_eq!(state.status_text, "Ready");
    }

    #[test]
    fn test_ui_state_full_cycle_lifecycle() {
        let mut state = UiState::new();

        state.process_events(vec![ChatEvent::CycleStarted]);
        assert_eq!(state.status_text, "Thinking...");

        state.process_events(vec![
            ChatEvent::Delta {
                chunk: "```js\n".to_string(),
            },
            ChatEvent::Delta {
                chunk: "let a = 1;\n```".to_string(),
            },
        ]);
        assert_eq!(state.status_text, "Streaming...");

        state.process_events(vec![
            ChatEvent::CodeDetected {
                language: "js".to_string(),
                reveal: true,
            },
            ChatEvent::Completed {
                text: "```js\nlet a = 1;\n```".to_string(),
            },
        ]);

        assert_eq!(state.status_text, "Ready");
        assert!(state.show_code_panel);
        assert_eq!(state.code_language, "js");
        assert!(state.take_code_refresh());
    }

    #[test]
    fn test_ui_state_default() {
        let state = UiState::default();
        assert_eq!(state.status_text, "Ready");
        assert!(!state.show_code_panel);
    }
}
