//! Main egui application — composes the panels and drives the
//! streaming pipeline.

use std::cell::RefCell;
use std::rc::Rc;

use egui::{self, CentralPanel, RichText, SidePanel, TopBottomPanel};

use chat_core::conversation::Conversation;
use chat_core::event_bus::EventBus;
use chat_core::orchestrator::StreamOrchestrator;
use chat_core::ports::{KvStore, StreamTransport};
use chat_platform::download;
use chat_platform::history;
use chat_platform::storage::auto_detect_store;
use chat_platform::transport::HttpTransport;
use chat_types::config::{ChatConfig, StreamEndpoint};
use chat_types::session::ChatHistory;
use chat_ui::panels::{chat, code, history as history_panel};
use chat_ui::state::UiState;
use chat_ui::theme;

/// The main application state
pub struct ChatApp {
    ui_state: UiState,
    config: ChatConfig,
    event_bus: EventBus,
    conversation: Rc<RefCell<Conversation>>,
    orchestrator: Rc<StreamOrchestrator>,
    transport: Rc<dyn StreamTransport>,
    store: Rc<dyn KvStore>,
    history: Rc<RefCell<ChatHistory>>,
    /// Config restored from storage lands here asynchronously and is
    /// applied on the next frame.
    restored_config: Rc<RefCell<Option<ChatConfig>>>,
    first_frame: bool,
}

impl ChatApp {
    pub fn new(_cc: &eframe::CreationContext<'_>) -> Self {
        let config = ChatConfig::default();
        let event_bus = EventBus::new();
        let conversation = Rc::new(RefCell::new(Conversation::new(event_bus.clone())));
        let transport: Rc<dyn StreamTransport> = Rc::new(HttpTransport::new(config.clone()));
        let store = auto_detect_store();
        let history = Rc::new(RefCell::new(ChatHistory::new(config.history_cap)));
        let restored_config = Rc::new(RefCell::new(None));

        Self::restore_history(store.clone(), history.clone());
        Self::restore_config(store.clone(), restored_config.clone());

        Self {
            ui_state: UiState::new(),
            config,
            event_bus,
            conversation,
            orchestrator: Rc::new(StreamOrchestrator::new()),
            transport,
            store,
            history,
            restored_config,
            first_frame: true,
        }
    }

    /// Restore archived sessions from storage (async)
    fn restore_history(store: Rc<dyn KvStore>, slot: Rc<RefCell<ChatHistory>>) {
        wasm_bindgen_futures::spawn_local(async move {
            let loaded = history::load_history(&store).await;
            if !loaded.is_empty() {
                log::info!("Restored {} archived sessions", loaded.len());
                *slot.borrow_mut() = loaded;
            }
        });
    }

    /// Restore config from storage (async)
    fn restore_config(store: Rc<dyn KvStore>, slot: Rc<RefCell<Option<ChatConfig>>>) {
        wasm_bindgen_futures::spawn_local(async move {
            if let Ok(Some(raw)) = store.get(history::CONFIG_KEY).await {
                match serde_json::from_str::<ChatConfig>(&raw) {
                    Ok(config) => {
                        *slot.borrow_mut() = Some(config);
                        log::info!("Config restored from storage");
                    }
                    Err(e) => log::warn!("Discarding corrupt config: {}", e),
                }
            }
        });
    }

    /// Save config to storage (async, fire-and-forget)
    fn save_config(store: Rc<dyn KvStore>, config: &ChatConfig) {
        if let Ok(raw) = serde_json::to_string(config) {
            wasm_bindgen_futures::spawn_local(async move {
                if let Err(e) = store.set(history::CONFIG_KEY, &raw).await {
                    log::warn!("Failed to save config: {}", e);
                }
            });
        }
    }

    /// Persist the archived sessions (async, fire-and-forget)
    fn save_history(store: Rc<dyn KvStore>, history: Rc<RefCell<ChatHistory>>) {
        wasm_bindgen_futures::spawn_local(async move {
            let snapshot = history.borrow().clone();
            if let Err(e) = history::save_history(&store, &snapshot).await {
                log::warn!("Failed to save chat history: {}", e);
            }
        });
    }

    fn rebuild_transport(&mut self) {
        self.transport = Rc::new(HttpTransport::new(self.config.clone()));
    }

    /// Dispatch a prompt through the orchestrator (async)
    fn dispatch_prompt(&self, prompt: String, ctx: &egui::Context) {
        if self.conversation.borrow().is_busy() {
            log::warn!("Prompt ignored: a streaming cycle is already in flight");
            return;
        }

        let conversation = self.conversation.clone();
        let orchestrator = self.orchestrator.clone();
        let transport = self.transport.clone();
        let endpoint = self.config.endpoint;
        let ctx = ctx.clone();

        wasm_bindgen_futures::spawn_local(async move {
            // The session endpoint keeps history server-side, so it
            // needs a session id before the first cycle.
            if endpoint == StreamEndpoint::Session
                && conversation.borrow().session_id.is_none()
            {
                match transport.create_session().await {
                    Ok(id) => conversation.borrow_mut().set_session_id(id),
                    Err(e) => {
                        conversation.borrow_mut().fail(&e.to_string());
                        ctx.request_repaint();
                        return;
                    }
                }
            }

            match orchestrator
                .run(&conversation, transport.as_ref(), &prompt)
                .await
            {
                Ok(_) => {}
                Err(e) => log::warn!("Streaming cycle ended with error: {}", e),
            }
            ctx.request_repaint();
        });
    }

    /// Archive the current conversation and reset for a new one.
    fn new_chat(&mut self) {
        self.orchestrator.cancel_handle().cancel();
        if let Some(snapshot) = self.conversation.borrow_mut().clear_session() {
            self.history.borrow_mut().push(snapshot);
            Self::save_history(self.store.clone(), self.history.clone());
        }
    }

    /// Restore the archived session at `index`.
    fn load_session(&mut self, index: usize) {
        self.orchestrator.cancel_handle().cancel();

        let session = match self.history.borrow().get(index) {
            Some(s) => s.clone(),
            None => return,
        };
        self.conversation.borrow_mut().load_session(&session);
        self.ui_state.edited_code = session.generated_code.clone();

        // Server-side sessions may have grown since they were archived;
        // refresh the transcript from the backend.
        if self.config.endpoint == StreamEndpoint::Session {
            let conversation = self.conversation.clone();
            let transport = self.transport.clone();
            let id = session.id.clone();
            wasm_bindgen_futures::spawn_local(async move {
                match transport.fetch_messages(&id).await {
                    Ok(messages) if !messages.is_empty() => {
                        conversation.borrow_mut().adopt_transcript(messages, id);
                    }
                    Ok(_) => {}
                    Err(e) => log::warn!("Failed to refresh session {}: {}", id, e),
                }
            });
        }
    }
}

impl eframe::App for ChatApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        if self.first_frame {
            theme::apply_theme(ctx);
            self.first_frame = false;
        }

        // Apply a config restored from storage
        let restored = self.restored_config.borrow_mut().take();
        if let Some(config) = restored {
            self.config = config;
            self.rebuild_transport();
        }

        // Drain events from the streaming pipeline
        let events = self.event_bus.drain();
        if !events.is_empty() {
            self.ui_state.process_events(events);
            ctx.request_repaint();
        }
        if self.ui_state.take_code_refresh() {
            self.ui_state.edited_code = self.conversation.borrow().generated_code.clone();
        }

        if self.conversation.borrow().is_busy() {
            ctx.request_repaint();
        }

        // ── Top bar ──────────────────────────────────────────
        TopBottomPanel::top("top_bar").show(ctx, |ui| {
            ui.horizontal(|ui| {
                ui.label(
                    RichText::new("Code Chat")
                        .strong()
                        .color(theme::ACCENT)
                        .size(16.0),
                );
                ui.separator();

                let mut endpoint_changed = false;
                egui::ComboBox::from_id_salt("endpoint")
                    .selected_text(self.config.endpoint.label())
                    .show_ui(ui, |ui| {
                        for endpoint in StreamEndpoint::all() {
                            if ui
                                .selectable_value(
                                    &mut self.config.endpoint,
                                    *endpoint,
                                    endpoint.label(),
                                )
                                .changed()
                            {
                                endpoint_changed = true;
                            }
                        }
                    });
                if endpoint_changed {
                    self.rebuild_transport();
                    Self::save_config(self.store.clone(), &self.config);
                }

                ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                    if ui
                        .selectable_label(self.ui_state.show_code_panel, "Code")
                        .clicked()
                    {
                        self.ui_state.show_code_panel = !self.ui_state.show_code_panel;
                    }
                    if ui
                        .selectable_label(self.ui_state.show_history_panel, "History")
                        .clicked()
                    {
                        self.ui_state.show_history_panel = !self.ui_state.show_history_panel;
                    }
                });
            });
        });

        // ── History side panel ───────────────────────────────
        if self.ui_state.show_history_panel {
            let action = SidePanel::left("history_panel")
                .min_width(200.0)
                .max_width(280.0)
                .show(ctx, |ui| history_panel::history_panel(ui, &self.history.borrow()))
                .inner;
            match action {
                history_panel::HistoryAction::None => {}
                history_panel::HistoryAction::NewChat => self.new_chat(),
                history_panel::HistoryAction::Load(index) => self.load_session(index),
            }
        }

        // ── Code workspace side panel ────────────────────────
        if self.ui_state.show_code_panel {
            let action = SidePanel::right("code_panel")
                .min_width(320.0)
                .show(ctx, |ui| code::code_panel(ui, &mut self.ui_state))
                .inner;
            if let code::CodeAction::Download = action {
                let ext = download::extension_for(&self.ui_state.code_language);
                let filename = format!("generated.{}", ext);
                if let Err(e) = download::download_text(&self.ui_state.edited_code, &filename) {
                    log::error!("Download failed: {}", e);
                }
            }
        }

        // ── Main content ─────────────────────────────────────
        CentralPanel::default().show(ctx, |ui| {
            let submitted = {
                let conversation = self.conversation.borrow();
                chat::chat_panel(ui, &mut self.ui_state, &conversation)
            };
            if let Some(prompt) = submitted {
                self.dispatch_prompt(prompt, ctx);
            }
        });
    }
}
