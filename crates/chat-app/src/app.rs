//! Main egui application — owns the UI state and dispatches chat turns.

use std::rc::Rc;

use egui::{self, CentralPanel, RichText, TopBottomPanel};

use chat_core::client::{ChatClient, TurnOutcome};
use chat_core::event_bus::EventBus;
use chat_core::ports::{ChatTransport, TimerPort};
use chat_platform::{BrowserTimer, HttpChatTransport};
use chat_types::config::ClientConfig;
use chat_ui::panels::chat;
use chat_ui::state::UiState;
use chat_ui::theme;

pub struct ChatApp {
    ui_state: UiState,
    event_bus: EventBus,
    client: Rc<ChatClient>,
    transport: Rc<dyn ChatTransport>,
    timer: Rc<dyn TimerPort>,
    first_frame: bool,
}

impl ChatApp {
    pub fn new(_cc: &eframe::CreationContext<'_>) -> Self {
        let config = ClientConfig::default();
        let event_bus = EventBus::new();
        let transport: Rc<dyn ChatTransport> = Rc::new(HttpChatTransport::new(&config));
        log::info!("chat backend at {}", config.chat_url());

        Self {
            ui_state: UiState::new(),
            event_bus: event_bus.clone(),
            client: Rc::new(ChatClient::new(config, event_bus)),
            transport,
            timer: Rc::new(BrowserTimer),
            first_frame: true,
        }
    }

    /// Queue the greeting; it lands on the bus after the welcome delay.
    fn schedule_welcome(&self) {
        let client = self.client.clone();
        let timer = self.timer.clone();

        wasm_bindgen_futures::spawn_local(async move {
            client.welcome(timer.as_ref()).await;
        });
    }

    /// Run one chat turn in the background
    fn dispatch_message(&self, text: String) {
        let client = self.client.clone();
        let transport = self.transport.clone();
        let timer = self.timer.clone();

        wasm_bindgen_futures::spawn_local(async move {
            match client
                .run_turn(&text, transport.as_ref(), timer.as_ref())
                .await
            {
                TurnOutcome::Replied(_) => log::debug!("turn completed"),
                TurnOutcome::Failed(e) => log::debug!("turn failed: {}", e),
            }
        });
    }
}

impl eframe::App for ChatApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        if self.first_frame {
            theme::apply_theme(ctx);
            let repaint = ctx.clone();
            self.event_bus.set_waker(move || repaint.request_repaint());
            self.schedule_welcome();
            self.first_frame = false;
        }

        self.ui_state.process_events(self.event_bus.drain());

        // Keep the spinner animating while a turn is outstanding
        if self.ui_state.is_busy() {
            ctx.request_repaint();
        }

        TopBottomPanel::top("top_bar").show(ctx, |ui| {
            ui.horizontal(|ui| {
                ui.label(
                    RichText::new("ChatBot Personal")
                        .strong()
                        .color(theme::ACCENT)
                        .size(16.0),
                );
                ui.separator();
                ui.label(
                    RichText::new(format!("{} mensajes", self.ui_state.transcript.len()))
                        .color(theme::TEXT_SECONDARY)
                        .small(),
                );
            });
        });

        let submitted = CentralPanel::default()
            .show(ctx, |ui| chat::chat_panel(ui, &mut self.ui_state))
            .inner;
        if let Some(user_msg) = submitted {
            self.dispatch_message(user_msg);
        }
    }
}
