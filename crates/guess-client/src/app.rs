use std::io;
use std::sync::Arc;

use ratatui::backend::CrosstermBackend;
use ratatui::{Frame, Terminal};
use tokio::sync::mpsc;

use guess_common::game::GameRound;
use guess_common::phase::ScreenPhase;
use guess_common::setup::SetupState;

use crate::api::LobbyApi;
use crate::config::ClientConfig;
use crate::event::{self, AppEvent, CreatedLobby};
use crate::input::{self, Action};
use crate::poller::LobbyPoller;
use crate::ready::{self, ReadyOutcome};
use crate::ui::alert::{self, Alert};
use crate::ui::game::GameScreen;
use crate::ui::setup::SetupScreen;
use crate::ui::waiting::WaitingScreen;

#[derive(Debug)]
pub enum Screen {
    Setup(SetupScreen),
    Waiting(WaitingScreen),
    Playing(GameScreen),
}

impl Screen {
    pub fn phase(&self) -> ScreenPhase {
        match self {
            Screen::Setup(_) => ScreenPhase::Setup,
            Screen::Waiting(_) => ScreenPhase::Waiting,
            Screen::Playing(_) => ScreenPhase::Playing,
        }
    }
}

pub struct App<A> {
    api: Arc<A>,
    config: ClientConfig,
    screen: Screen,
    /// Setup snapshot as it was when the player left the setup screen.
    setup: SetupState,
    poller: LobbyPoller,
    /// Bumped on every waiting room entry and exit.
    session: u64,
    alert: Option<Alert>,
    show_help: bool,
    running: bool,
    event_tx: mpsc::Sender<AppEvent>,
}

impl<A: LobbyApi + 'static> App<A> {
    pub fn new(
        api: Arc<A>,
        config: ClientConfig,
        setup: SetupState,
        event_tx: mpsc::Sender<AppEvent>,
    ) -> Self {
        Self {
            api,
            config,
            screen: Screen::Setup(SetupScreen::new(setup.clone())),
            setup,
            poller: LobbyPoller::default(),
            session: 0,
            alert: None,
            show_help: false,
            running: true,
            event_tx,
        }
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    pub fn draw(&self, frame: &mut Frame) {
        match &self.screen {
            Screen::Setup(s) => s.draw(frame),
            Screen::Waiting(s) => s.draw(frame),
            Screen::Playing(s) => s.draw(frame),
        }
        if self.show_help {
            alert::draw_help_popup(frame, self.screen.phase());
        }
        if let Some(ref a) = self.alert {
            alert::draw_alert(frame, a);
        }
    }

    pub fn handle_event(&mut self, event: AppEvent) {
        match event {
            AppEvent::Key(key) => {
                let editing = matches!(&self.screen, Screen::Setup(s) if s.state.is_editing());
                let popup_open = self.alert.is_some() || self.show_help;
                if let Some(action) = input::map_key(key, &self.screen, editing, popup_open) {
                    self.handle_action(action);
                }
            }
            AppEvent::Lobby(lobby) => match &mut self.screen {
                Screen::Waiting(s) => {
                    if s.apply_snapshot(lobby) {
                        tracing::debug!("Lobby snapshot updated");
                    }
                }
                _ => tracing::debug!("Dropping lobby snapshot outside the waiting room"),
            },
            AppEvent::LobbyCreated(result) => self.on_lobby_created(result),
            AppEvent::Ready { session, outcome } => self.on_ready(session, outcome),
            AppEvent::Tick => {}
        }
    }

    pub fn handle_action(&mut self, action: Action) {
        match action {
            Action::Quit => {
                self.poller.stop();
                self.running = false;
            }
            Action::ShowHelp => self.show_help = true,
            Action::DismissPopup => {
                self.alert = None;
                self.show_help = false;
            }

            Action::EditName => self.update_setup(|s| s.begin_edit()),
            Action::TypeChar(c) => self.update_setup(|s| s.push_char(c)),
            Action::Backspace => self.update_setup(|s| s.pop_char()),
            Action::SaveName => {
                if let Screen::Setup(s) = &mut self.screen {
                    match s.state.save_name() {
                        Ok(next) => s.set_state(next),
                        Err(e) => {
                            tracing::debug!("Name rejected: {}", e);
                            self.alert = Some(Alert::invalid_name());
                        }
                    }
                }
            }

            Action::NavigateUp => {
                if let Screen::Setup(s) = &mut self.screen {
                    s.select_prev_row();
                }
            }
            Action::NavigateDown => {
                if let Screen::Setup(s) = &mut self.screen {
                    s.select_next_row();
                }
            }
            Action::NavigateLeft => {
                if let Screen::Setup(s) = &mut self.screen {
                    s.move_left();
                }
            }
            Action::NavigateRight => {
                if let Screen::Setup(s) = &mut self.screen {
                    s.move_right();
                }
            }
            Action::Select => {
                if let Screen::Setup(s) = &mut self.screen {
                    if let Some(a) = s.select() {
                        self.alert = Some(a);
                    }
                }
            }
            Action::FindGame => self.find_game(),

            Action::Ready => self.send_ready(),
            Action::Back => self.back_to_setup(),

            Action::Answer(idx) => {
                if let Screen::Playing(s) = &mut self.screen {
                    s.answer(idx);
                }
            }
            Action::TogglePlayers => {
                if let Screen::Playing(s) = &mut self.screen {
                    s.toggle_players();
                }
            }
        }
    }

    fn update_setup(&mut self, f: impl FnOnce(&SetupState) -> SetupState) {
        if let Screen::Setup(s) = &mut self.screen {
            let next = f(&s.state);
            s.set_state(next);
        }
    }

    fn find_game(&mut self) {
        let Screen::Setup(s) = &mut self.screen else {
            return;
        };
        if s.pending || !s.state.can_find_game() {
            return;
        }

        let request = match s.state.create_request() {
            Ok(request) => request,
            Err(_) => {
                self.alert = Some(Alert::missing_selection());
                return;
            }
        };

        s.pending = true;
        let setup = s.state.clone();
        let api = self.api.clone();
        let tx = self.event_tx.clone();
        tokio::spawn(async move {
            let result = api
                .create_lobby(&request)
                .await
                .map(|resp| CreatedLobby {
                    player_id: resp.player_id_for(&request.player_name),
                    lobby_id: resp.lobby_id,
                    setup,
                })
                .map_err(|e| e.to_string());
            let _ = tx.send(AppEvent::LobbyCreated(result)).await;
        });
    }

    fn on_lobby_created(&mut self, result: Result<CreatedLobby, String>) {
        if self.screen.phase().enter_waiting() != ScreenPhase::Waiting {
            return;
        }
        let Screen::Setup(s) = &mut self.screen else {
            return;
        };
        s.pending = false;

        match result {
            Ok(created) => {
                tracing::info!(
                    "Joined lobby {} as player {}",
                    created.lobby_id,
                    created.player_id
                );
                self.setup = created.setup;
                self.session += 1;
                let waiting = WaitingScreen::new(
                    created.player_id.clone(),
                    self.setup.player_name().to_string(),
                    created.lobby_id,
                );
                self.poller = LobbyPoller::start(
                    self.api.clone(),
                    created.player_id,
                    self.config.poll_interval,
                    self.event_tx.clone(),
                );
                self.screen = Screen::Waiting(waiting);
            }
            Err(e) => {
                tracing::error!("Lobby request failed: {}", e);
                self.alert = Some(Alert::request_failed());
            }
        }
    }

    fn send_ready(&mut self) {
        let Screen::Waiting(s) = &mut self.screen else {
            return;
        };
        if s.ready_pending {
            return;
        }
        s.ready_pending = true;

        let api = self.api.clone();
        let tx = self.event_tx.clone();
        let lobby_id = s.ready_lobby_id();
        let player_id = s.player_id.clone();
        let session = self.session;
        tokio::spawn(async move {
            let outcome = ready::submit_ready(api.as_ref(), lobby_id, player_id).await;
            let _ = tx.send(AppEvent::Ready { session, outcome }).await;
        });
    }

    fn on_ready(&mut self, session: u64, outcome: ReadyOutcome) {
        let Screen::Waiting(s) = &mut self.screen else {
            return;
        };
        if session != self.session || !s.ready_pending {
            tracing::debug!("Dropping ready reply from waiting room {}", session);
            return;
        }
        s.ready_pending = false;

        if outcome.apply(ScreenPhase::Waiting) == ScreenPhase::Playing {
            let lobby = s.game_lobby();
            self.poller.stop();
            tracing::info!("Starting game in lobby {}", lobby.id);
            let round = GameRound::demo().shuffled(&mut rand::thread_rng());
            self.screen = Screen::Playing(GameScreen::new(lobby, round));
        }
    }

    fn back_to_setup(&mut self) {
        let phase = self.screen.phase();
        if phase == phase.back() {
            return;
        }
        tracing::info!("Back to main menu from {:?} (poller {:?})", phase, self.poller.state());
        self.poller.stop();
        self.session += 1;
        self.screen = Screen::Setup(SetupScreen::new(self.setup.reset_selections()));
    }
}

pub async fn run<A: LobbyApi + 'static>(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    api: Arc<A>,
    config: ClientConfig,
    setup: SetupState,
) -> anyhow::Result<()> {
    let (event_tx, mut event_rx) = mpsc::channel::<AppEvent>(64);
    let input_handle = tokio::spawn(event::event_loop(event_tx.clone()));

    let mut app = App::new(api, config, setup, event_tx);

    while app.is_running() {
        terminal.draw(|frame| app.draw(frame))?;

        let event = match event_rx.recv().await {
            Some(e) => e,
            None => break,
        };
        app.handle_event(event);
    }

    input_handle.abort();
    Ok(())
}
