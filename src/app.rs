use color_eyre::eyre::Result;
use std::sync::Arc;

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use ratatui::prelude::Rect;
use strum::IntoEnumIterator;
use tokio::sync::mpsc::{self, UnboundedReceiver, UnboundedSender};

use crate::{
    core::{
        cmd_executor::CmdExecutor,
        msg::{
            composer::ComposerMsg, feed::FeedMsg, nearby::NearbyMsg, system::SystemMsg,
            vibes::VibesMsg, Msg,
        },
        state::{AppState, Screen},
        update::update,
    },
    infrastructure::{
        api::HttpApiClient,
        config::Config,
        geo::ConfigLocationProvider,
        tui::{self, Frame},
    },
    presentation::{
        components::{
            composer::ComposerComponent, feed::FeedComponent, nearby::NearbyComponent,
            status_bar::StatusBarComponent, vibes::VibesComponent,
        },
        config::KeyAction,
        widgets::tab_bar::TabBarWidget,
    },
};

pub struct App {
    pub tick_rate: f64,
    pub frame_rate: f64,
    state: AppState,
    executor: CmdExecutor,
    msg_tx: UnboundedSender<Msg>,
    msg_rx: UnboundedReceiver<Msg>,
    feed: FeedComponent,
    vibes: VibesComponent,
    nearby: NearbyComponent,
    composer: ComposerComponent,
    status_bar: StatusBarComponent,
    last_tick_key_events: Vec<KeyEvent>,
}

impl App {
    pub fn new(config: Config, tick_rate: f64, frame_rate: f64) -> Result<Self> {
        let api = HttpApiClient::new(config.api.base_url.clone(), config.api.token.clone())?;
        let location = ConfigLocationProvider::new(config.share_location, config.location.clone());
        let (msg_tx, msg_rx) = mpsc::unbounded_channel();
        let executor = CmdExecutor::new(Arc::new(api), Arc::new(location), msg_tx.clone());
        Ok(Self {
            tick_rate,
            frame_rate,
            state: AppState::new_with_config(config),
            executor,
            msg_tx,
            msg_rx,
            feed: FeedComponent::new(),
            vibes: VibesComponent::new(),
            nearby: NearbyComponent::new(),
            composer: ComposerComponent::new(),
            status_bar: StatusBarComponent::new(),
            last_tick_key_events: Vec::new(),
        })
    }

    pub async fn run(&mut self) -> Result<()> {
        let mut tui = tui::Tui::new()?
            .tick_rate(self.tick_rate)
            .frame_rate(self.frame_rate);
        tui.enter()?;

        let size = tui.size()?;
        self.msg_tx.send(Msg::System(SystemMsg::Resize {
            width: size.width,
            height: size.height,
        }))?;
        self.msg_tx
            .send(Msg::Feed(FeedMsg::ViewportResized(size.height)))?;
        self.msg_tx.send(Msg::Feed(FeedMsg::LoadInitial))?;

        loop {
            if let Some(e) = tui.next().await {
                match e {
                    tui::Event::Quit => self.msg_tx.send(Msg::System(SystemMsg::Quit))?,
                    tui::Event::Tick => {
                        self.last_tick_key_events.drain(..);
                        self.msg_tx.send(Msg::System(SystemMsg::Tick))?;
                    }
                    tui::Event::Render => self.draw(&mut tui)?,
                    tui::Event::Resize(w, h) => {
                        tui.resize(Rect::new(0, 0, w, h))?;
                        self.msg_tx
                            .send(Msg::System(SystemMsg::Resize { width: w, height: h }))?;
                        self.msg_tx.send(Msg::Feed(FeedMsg::ViewportResized(h)))?;
                        self.draw(&mut tui)?;
                    }
                    tui::Event::Key(key) => self.handle_key(key)?,
                    _ => {}
                }
            }

            while let Ok(msg) = self.msg_rx.try_recv() {
                if !msg.is_frequent() {
                    log::debug!("{msg:?}");
                }
                if matches!(
                    msg,
                    Msg::Composer(ComposerMsg::SubmitSucceeded | ComposerMsg::Discard)
                ) {
                    self.composer.reset();
                }
                let (next_state, cmds) = update(msg, std::mem::take(&mut self.state));
                self.state = next_state;
                self.executor.execute_commands(cmds)?;
            }

            if self.state.system.should_suspend {
                tui.suspend()?;
                self.msg_tx.send(Msg::System(SystemMsg::Resume))?;
                tui = tui::Tui::new()?
                    .tick_rate(self.tick_rate)
                    .frame_rate(self.frame_rate);
                tui.enter()?;
            } else if self.state.system.should_quit {
                tui.stop();
                break;
            }
        }
        tui.exit()?;
        Ok(())
    }

    fn draw(&mut self, tui: &mut tui::Tui) -> Result<()> {
        let state = self.state.clone();
        let feed = &self.feed;
        let vibes = &self.vibes;
        let nearby = &self.nearby;
        let composer = &mut self.composer;
        let status_bar = &self.status_bar;
        tui.draw(|f: &mut Frame<'_>| {
            let area = f.area();
            let layout = ratatui::layout::Layout::new(
                ratatui::layout::Direction::Vertical,
                [
                    ratatui::layout::Constraint::Length(1), // tab bar
                    ratatui::layout::Constraint::Min(0),    // active screen
                    ratatui::layout::Constraint::Length(1), // status bar
                ],
            )
            .split(area);

            f.render_widget(TabBarWidget::new(state.system.active_screen), layout[0]);
            match state.system.active_screen {
                Screen::Feed => feed.view(&state, f, layout[1]),
                Screen::Vibes => vibes.view(&state, f, layout[1]),
                Screen::Nearby => nearby.view(&state, f, layout[1]),
                Screen::Composer => composer.view(&state, f, layout[1]),
            }
            status_bar.view(&state, f, layout[2]);
        })?;
        Ok(())
    }

    fn handle_key(&mut self, key: KeyEvent) -> Result<()> {
        if self.state.system.active_screen == Screen::Composer
            && Self::is_composer_input(&key)
        {
            let msg = self.composer.handle_key(key);
            self.msg_tx.send(Msg::Composer(msg))?;
            return Ok(());
        }

        let keybindings = &self.state.config.config.keybindings;
        let action = if let Some(action) = keybindings.get(&vec![key]) {
            Some(*action)
        } else {
            // Not a single-key binding; consider multi-key sequences
            self.last_tick_key_events.push(key);
            keybindings.get(&self.last_tick_key_events).copied()
        };

        if let Some(action) = action {
            log::info!("Got action: {action:?}");
            for msg in self.action_to_msgs(action) {
                self.msg_tx.send(msg)?;
            }
        }
        Ok(())
    }

    /// On the composer screen plain keys belong to the editor. Only Esc and
    /// modifier chords are eligible for bindings there.
    fn is_composer_input(key: &KeyEvent) -> bool {
        !matches!(key.code, KeyCode::Esc)
            && !key.modifiers.contains(KeyModifiers::CONTROL)
            && !key.modifiers.contains(KeyModifiers::ALT)
    }

    /// Map a screen-agnostic key action to messages for the active screen.
    fn action_to_msgs(&self, action: KeyAction) -> Vec<Msg> {
        let screen = self.state.system.active_screen;
        match action {
            KeyAction::Quit => vec![Msg::System(SystemMsg::Quit)],
            KeyAction::Suspend => vec![Msg::System(SystemMsg::Suspend)],
            KeyAction::NextScreen => {
                vec![Msg::System(SystemMsg::ShowScreen(cycle_screen(screen, 1)))]
            }
            KeyAction::PrevScreen => {
                vec![Msg::System(SystemMsg::ShowScreen(cycle_screen(screen, -1)))]
            }
            KeyAction::OpenComposer => {
                vec![Msg::System(SystemMsg::ShowScreen(Screen::Composer))]
            }

            KeyAction::Refresh => match screen {
                Screen::Feed => vec![Msg::Feed(FeedMsg::Refresh)],
                Screen::Vibes => vec![Msg::Vibes(VibesMsg::Refresh)],
                Screen::Nearby => vec![Msg::Nearby(NearbyMsg::Refresh)],
                Screen::Composer => vec![],
            },
            // Explicit load-more; the scroll and index triggers cover the
            // common path, this is the manual override
            KeyAction::LoadMore => match screen {
                Screen::Feed => vec![Msg::Feed(FeedMsg::LoadMore)],
                Screen::Nearby => vec![Msg::Nearby(NearbyMsg::LoadMore)],
                Screen::Vibes | Screen::Composer => vec![],
            },
            KeyAction::ScrollUp => match screen {
                Screen::Feed => vec![Msg::Feed(FeedMsg::ScrollUp)],
                Screen::Vibes => vec![Msg::Vibes(VibesMsg::PrevVibe)],
                Screen::Nearby => vec![Msg::Nearby(NearbyMsg::ScrollUp)],
                Screen::Composer => vec![],
            },
            KeyAction::ScrollDown => match screen {
                Screen::Feed => vec![Msg::Feed(FeedMsg::ScrollDown)],
                Screen::Vibes => vec![Msg::Vibes(VibesMsg::NextVibe)],
                Screen::Nearby => vec![Msg::Nearby(NearbyMsg::ScrollDown)],
                Screen::Composer => vec![],
            },
            KeyAction::ScrollToTop => match screen {
                Screen::Feed => vec![Msg::Feed(FeedMsg::ScrollToTop)],
                _ => vec![],
            },

            KeyAction::ToggleLike => match screen {
                Screen::Feed => self
                    .state
                    .selected_post()
                    .map(|post| vec![Msg::Feed(FeedMsg::ToggleLike(post.id.clone()))])
                    .unwrap_or_default(),
                Screen::Vibes => self
                    .state
                    .current_vibe()
                    .map(|vibe| vec![Msg::Vibes(VibesMsg::ToggleLike(vibe.id.clone()))])
                    .unwrap_or_default(),
                _ => vec![],
            },
            KeyAction::ToggleSave => match screen {
                Screen::Feed => self
                    .state
                    .selected_post()
                    .map(|post| vec![Msg::Feed(FeedMsg::ToggleSave(post.id.clone()))])
                    .unwrap_or_default(),
                _ => vec![],
            },
            KeyAction::ToggleBlock => match screen {
                Screen::Nearby => self
                    .state
                    .selected_nearby_user()
                    .map(|user| vec![Msg::Nearby(NearbyMsg::ToggleBlock(user.id.clone()))])
                    .unwrap_or_default(),
                _ => vec![],
            },

            KeyAction::Submit => match screen {
                Screen::Composer => vec![Msg::Composer(ComposerMsg::Submit)],
                _ => vec![],
            },
            KeyAction::CycleAudience => match screen {
                Screen::Composer => vec![Msg::Composer(ComposerMsg::CycleAudience)],
                _ => vec![],
            },
            KeyAction::Autocomplete => match screen {
                Screen::Composer => vec![Msg::Composer(ComposerMsg::RequestMentionSuggestions)],
                _ => vec![],
            },
            KeyAction::Discard => match screen {
                Screen::Composer => vec![Msg::Composer(ComposerMsg::Discard)],
                _ => vec![],
            },

            KeyAction::DismissAlert => match screen {
                Screen::Nearby => vec![Msg::Nearby(NearbyMsg::DismissAlert)],
                _ => vec![],
            },
        }
    }
}

/// Advance through the screen cycle by one step in either direction.
fn cycle_screen(current: Screen, step: i32) -> Screen {
    let screens: Vec<Screen> = Screen::iter().collect();
    let position = screens
        .iter()
        .position(|screen| *screen == current)
        .unwrap_or(0) as i32;
    let count = screens.len() as i32;
    let next = (position + step).rem_euclid(count) as usize;
    screens[next]
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn test_cycle_screen_wraps_both_ways() {
        assert_eq!(cycle_screen(Screen::Feed, 1), Screen::Vibes);
        assert_eq!(cycle_screen(Screen::Composer, 1), Screen::Feed);
        assert_eq!(cycle_screen(Screen::Feed, -1), Screen::Composer);
    }

    #[test]
    fn test_composer_input_detection() {
        let plain = KeyEvent::new(KeyCode::Char('q'), KeyModifiers::NONE);
        assert!(App::is_composer_input(&plain));

        let shifted = KeyEvent::new(KeyCode::Char('Q'), KeyModifiers::SHIFT);
        assert!(App::is_composer_input(&shifted));

        let chord = KeyEvent::new(KeyCode::Char('s'), KeyModifiers::CONTROL);
        assert!(!App::is_composer_input(&chord));

        let escape = KeyEvent::new(KeyCode::Esc, KeyModifiers::NONE);
        assert!(!App::is_composer_input(&escape));
    }
}
