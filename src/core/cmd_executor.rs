use std::sync::Arc;

use color_eyre::eyre::Result;
use tokio::sync::mpsc::UnboundedSender;

use crate::{
    core::cmd::Cmd,
    core::msg::{composer::ComposerMsg, feed::FeedMsg, nearby::NearbyMsg, vibes::VibesMsg, Msg},
    infrastructure::api::ApiClient,
    infrastructure::geo::LocationProvider,
};

/// Command executor that turns `Cmd` values into API calls.
///
/// Fetch results are fed back into the update loop as messages carrying the
/// kind and generation the command was issued with, so the pager can match
/// them against its current state. Engagement sends are fire-and-forget:
/// the optimistic UI state is never rolled back, the outcome is only logged.
#[derive(Clone)]
pub struct CmdExecutor {
    api: Arc<dyn ApiClient>,
    location: Arc<dyn LocationProvider>,
    msg_tx: UnboundedSender<Msg>,
}

impl CmdExecutor {
    pub fn new(
        api: Arc<dyn ApiClient>,
        location: Arc<dyn LocationProvider>,
        msg_tx: UnboundedSender<Msg>,
    ) -> Self {
        Self {
            api,
            location,
            msg_tx,
        }
    }

    /// Execute a single command, spawning a task for anything asynchronous.
    pub fn execute_command(&self, cmd: Cmd) -> Result<()> {
        match cmd {
            Cmd::None => {}

            Cmd::FetchPosts {
                request,
                kind,
                generation,
            } => {
                let api = Arc::clone(&self.api);
                let tx = self.msg_tx.clone();
                tokio::spawn(async move {
                    let msg = match api.fetch_posts(&request).await {
                        Ok(page) => Msg::Feed(FeedMsg::PageLoaded {
                            kind,
                            generation,
                            page,
                        }),
                        Err(e) => Msg::Feed(FeedMsg::PageFailed {
                            kind,
                            generation,
                            error: e.to_string(),
                        }),
                    };
                    let _ = tx.send(msg);
                });
            }

            Cmd::FetchVibes {
                request,
                kind,
                generation,
            } => {
                let api = Arc::clone(&self.api);
                let tx = self.msg_tx.clone();
                tokio::spawn(async move {
                    let msg = match api.fetch_vibes(&request).await {
                        Ok(page) => Msg::Vibes(VibesMsg::PageLoaded {
                            kind,
                            generation,
                            page,
                        }),
                        Err(e) => Msg::Vibes(VibesMsg::PageFailed {
                            kind,
                            generation,
                            error: e.to_string(),
                        }),
                    };
                    let _ = tx.send(msg);
                });
            }

            Cmd::FetchNearby {
                request,
                kind,
                generation,
            } => {
                let api = Arc::clone(&self.api);
                let tx = self.msg_tx.clone();
                tokio::spawn(async move {
                    let msg = match api.fetch_nearby(&request).await {
                        Ok(page) => Msg::Nearby(NearbyMsg::PageLoaded {
                            kind,
                            generation,
                            page,
                        }),
                        Err(e) => Msg::Nearby(NearbyMsg::PageFailed {
                            kind,
                            generation,
                            error: e.to_string(),
                        }),
                    };
                    let _ = tx.send(msg);
                });
            }

            Cmd::FetchStories => {
                let api = Arc::clone(&self.api);
                let tx = self.msg_tx.clone();
                tokio::spawn(async move {
                    match api.fetch_stories().await {
                        Ok(stories) => {
                            let _ = tx.send(Msg::Feed(FeedMsg::StoriesLoaded(stories)));
                        }
                        // The story rail is decoration; a failed fetch leaves
                        // the previous rail in place
                        Err(e) => log::warn!("story fetch failed: {e}"),
                    }
                });
            }

            Cmd::SearchUsers { query } => {
                let api = Arc::clone(&self.api);
                let tx = self.msg_tx.clone();
                tokio::spawn(async move {
                    match api.search_users(&query).await {
                        Ok(users) => {
                            let _ = tx.send(Msg::Composer(ComposerMsg::MentionSuggestionsLoaded(
                                users,
                            )));
                        }
                        // Autocomplete quietly yields nothing on failure
                        Err(e) => log::warn!("user search failed: {e}"),
                    }
                });
            }

            Cmd::SendEngagement { action } => {
                let api = Arc::clone(&self.api);
                tokio::spawn(async move {
                    if let Err(e) = api.send_engagement(&action).await {
                        log::warn!("engagement send failed for {action:?}: {e}");
                    }
                });
            }

            Cmd::SubmitPost { payload } => {
                let api = Arc::clone(&self.api);
                let tx = self.msg_tx.clone();
                tokio::spawn(async move {
                    let msg = match api.submit_post(&payload).await {
                        Ok(()) => Msg::Composer(ComposerMsg::SubmitSucceeded),
                        Err(e) => Msg::Composer(ComposerMsg::SubmitFailed(e.to_string())),
                    };
                    let _ = tx.send(msg);
                });
            }

            Cmd::RequestLocation => {
                let location = Arc::clone(&self.location);
                let tx = self.msg_tx.clone();
                tokio::spawn(async move {
                    let msg = match location.current_location().await {
                        Ok(point) => Msg::Nearby(NearbyMsg::LocationResolved(point)),
                        Err(e) => Msg::Nearby(NearbyMsg::LocationFailed(e.to_string())),
                    };
                    let _ = tx.send(msg);
                });
            }

            Cmd::LogError { message } => {
                log::error!("{message}");
            }

            Cmd::LogInfo { message } => {
                log::info!("{message}");
            }

            Cmd::Batch(cmds) => {
                for cmd in cmds {
                    self.execute_command(cmd)?;
                }
            }
        }

        Ok(())
    }

    /// Execute a list of commands in priority order.
    pub fn execute_commands(&self, mut cmds: Vec<Cmd>) -> Result<()> {
        cmds.sort_by_key(Cmd::priority);
        for cmd in cmds {
            self.execute_command(cmd)?;
        }
        Ok(())
    }
}
