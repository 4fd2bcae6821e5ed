use std::collections::HashMap;

use tokio::{
    io::{AsyncBufRead, AsyncBufReadExt, AsyncWrite, AsyncWriteExt},
    task::{Id as TaskId, JoinSet},
};

use crate::{
    error::{AppError, AppResult},
    models::ResultSet,
    services::{
        controller::{
            CardActivation, Notification, PendingSearch, RequestToken, SearchController,
            SearchOutcome,
        },
        renderer::CardAction,
    },
};

pub mod commands;
pub mod view;

pub use commands::{parse_command, Command};

type SearchResponse = (RequestToken, AppResult<ResultSet>);

enum Flow {
    Continue,
    Quit,
}

/// Interactive terminal front end for a [`SearchController`].
///
/// Reads one command per line. Searches run as background tasks so the shell
/// keeps accepting commands while a request is pending; responses are fed back
/// into the controller as they arrive.
pub struct Shell<W> {
    controller: SearchController,
    out: W,
    browser_command: Option<String>,
    in_flight: JoinSet<SearchResponse>,
    task_tokens: HashMap<TaskId, RequestToken>,
}

impl<W: AsyncWrite + Unpin> Shell<W> {
    pub fn new(controller: SearchController, out: W, browser_command: Option<String>) -> Self {
        Self {
            controller,
            out,
            browser_command,
            in_flight: JoinSet::new(),
            task_tokens: HashMap::new(),
        }
    }

    pub fn controller(&self) -> &SearchController {
        &self.controller
    }

    pub fn into_output(self) -> W {
        self.out
    }

    /// Runs until `:quit` or end of input.
    ///
    /// At end of input, searches still in flight are awaited so their results
    /// are shown before returning.
    pub async fn run<R: AsyncBufRead + Unpin>(&mut self, input: R) -> AppResult<()> {
        let mut lines = input.lines();
        self.write(&view::format_view(&self.controller.view())).await?;
        self.prompt().await?;

        loop {
            tokio::select! {
                biased;

                Some(joined) = self.in_flight.join_next_with_id(),
                    if !self.in_flight.is_empty() =>
                {
                    self.on_response(joined).await?;
                }
                line = lines.next_line() => {
                    let Some(line) = line? else { break };
                    if let Flow::Quit = self.handle_line(&line).await? {
                        self.in_flight.abort_all();
                        return Ok(());
                    }
                    self.prompt().await?;
                }
            }
        }

        while let Some(joined) = self.in_flight.join_next_with_id().await {
            self.on_response(joined).await?;
        }

        Ok(())
    }

    /// Probes the backend and reports the result. Never fatal.
    pub async fn report_health(&mut self) -> AppResult<()> {
        let backend = self.controller.backend();
        match backend.health().await {
            Ok(()) => {
                tracing::info!(backend = backend.name(), "Recommendation backend is healthy");
                self.write("Backend is up.\n").await
            }
            Err(e) => {
                tracing::warn!(
                    backend = backend.name(),
                    error = %e,
                    "Recommendation backend health check failed"
                );
                self.write(&format!("Backend is not reachable: {}\n", e)).await
            }
        }
    }

    async fn handle_line(&mut self, line: &str) -> AppResult<Flow> {
        let command = match parse_command(line) {
            Ok(command) => command,
            Err(e) => {
                self.write(&format!("{}\n", e)).await?;
                return Ok(Flow::Continue);
            }
        };

        tracing::debug!(command = ?command, "Handling command");

        match command {
            Command::Search(text) => {
                self.controller.update_query(text);
                self.submit().await?;
            }
            Command::Submit => self.submit().await?,
            Command::SetQuery(text) => {
                self.controller.update_query(text);
                self.write_status().await?;
            }
            Command::SetMediaType(media_type) => {
                self.controller.set_media_type(media_type);
                self.write_status().await?;
            }
            Command::ToggleSmartSearch => {
                self.controller.toggle_smart_search();
                self.write_status().await?;
            }
            Command::Select(position) => self.activate(position, CardAction::Select).await?,
            Command::Trailer(position) => self.activate(position, CardAction::WatchTrailer).await?,
            Command::Show => {
                self.write(&view::format_view(&self.controller.view())).await?;
            }
            Command::Health => self.report_health().await?,
            Command::Help => self.write(&format!("{}\n", commands::HELP)).await?,
            Command::Quit => return Ok(Flow::Quit),
        }

        Ok(Flow::Continue)
    }

    async fn submit(&mut self) -> AppResult<()> {
        match self.controller.begin_search(None) {
            Some(pending) => {
                self.dispatch(pending);
                self.write(&view::format_view(&self.controller.view())).await
            }
            None => Ok(()),
        }
    }

    async fn activate(&mut self, position: usize, action: CardAction) -> AppResult<()> {
        match self.controller.activate_card(position, action) {
            Ok(CardActivation::Search(pending)) => {
                self.dispatch(pending);
                self.write(&view::format_view(&self.controller.view())).await
            }
            Ok(CardActivation::OpenTrailer(url)) => self.open_trailer(&url).await,
            Ok(CardActivation::Ignored) => Ok(()),
            Err(e) => self.write(&format!("{}\n", e)).await,
        }
    }

    fn dispatch(&mut self, pending: PendingSearch) {
        let backend = self.controller.backend();
        let PendingSearch { token, request } = pending;

        let handle = self.in_flight.spawn(async move {
            let result = backend.recommend(&request).await;
            (token, result)
        });
        self.task_tokens.insert(handle.id(), token);
    }

    async fn on_response(
        &mut self,
        joined: Result<(TaskId, SearchResponse), tokio::task::JoinError>,
    ) -> AppResult<()> {
        let (token, result) = match joined {
            Ok((id, response)) => {
                self.task_tokens.remove(&id);
                response
            }
            Err(e) => {
                let Some(token) = self.task_tokens.remove(&e.id()) else {
                    tracing::error!(error = %e, "Search task failed with unknown token");
                    return Ok(());
                };
                (token, Err(AppError::Internal(e.to_string())))
            }
        };

        match self.controller.complete_search(token, result) {
            SearchOutcome::Completed => {
                self.write(&view::format_view(&self.controller.view())).await?;
            }
            SearchOutcome::Failed(notification) => self.notify(&notification).await?,
            SearchOutcome::Stale | SearchOutcome::Skipped => return Ok(()),
        }

        self.prompt().await
    }

    async fn notify(&mut self, notification: &Notification) -> AppResult<()> {
        self.write(&view::format_notification(notification)).await
    }

    async fn open_trailer(&mut self, url: &str) -> AppResult<()> {
        self.write(&format!("Trailer: {}\n", url)).await?;

        if let Some(command) = &self.browser_command {
            match tokio::process::Command::new(command).arg(url).spawn() {
                Ok(_) => tracing::debug!(command = %command, url = %url, "Opened trailer"),
                Err(e) => {
                    tracing::warn!(command = %command, error = %e, "Failed to launch browser");
                }
            }
        }

        Ok(())
    }

    async fn write_status(&mut self) -> AppResult<()> {
        self.write(&view::format_status(&self.controller.view())).await
    }

    async fn prompt(&mut self) -> AppResult<()> {
        self.write("> ").await
    }

    async fn write(&mut self, text: &str) -> AppResult<()> {
        self.out.write_all(text.as_bytes()).await?;
        self.out.flush().await?;
        Ok(())
    }
}
