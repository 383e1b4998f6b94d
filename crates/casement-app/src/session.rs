//! Input dispatch: applies [`WindowCommand`]s to one window.

use casement_core::{
    BrowserWindowController, CasementError, HeadlessHandle, HeadlessSurfaceFactory, NavigationState,
    Result, SurfaceEvent, TabId, WindowCommand, WindowConfig, WindowLifecycle,
};

use crate::console::ConsoleChrome;

/// One window plus the headless surfaces and console chrome behind it.
pub struct Session {
    controller: BrowserWindowController,
    surfaces: HeadlessSurfaceFactory,
    chrome: ConsoleChrome,
}

impl Session {
    pub fn new(config: WindowConfig) -> Self {
        let surfaces = HeadlessSurfaceFactory::new();
        let chrome = ConsoleChrome::new();
        let controller = BrowserWindowController::new(
            config,
            Box::new(surfaces.clone()),
            Box::new(chrome.clone()),
            Box::new(chrome.clone()),
            Box::new(chrome.clone()),
        );
        Self {
            controller,
            surfaces,
            chrome,
        }
    }

    pub fn controller(&self) -> &BrowserWindowController {
        &self.controller
    }

    pub fn chrome(&self) -> &ConsoleChrome {
        &self.chrome
    }

    /// Whether the window has been torn down.
    pub fn is_closed(&self) -> bool {
        self.controller.lifecycle() == WindowLifecycle::Closing
    }

    /// Apply one command and return the lines to show the user.
    pub fn execute(&mut self, cmd: WindowCommand) -> Result<Vec<String>> {
        let mut out = Vec::new();
        match cmd {
            WindowCommand::Navigate { url } => {
                self.controller.navigate_to(&url)?;
            },
            WindowCommand::NewTab { url, activate } => {
                let id = self.controller.add_new_tab(&url, activate)?;
                out.push(format!("opened tab {id}"));
            },
            WindowCommand::ActivateTab { id } => {
                self.controller.activate_tab_by_id(id)?;
            },
            WindowCommand::CloseTab { id } => {
                self.close_tab(id)?;
            },
            WindowCommand::Back => {
                if !self.controller.go_back() {
                    out.push("back: unavailable".to_string());
                }
            },
            WindowCommand::Forward => {
                if !self.controller.go_forward() {
                    out.push("forward: unavailable".to_string());
                }
            },
            WindowCommand::Reload => self.controller.reload()?,
            WindowCommand::Stop => self.controller.stop_loading()?,
            WindowCommand::ListTabs => out.extend(self.tab_lines()),
            WindowCommand::SurfaceReady { id } => {
                let events = self.handle(id)?.complete_setup();
                self.deliver(id, &events)?;
            },
            WindowCommand::LoadStarted { id } => {
                let events = self.handle(id)?.start_load();
                self.deliver(id, &events)?;
            },
            WindowCommand::LoadFinished { id, title } => {
                let events = self.handle(id)?.finish_load(title.as_deref());
                self.deliver(id, &events)?;
            },
            WindowCommand::Quit => {
                for id in self.controller.tab_ids() {
                    self.controller.handle_tab_close(id)?;
                }
                self.surfaces.prune_closed();
            },
        }
        if !self.is_closed() {
            out.push(self.chrome.status_line());
        }
        Ok(out)
    }

    /// Close a tab. When it was the active one, the most recently created
    /// remaining tab takes over.
    fn close_tab(&mut self, id: TabId) -> Result<()> {
        let was_active = self.controller.active_tab() == Some(id);
        self.controller.handle_tab_close(id)?;
        self.surfaces.prune_closed();
        if was_active {
            if let Some(&next) = self.controller.tab_ids().last() {
                self.controller.activate_tab_by_id(next)?;
            }
        }
        Ok(())
    }

    fn handle(&self, id: TabId) -> Result<HeadlessHandle> {
        self.surfaces.handle(id).ok_or(CasementError::NotFound(id))
    }

    fn deliver(&mut self, id: TabId, events: &[SurfaceEvent]) -> Result<()> {
        for &event in events {
            self.controller.handle_surface_event(id, event)?;
        }
        Ok(())
    }

    fn tab_lines(&self) -> Vec<String> {
        let active = self.controller.active_tab();
        self.controller
            .tab_ids()
            .into_iter()
            .filter_map(|id| {
                let record = self.controller.tab(id).ok()?;
                let state = match record.navigation_state {
                    NavigationState::Blank => "blank",
                    NavigationState::Loading => "starting",
                    NavigationState::Ready => "ready",
                };
                let title = self
                    .controller
                    .tab_title(id)
                    .ok()
                    .flatten()
                    .unwrap_or_else(|| self.controller.config().default_title.clone());
                Some(format!(
                    "{} {id} [{state}{}] {} {}",
                    if active == Some(id) { "*" } else { " " },
                    if record.loading { ", loading" } else { "" },
                    record.requested_url.as_deref().unwrap_or("-"),
                    title
                ))
            })
            .collect()
    }
}
