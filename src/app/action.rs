use url::Url;

/// Side effects requested by the controller, executed by the run loop.
#[derive(Debug, Clone, PartialEq)]
pub enum Action {
    Load { url: Url, injected_script: String },
    Reload,
    GoBack,
    Navigate { url: Url },
    /// Swap the current history entry for `url` (server redirect).
    Replace { url: Url },
    PostMessage { data: String },
    OpenExternal { url: String },
    ExitApp,
}

impl Action {
    /// Name used when a content command fails.
    pub fn name(&self) -> &'static str {
        match self {
            Action::Load { .. } => "load",
            Action::Reload => "reload",
            Action::GoBack => "go_back",
            Action::Navigate { .. } => "navigate",
            Action::Replace { .. } => "replace",
            Action::PostMessage { .. } => "post_message",
            Action::OpenExternal { .. } => "open_external",
            Action::ExitApp => "exit_app",
        }
    }
}
