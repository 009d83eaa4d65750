//! The embedded content view.
//!
//! [`ContentView`] is everything the shell needs from the component that
//! renders the hosted page. Views report back asynchronously by sending
//! [`ContentEvent`](crate::app::event::ContentEvent)s on the app channel.

pub mod probe;

use crate::app::action::Action;
use anyhow::{Context, Result};
use url::Url;

pub use probe::ProbeView;

pub trait ContentView {
    /// Replace whatever is shown with `url`, injecting `injected_script` into
    /// every document it loads.
    fn load(&mut self, url: &Url, injected_script: &str) -> Result<()>;
    fn reload(&mut self) -> Result<()>;
    fn go_back(&mut self) -> Result<()>;
    fn navigate(&mut self, url: &Url) -> Result<()>;
    /// Load `url` in place of the current entry, leaving history depth alone.
    fn replace(&mut self, url: &Url) -> Result<()>;
    /// Deliver a serialized bridge message to the page.
    fn post_message(&mut self, data: &str) -> Result<()>;
}

/// Hand a URL the shell will not show to the system browser.
pub fn open_external(url: &str) -> Result<()> {
    webbrowser::open(url).with_context(|| format!("Failed to open {} in the system browser", url))
}

/// What the run loop should do after an action ran.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    Continue,
    Exit,
}

/// Run one controller action against the view. `open` is the external link
/// opener.
pub fn execute<V, F>(view: &mut V, action: &Action, open: F) -> Result<Flow>
where
    V: ContentView + ?Sized,
    F: FnOnce(&str) -> Result<()>,
{
    match action {
        Action::Load {
            url,
            injected_script,
        } => view.load(url, injected_script)?,
        Action::Reload => view.reload()?,
        Action::GoBack => view.go_back()?,
        Action::Navigate { url } => view.navigate(url)?,
        Action::Replace { url } => view.replace(url)?,
        Action::PostMessage { data } => view.post_message(data)?,
        Action::OpenExternal { url } => open(url)?,
        Action::ExitApp => return Ok(Flow::Exit),
    }
    Ok(Flow::Continue)
}
