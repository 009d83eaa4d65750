use crossterm::event::Event as CrosstermEvent;

#[derive(Debug)]
pub enum AppEvent {
    /// Terminal input event
    Terminal(CrosstermEvent),

    /// Lifecycle, navigation or bridge event from the content view
    Content(ContentEvent),

    /// Tick for timers and UI refresh
    Tick,
}

/// Events the content view reports back to the shell.
#[derive(Debug, Clone, PartialEq)]
pub enum ContentEvent {
    LoadStart {
        url: String,
    },
    LoadEnd {
        url: String,
    },
    LoadError {
        url: String,
        code: Option<i32>,
        description: Option<String>,
    },

    /// The view is at, or wants to go to, `url`. `redirect` is set when the
    /// server sent the current document elsewhere, so the destination takes
    /// its place in history instead of stacking on top of it.
    NavigationStateChange {
        url: String,
        can_go_back: bool,
        redirect: bool,
    },

    /// Raw string posted by the page over the bridge
    Message {
        data: String,
    },

    PageTitle {
        title: String,
    },
}
