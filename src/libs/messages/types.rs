#[derive(Debug, Clone)]
pub enum Message {
    // === WINDOW MESSAGES ===
    WindowOpened(String),             // role
    WindowFocused(String),            // role
    WindowClosed(String),             // role
    WindowOpenFailed(String, String), // role, error
    WindowEventForUnknownHandle(u64), // handle
    NoFocusedWindow,
    BoundsRestored(String),           // role
    BoundsSaveFailed(String, String), // role, error
    BoundsLoadFailed(String, String), // role, error
    SettingsLayoutChanged(String),    // layout

    // === SCHEDULE MESSAGES ===
    ScheduleStarted {
        interval_minutes: u64,
        poll_interval_ms: u128,
    },
    ScheduleStopped,
    ScheduleRejected(String), // validation error
    PromptRaised,
    PromptAlreadyOpen,
    PromptOpenFailed(String), // error
    PromptExpired,
    StaleTimerIgnored(u64), // timer id

    // === NOTIFICATION TEXT ===
    InputOpening,
    InputClosedDueToTimeout,

    // === SESSION MESSAGES ===
    SessionLoading,
    SessionAuthenticated(String), // user id
    SessionUnauthenticated,
    SessionIntentIgnored {
        intent: String,
        state: String,
    },
    SessionScheduleIdle,
    SessionExitRequested,
    TrayCreateFailed(String), // error

    // === TRAY MENU LABELS ===
    TrayInterface,
    TraySettings,
    TrayLogout,
    TrayExit,

    // === SHELL BRIDGE MESSAGES ===
    ShellWriteFailed(String),    // error
    InboundParseFailed(String),  // error
    InboundReadFailed(String),   // error
    InboundStreamClosed,

    // === HOST MESSAGES ===
    HostStarted(String), // version
    HostReceivedSigterm,
    HostReceivedSigint,
    HostReceivedCtrlC,
    HostCtrlCListenFailed(String), // error
    HostSignalHandlerFailed(String), // error
    HostSignalHandlingNotSupported,
    HostShuttingDown,
    HostExited,

    // === AUTOSTART MESSAGES ===
    AutostartEnabled,
    AutostartAlreadyEnabled,
    AutostartDisabled,
    AutostartAlreadyDisabled,
    AutostartEnableFailed(String),  // error
    AutostartDisableFailed(String), // error
    AutostartStatus(String),        // status
    AutostartHomeUnknown,
    AutostartEnsureFailed(String), // error

    // === CONFIGURATION MESSAGES ===
    ConfigSaved(String),      // path
    ConfigParseError(String), // error
    ConfigLocation(String),   // path
}
