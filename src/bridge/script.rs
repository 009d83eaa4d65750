//! Script injected into the hosted page.
//!
//! This is the page-side half of the bridge. It forwards uncaught errors and
//! unhandled rejections as `js_error`, exposes `window.mobileVolumeControl`,
//! applies `system_volume_change` to every media element, instruments
//! `Audio` objects so page-initiated volume changes flow back to the shell,
//! pauses tracked audio when the page is hidden or unloaded, and pins the
//! layout against overscroll while honoring safe-area insets.

/// Global the content view exposes for posting strings to the shell.
pub const BRIDGE_GLOBAL: &str = "ShellBridge";

const TEMPLATE: &str = r#"(function() {
  var bridge = window.__BRIDGE__;
  function post(msg) {
    if (bridge && bridge.postMessage) {
      bridge.postMessage(JSON.stringify(msg));
    }
  }

  window.addEventListener('error', function(event) {
    post({
      type: 'js_error',
      message: String(event.message),
      stack: event.error ? event.error.stack : null,
      url: event.filename
    });
  });

  window.addEventListener('unhandledrejection', function(event) {
    post({
      type: 'js_error',
      message: event.reason ? event.reason.toString() : 'Unhandled Promise Rejection',
      stack: event.reason ? event.reason.stack : null,
      url: window.location.href
    });
  });

  var currentVolume = __VOLUME__;

  window.mobileVolumeControl = {
    setVolume: function(volume) {
      post({ type: 'volume_change', volume: volume });
    },
    getVolume: function() {
      return currentVolume;
    }
  };

  window.addEventListener('message', function(event) {
    var data = event.data;
    if (typeof data === 'string') {
      try { data = JSON.parse(data); } catch (e) { return; }
    }
    if (!data || data.type !== 'system_volume_change') {
      return;
    }
    currentVolume = data.volume;
    document.querySelectorAll('audio, video').forEach(function(media) {
      volumeSetter.call(media, data.volume);
    });
    window.dispatchEvent(new CustomEvent('volumechange', {
      detail: { volume: data.volume }
    }));
  });

  var tracked = new Set();
  var NativeAudio = window.Audio;
  var descriptor = Object.getOwnPropertyDescriptor(HTMLMediaElement.prototype, 'volume');
  var volumeSetter = descriptor.set;
  var volumeGetter = descriptor.get;

  window.Audio = function(src) {
    var audio = src === undefined ? new NativeAudio() : new NativeAudio(src);
    tracked.add(audio);
    audio.addEventListener('ended', function() {
      tracked.delete(audio);
    });
    Object.defineProperty(audio, 'volume', {
      set: function(value) {
        volumeSetter.call(this, value);
        post({ type: 'volume_change', volume: value });
      },
      get: function() {
        return volumeGetter.call(this);
      }
    });
    return audio;
  };
  window.Audio.prototype = NativeAudio.prototype;

  function pauseTracked() {
    tracked.forEach(function(audio) {
      if (!audio.paused) {
        audio.pause();
      }
    });
  }

  document.addEventListener('visibilitychange', function() {
    if (document.hidden) {
      pauseTracked();
    }
  });
  window.addEventListener('pagehide', pauseTracked);
  window.addEventListener('beforeunload', pauseTracked);

  var style = document.createElement('style');
  style.textContent = [
    'html, body {',
    '  overscroll-behavior: none !important;',
    '  position: fixed !important;',
    '  width: 100% !important;',
    '  height: 100% !important;',
    '  margin: 0 !important;',
    '  overflow: hidden !important;',
    '}',
    'body {',
    '  padding: env(safe-area-inset-top) env(safe-area-inset-right)',
    '           env(safe-area-inset-bottom) env(safe-area-inset-left) !important;',
    '}',
    '#root, [data-reactroot] {',
    '  height: calc(100vh - env(safe-area-inset-top) - env(safe-area-inset-bottom)) !important;',
    '  overflow-y: auto !important;',
    '  overscroll-behavior: none !important;',
    '}',
    '* { overscroll-behavior: none !important; }'
  ].join('\n');
  document.head.appendChild(style);

  true;
})();
"#;

/// Render the injected script with the shell's current volume baked in.
pub fn injected_script(volume: f64) -> String {
    let volume = if volume.is_finite() { volume.clamp(0.0, 1.0) } else { 0.0 };
    TEMPLATE
        .replace("__BRIDGE__", BRIDGE_GLOBAL)
        .replace("__VOLUME__", &format!("{}", volume))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_volume_and_bridge_are_substituted() {
        let script = injected_script(0.8);
        assert!(script.contains("var currentVolume = 0.8;"));
        assert!(script.contains("window.ShellBridge"));
        assert!(!script.contains("__VOLUME__"));
        assert!(!script.contains("__BRIDGE__"));
    }

    #[test]
    fn test_script_speaks_the_bridge_protocol() {
        let script = injected_script(1.0);
        for needle in ["'js_error'", "'volume_change'", "'system_volume_change'", "unhandledrejection", "visibilitychange", "beforeunload", "safe-area-inset-top"] {
            assert!(script.contains(needle), "missing {}", needle);
        }
    }

    #[test]
    fn test_out_of_range_volume_is_clamped() {
        assert!(injected_script(3.0).contains("var currentVolume = 1;"));
        assert!(injected_script(f64::NAN).contains("var currentVolume = 0;"));
    }
}
