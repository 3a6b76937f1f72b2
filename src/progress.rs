#![doc = r#"
User-facing progress text

Composition reports what it is doing to a [`Progress`] sink handed in by
the caller: allocation start, every track assignment, whether a new file
is written or an existing one extended, and completion. The sink only
observes; nothing it does changes what gets written.

Developer diagnostics go through `tracing` instead and never reach the sink.

Any `FnMut(&str)` is a sink:

```rust
# use smf_tracks::progress::Progress;
let mut lines = Vec::new();
let mut sink = |line: &str| lines.push(line.to_owned());
sink.report("adding melody track on channel 1");
assert_eq!(lines, ["adding melody track on channel 1"]);
```
"#]

/// Receives one formatted progress message at a time.
pub trait Progress {
    /// Called with each message, in order.
    fn report(&mut self, message: &str);
}

impl<F> Progress for F
where
    F: FnMut(&str),
{
    fn report(&mut self, message: &str) {
        self(message)
    }
}

/// A sink that discards everything.
#[derive(Debug, Default, Clone, Copy)]
pub struct Quiet;

impl Progress for Quiet {
    fn report(&mut self, _message: &str) {}
}
