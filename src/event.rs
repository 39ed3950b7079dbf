use std::time::Duration;

use crossterm::event::{Event as TerminalEvent, EventStream, KeyEvent};
use futures::StreamExt;
use tokio::sync::mpsc::{self, UnboundedReceiver, UnboundedSender};
use tokio::task::JoinHandle;
use tokio::time::{Instant, Interval, MissedTickBehavior};

#[derive(Clone, Debug)]
pub enum Event {
    Key(KeyEvent),
    Tick,
    Resize,
    /// SIGINT delivered outside raw mode, e.g. `kill -INT`.
    Interrupt,
}

/// Terminal events the dashboard reacts to; mouse, focus and paste are dropped.
pub fn translate(event: TerminalEvent) -> Option<Event> {
    match event {
        TerminalEvent::Key(key) => Some(Event::Key(key)),
        TerminalEvent::Resize(_, _) => Some(Event::Resize),
        _ => None,
    }
}

/// Feeds terminal input, the sampling clock and SIGINT into one queue.
pub struct EventHandler {
    rx: UnboundedReceiver<Event>,
    _pump: JoinHandle<()>,
}

impl EventHandler {
    pub fn new(tick_rate: Duration) -> Self {
        let (tx, rx) = mpsc::unbounded_channel();
        // First tick one full period out, so the first sample spans a whole
        // interval since the baseline.
        let mut clock = tokio::time::interval_at(Instant::now() + tick_rate, tick_rate);
        // A slow frame delays the next tick instead of bunching ticks up.
        clock.set_missed_tick_behavior(MissedTickBehavior::Delay);

        Self {
            rx,
            _pump: tokio::spawn(pump(tx, clock)),
        }
    }

    pub async fn next(&mut self) -> Option<Event> {
        self.rx.recv().await
    }
}

/// Runs until the receiver is dropped or the terminal stream ends.
async fn pump(tx: UnboundedSender<Event>, mut clock: Interval) {
    let mut terminal = EventStream::new();
    let interrupt = tokio::signal::ctrl_c();
    tokio::pin!(interrupt);

    loop {
        let event = tokio::select! {
            input = terminal.next() => match input {
                Some(Ok(raw)) => match translate(raw) {
                    Some(event) => event,
                    None => continue,
                },
                Some(Err(err)) => {
                    tracing::warn!(%err, "terminal event stream failed");
                    return;
                }
                None => return,
            },
            _ = clock.tick() => Event::Tick,
            signal = &mut interrupt => {
                if let Err(err) = signal {
                    tracing::warn!(%err, "cannot listen for SIGINT");
                    return;
                }
                Event::Interrupt
            }
        };

        let stop = matches!(event, Event::Interrupt);
        if tx.send(event).is_err() || stop {
            return;
        }
    }
}
