use std::sync::Arc;

use tokio::sync::{mpsc, oneshot};
use tokio::task::{JoinHandle, JoinSet};

use super::{Agent, AgentEvent};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EventOutcome {
    Completed,
    Failed(String),
}

/// Completion signal for a dispatched event. The platform must keep
/// the agent alive until this settles.
pub struct WaitUntil(oneshot::Receiver<EventOutcome>);

impl WaitUntil {
    pub async fn settled(self) -> EventOutcome {
        self.0
            .await
            .unwrap_or_else(|_| EventOutcome::Failed("event handler was dropped".to_string()))
    }
}

struct Dispatch {
    event: AgentEvent,
    done: oneshot::Sender<EventOutcome>,
}

/// Supervises the agent's event handlers. Each event runs in its own
/// task so a failing or panicking handler can't take down the others.
pub struct AgentRuntime {
    events: mpsc::UnboundedSender<Dispatch>,
    supervisor: JoinHandle<()>,
}

impl AgentRuntime {
    pub fn spawn(agent: Agent) -> Self {
        let agent = Arc::new(agent);
        let (events, mut rx) = mpsc::unbounded_channel::<Dispatch>();

        let supervisor = tokio::spawn(async move {
            let mut in_flight = JoinSet::new();
            loop {
                tokio::select! {
                    Some(dispatch) = rx.recv() => {
                        in_flight.spawn(run_event(Arc::clone(&agent), dispatch));
                    }
                    Some(joined) = in_flight.join_next(), if !in_flight.is_empty() => {
                        if let Err(e) = joined {
                            tracing::error!("Agent supervisor lost an event task: {}", e);
                        }
                    }
                    // Channel closed and every handler has settled
                    else => break,
                }
            }
            tracing::debug!("Agent runtime stopped");
        });

        Self { events, supervisor }
    }

    pub fn dispatch(&self, event: AgentEvent) -> WaitUntil {
        let (done, settled) = oneshot::channel();
        if let Err(mpsc::error::SendError(dispatch)) = self.events.send(Dispatch { event, done }) {
            let _ = dispatch
                .done
                .send(EventOutcome::Failed("agent runtime stopped".to_string()));
        }
        WaitUntil(settled)
    }

    /// Stop accepting events and wait for in-flight handlers to settle.
    pub async fn shutdown(self) {
        drop(self.events);
        if let Err(e) = self.supervisor.await {
            tracing::error!("Agent supervisor failed: {}", e);
        }
    }
}

async fn run_event(agent: Arc<Agent>, dispatch: Dispatch) {
    let Dispatch { event, done } = dispatch;
    tracing::debug!("Handling agent event {:?}", event);

    let handler = tokio::spawn(async move { agent.handle(event).await });
    let outcome = match handler.await {
        Ok(Ok(())) => EventOutcome::Completed,
        Ok(Err(e)) => {
            tracing::error!("Agent event failed: {}", e);
            EventOutcome::Failed(e.to_string())
        }
        Err(e) => {
            tracing::error!("Agent event handler panicked: {}", e);
            EventOutcome::Failed(e.to_string())
        }
    };

    // The platform may have stopped waiting
    let _ = done.send(outcome);
}
