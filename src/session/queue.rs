use super::*;
use tokio::sync::mpsc::UnboundedReceiver;
use tokio::sync::mpsc::UnboundedSender;
use tokio::sync::mpsc::unbounded_channel;

/// Unbounded FIFO hand-off between the stream reader and the session
/// loop. Pushes never block and never drop; pops wait until the reader
/// produces. Backpressure is intentionally absent: the producer's rate is
/// bounded by network arrival, not by computation.
#[derive(Debug)]
pub struct Queue {
    tx: UnboundedSender<Event>,
    rx: UnboundedReceiver<Event>,
}

impl Default for Queue {
    fn default() -> Self {
        let (tx, rx) = unbounded_channel();
        Self { tx, rx }
    }
}

impl Queue {
    /// Producer handle for the reader task.
    pub fn tap(&self) -> UnboundedSender<Event> {
        self.tx.clone()
    }

    /// Next event in arrival order.
    pub async fn pop(&mut self) -> Option<Event> {
        self.rx.recv().await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn pops_in_push_order() {
        let mut queue = Queue::default();
        let tap = queue.tap();
        for i in 0..64 {
            let update = crate::dto::Update {
                moves: i.to_string(),
                ..Default::default()
            };
            tap.send(Event::State(update)).unwrap();
        }
        for i in 0..64 {
            match queue.pop().await {
                Some(Event::State(update)) => assert_eq!(update.moves, i.to_string()),
                other => panic!("expected State, got {:?}", other),
            }
        }
    }

    #[tokio::test]
    async fn mixed_kinds_keep_wire_order() {
        let mut queue = Queue::default();
        let tap = queue.tap();
        tap.send(Event::Ping).unwrap();
        tap.send(Event::OpponentGone).unwrap();
        tap.send(Event::EndOfStream).unwrap();
        assert_eq!(queue.pop().await, Some(Event::Ping));
        assert_eq!(queue.pop().await, Some(Event::OpponentGone));
        assert_eq!(queue.pop().await, Some(Event::EndOfStream));
    }
}
